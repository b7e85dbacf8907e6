pub mod emitters;
pub mod error;
pub mod generator;
pub mod legacy_types;
pub mod splice;
pub mod type_mapper;

pub use emitters::{components, errors, sections};
pub use error::{EmitError, SpliceError, SynthesisError};
pub use generator::{CLIENT_TEMPLATE, GeneratedTypes, LegacyInput, generate_types, render_client};
