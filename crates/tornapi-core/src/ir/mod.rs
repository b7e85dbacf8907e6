pub mod schemas;
pub mod sections;
pub mod types;

pub use schemas::*;
pub use sections::{SectionV2, SelectionV2};
pub use types::NormalizedName;
