pub mod fetch;
pub mod pipeline;
pub mod tools;

pub use fetch::{HttpSchemaSource, LegacyBundle, SchemaSource, fetch_legacy};
pub use pipeline::{Artifacts, Pipeline, persist};
pub use tools::{
    CompiledOutput, ExternalCompiler, ExternalFormatter, Passthrough, SourceCompiler,
    SourceFormatter,
};
