pub mod config;
pub mod error;
pub mod ir;
pub mod legacy;
pub mod normalize;
pub mod params;
pub mod parse;
pub mod sections;
pub mod transform;

/// A generated artifact with its file name and content.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}
