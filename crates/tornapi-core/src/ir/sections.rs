use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// One section of the v2 API, derived from the OpenAPI paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionV2 {
    pub name: String,
    /// Selections in path encounter order.
    pub selections: IndexMap<String, SelectionV2>,
}

/// A single v2 selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionV2 {
    /// Component schema name of the `200` JSON response, if the path declares one.
    pub response: Option<String>,
    pub params: IndexSet<String>,
}
