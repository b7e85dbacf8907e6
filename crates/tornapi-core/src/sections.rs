use indexmap::IndexMap;

use crate::ir::{SectionV2, SelectionV2};
use crate::params::extract_parameter_names;
use crate::parse::OpenApiSpec;

/// Derive the v2 section/selection table from the document's paths.
///
/// Paths with fewer than two non-empty segments are skipped. The first
/// segment names the section and the last one the selection; a selection
/// seen twice within a section keeps its first entry. A path without a `GET`
/// still yields a selection, with no response type and only the path-level
/// parameters.
pub fn extract_v2_sections(spec: &OpenApiSpec) -> Vec<SectionV2> {
    let empty = IndexMap::new();
    let parameter_components = spec
        .components
        .as_ref()
        .map(|c| &c.parameters)
        .unwrap_or(&empty);

    let mut sections: IndexMap<String, SectionV2> = IndexMap::new();
    for (path, item) in &spec.paths {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (Some(section), Some(selection)) = (segments.first(), segments.last()) else {
            continue;
        };
        if segments.len() < 2 {
            continue;
        }

        let entry = sections
            .entry(section.to_string())
            .or_insert_with(|| SectionV2 {
                name: section.to_string(),
                selections: IndexMap::new(),
            });
        if entry.selections.contains_key(*selection) {
            log::debug!("skipping {path}: selection {section}/{selection} already defined");
            continue;
        }

        let mut params = item.parameters.clone();
        let response = match item.get {
            Some(ref get) => {
                params.extend(get.parameters.iter().cloned());
                get.ok_schema("application/json")
                    .and_then(|schema| schema.ref_name())
                    .map(str::to_string)
            }
            None => {
                log::debug!("{path} has no GET operation; emitting an untyped selection");
                None
            }
        };
        entry.selections.insert(
            selection.to_string(),
            SelectionV2 {
                response,
                params: extract_parameter_names(&params, parameter_components),
            },
        );
    }

    sections.into_values().collect()
}
