use indexmap::{IndexMap, IndexSet};

use crate::parse::document::{Parameter, RefOr};

/// Parameters the runtime client sets itself; never exposed as typed params.
pub const RESERVED_PARAMETERS: [&str; 2] = ["comment", "key"];

/// Flatten an operation's parameter list into parameter names.
///
/// References are resolved against `components` by their trailing path
/// segment. A reference that cannot be resolved (or that points at another
/// reference) is dropped.
pub fn extract_parameter_names(
    params: &[RefOr<Parameter>],
    components: &IndexMap<String, RefOr<Parameter>>,
) -> IndexSet<String> {
    params
        .iter()
        .filter_map(|param| match param {
            RefOr::Inline(p) => Some(p.name.as_str()),
            RefOr::Ref { ref_path } => {
                let resolved = param
                    .ref_name()
                    .and_then(|target| components.get(target))
                    .and_then(RefOr::inline);
                if resolved.is_none() {
                    log::debug!("dropping unresolved parameter reference {ref_path}");
                }
                resolved.map(|p| p.name.as_str())
            }
        })
        .filter(|name| !RESERVED_PARAMETERS.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::document::ParameterLocation;

    fn inline(name: &str) -> RefOr<Parameter> {
        RefOr::Inline(Parameter {
            name: name.to_string(),
            location: ParameterLocation::Query,
            required: false,
        })
    }

    fn reference(target: &str) -> RefOr<Parameter> {
        RefOr::Ref {
            ref_path: format!("#/components/parameters/{target}"),
        }
    }

    fn components() -> IndexMap<String, RefOr<Parameter>> {
        let mut map = IndexMap::new();
        map.insert("ApiTimestamp".to_string(), inline("timestamp"));
        map.insert("ApiComment".to_string(), inline("comment"));
        map.insert("ApiKey".to_string(), inline("key"));
        map.insert("Chained".to_string(), reference("ApiTimestamp"));
        map
    }

    #[test]
    fn test_inline_and_resolved_refs() {
        let names = extract_parameter_names(
            &[inline("limit"), reference("ApiTimestamp")],
            &components(),
        );
        assert_eq!(names.into_iter().collect::<Vec<_>>(), ["limit", "timestamp"]);
    }

    #[test]
    fn test_unresolved_refs_are_dropped() {
        let names = extract_parameter_names(
            &[reference("Missing"), reference("Chained"), inline("from")],
            &components(),
        );
        assert_eq!(names.into_iter().collect::<Vec<_>>(), ["from"]);
    }

    #[test]
    fn test_reserved_names_always_excluded() {
        let names = extract_parameter_names(
            &[
                inline("key"),
                reference("ApiKey"),
                inline("comment"),
                reference("ApiComment"),
                inline("comment"),
                inline("striptags"),
            ],
            &components(),
        );
        assert!(!names.contains("key"));
        assert!(!names.contains("comment"));
        assert_eq!(names.len(), 1);
    }
}
