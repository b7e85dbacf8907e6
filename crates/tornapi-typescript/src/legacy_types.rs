//! Response type synthesis for the legacy (v1) schema.

use tornapi_core::legacy::{FieldDescriptor, FieldKey, FieldMap, Structure, StructureId, StructureKind};

use crate::error::SynthesisError;
use crate::type_mapper::string_literal;

/// Map a legacy primitive tag to its TypeScript type. Matching ignores case
/// and surrounding whitespace; `None` means the tag is not in the vocabulary.
pub fn primitive_to_ts(tag: &str) -> Option<&'static str> {
    let ts = match tag.trim().to_lowercase().as_str() {
        "array of strings" => "string[]",
        "boolean" => "boolean",
        "array of integers" | "array of epoch timestamps" => "number[]",
        "epoch timestamp" | "integer" | "float" | "integer or float" => "number",
        "boolean as integer" | "0 or 1" => "0 | 1",
        "1 or 2" => "1 | 2",
        "1 or 3" => "1 | 3",
        "string" | "date (yyyy-mm-dd)" | "date (dd/mm/yy)" => "string",
        "integer + string" => "number | string",
        "integer + empty string" => "number | \"\"",
        "key-value map" => "Record<string, unknown>",
        "unknown" | "mixed" => "unknown",
        _ => return None,
    };
    Some(ts)
}

/// Build the type expression for a selection's response field map.
///
/// A map whose keys are all placeholders becomes a union of index-signature
/// types, one per entry; anything else becomes a single object literal.
/// Members keep the map's order.
pub fn synthesize(fields: &FieldMap, structures: &[Structure]) -> Result<String, SynthesisError> {
    Synthesizer {
        structures,
        resolving: Vec::new(),
    }
    .field_map(fields, "")
}

struct Synthesizer<'a> {
    structures: &'a [Structure],
    /// Object structures currently being expanded, to catch self references.
    resolving: Vec<&'a StructureId>,
}

impl<'a> Synthesizer<'a> {
    fn field_map(&mut self, fields: &'a FieldMap, path: &str) -> Result<String, SynthesisError> {
        if fields.is_empty() {
            return Ok("{}".to_string());
        }

        let dynamic = fields.iter().all(|(key, _)| key.is_placeholder());
        let mut members = Vec::with_capacity(fields.len());
        for (key, descriptor) in fields.iter() {
            let field_path = if path.is_empty() {
                key.to_string()
            } else {
                format!("{path}.{key}")
            };
            let ty = self.descriptor(descriptor, &field_path)?;
            members.push(format!("{}: {ty}", member_name(key)));
        }

        if dynamic {
            Ok(members
                .iter()
                .map(|member| format!("{{ {member} }}"))
                .collect::<Vec<_>>()
                .join(" | "))
        } else {
            Ok(format!("{{ {} }}", members.join("; ")))
        }
    }

    fn descriptor(
        &mut self,
        descriptor: &'a FieldDescriptor,
        field: &str,
    ) -> Result<String, SynthesisError> {
        match descriptor {
            FieldDescriptor::Primitive(tag) => primitive_to_ts(tag)
                .map(str::to_string)
                .ok_or_else(|| SynthesisError::UnknownPrimitive {
                    tag: tag.clone(),
                    field: field.to_string(),
                }),
            FieldDescriptor::Structure(id) => self.structure(id, field),
            FieldDescriptor::Nested(nested) => self.field_map(nested, field),
        }
    }

    fn structure(&mut self, id: &StructureId, field: &str) -> Result<String, SynthesisError> {
        let structures = self.structures;
        let structure = structures.iter().find(|s| &s.id == id).ok_or_else(|| {
            SynthesisError::UnresolvedStructure {
                field: field.to_string(),
                id: id.to_string(),
                structures: structures.iter().map(Structure::to_string).collect(),
            }
        })?;

        match &structure.kind {
            StructureKind::Enum(values) if values.is_empty() => Ok("never".to_string()),
            StructureKind::Enum(values) => Ok(values
                .iter()
                .map(|v| string_literal(v))
                .collect::<Vec<_>>()
                .join(" | ")),
            StructureKind::Object(fields) => {
                if self.resolving.contains(&&structure.id) {
                    return Err(SynthesisError::RecursiveStructure {
                        field: field.to_string(),
                        id: id.to_string(),
                    });
                }
                self.resolving.push(&structure.id);
                let ty = self.field_map(fields, field);
                self.resolving.pop();
                ty
            }
            StructureKind::Unsupported(kind) => Err(SynthesisError::UnsupportedStructure {
                field: field.to_string(),
                kind: kind.clone(),
            }),
        }
    }
}

/// The member name for a key: placeholders become index signatures, plain
/// names are quoted, pre-quoted names are kept as they are.
fn member_name(key: &FieldKey) -> String {
    match key {
        FieldKey::Plain(name) => string_literal(name),
        FieldKey::Quoted(raw) => raw.clone(),
        FieldKey::Placeholder(text) => format!("[{}: string]", index_name(text)),
    }
}

/// `faction id` → `faction_id`
fn index_name(placeholder: &str) -> String {
    let mut name = String::with_capacity(placeholder.len());
    for c in placeholder.chars() {
        if c.is_alphanumeric() || c == '_' {
            name.push(c);
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let trimmed = name.trim_matches('_');
    if trimmed.is_empty() {
        "key".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;

    fn fields(value: serde_json::Value) -> FieldMap {
        serde_json::from_value(value).unwrap()
    }

    fn structures(value: serde_json::Value) -> Vec<Structure> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_vocabulary_is_total() {
        let table = [
            ("Array of strings", "string[]"),
            ("Boolean", "boolean"),
            ("Array of integers", "number[]"),
            ("Array of epoch timestamps", "number[]"),
            ("Epoch timestamp", "number"),
            ("Integer", "number"),
            ("Float", "number"),
            ("Integer or float", "number"),
            ("Boolean as integer", "0 | 1"),
            ("0 or 1", "0 | 1"),
            ("1 or 2", "1 | 2"),
            ("1 or 3", "1 | 3"),
            ("String", "string"),
            ("Date (YYYY-MM-DD)", "string"),
            ("Date (DD/MM/YY)", "string"),
            ("Integer + string", "number | string"),
            ("Integer + empty string", "number | \"\""),
            ("Key-value map", "Record<string, unknown>"),
            ("Unknown", "unknown"),
            ("Mixed", "unknown"),
        ];
        for (tag, expected) in table {
            assert_eq!(primitive_to_ts(tag), Some(expected), "tag {tag}");
            assert_eq!(primitive_to_ts(&tag.to_uppercase()), Some(expected));
        }
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let err = synthesize(&fields(json!({ "level": "Imaginary number" })), &[]).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnknownPrimitive {
                tag: "Imaginary number".into(),
                field: "level".into()
            }
        );
    }

    #[test]
    fn test_object_literal_keeps_order() {
        let ty = synthesize(
            &fields(json!({ "name": "String", "level": "Integer", "donator": "Boolean as integer" })),
            &[],
        )
        .unwrap();
        assert_snapshot!(ty, @r#"{ "name": string; "level": number; "donator": 0 | 1 }"#);
    }

    #[test]
    fn test_all_placeholders_make_a_union() {
        let ty = synthesize(
            &fields(json!({
                "<faction id>": { "name": "String" },
                "<user id>": "Integer"
            })),
            &[],
        )
        .unwrap();
        assert_snapshot!(ty, @r#"{ [faction_id: string]: { "name": string } } | { [user_id: string]: number }"#);
    }

    #[test]
    fn test_mixed_keys_make_a_single_object() {
        let ty = synthesize(
            &fields(json!({ "<item id>": "Integer", "total": "Integer" })),
            &[],
        )
        .unwrap();
        assert_snapshot!(ty, @r#"{ [item_id: string]: number; "total": number }"#);
    }

    #[test]
    fn test_structures_resolve() {
        let structures = structures(json!([
            { "id": 1, "type": "Enum", "values": ["Okay", "Hospital"] },
            { "id": 2, "type": "Object", "schema": { "state": { "structure": { "id": 1 } }, "until": "Epoch timestamp" } }
        ]));
        let ty = synthesize(&fields(json!({ "status": { "structure": { "id": 2 } } })), &structures)
            .unwrap();
        assert_snapshot!(ty, @r#"{ "status": { "state": "Okay" | "Hospital"; "until": number } }"#);
    }

    #[test]
    fn test_unresolved_structure_lists_candidates() {
        let structures = structures(json!([{ "id": 1, "type": "Enum", "values": ["A"] }]));
        let err = synthesize(
            &fields(json!({ "life": { "state": { "structure": { "id": 9 } } } })),
            &structures,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnresolvedStructure {
                field: "life.state".into(),
                id: "9".into(),
                structures: vec![r#"{"id":1,"type":"Enum","values":["A"]}"#.into()],
            }
        );
    }

    #[test]
    fn test_unsupported_structure_kind() {
        let structures = structures(json!([{ "id": 4, "type": "Tuple" }]));
        let err = synthesize(&fields(json!({ "pair": { "structure": { "id": 4 } } })), &structures)
            .unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedStructure { kind, .. } if kind == "Tuple"));
    }

    #[test]
    fn test_self_referencing_structure() {
        let structures = structures(json!([
            { "id": 5, "type": "Object", "schema": { "child": { "structure": { "id": 5 } } } }
        ]));
        let err = synthesize(&fields(json!({ "root": { "structure": { "id": 5 } } })), &structures)
            .unwrap_err();
        assert!(matches!(err, SynthesisError::RecursiveStructure { .. }));
    }

    #[test]
    fn test_members_named_like_markers() {
        let ty = synthesize(
            &fields(json!({
                "item": { "name": "String", "type": "String", "value": "Integer" },
                "race": { "structure": "String", "laps": "Integer" }
            })),
            &[],
        )
        .unwrap();
        assert_snapshot!(ty, @r#"{ "item": { "name": string; "type": string; "value": number }; "race": { "structure": string; "laps": number } }"#);
    }

    #[test]
    fn test_quoted_keys_are_kept() {
        let ty = synthesize(&fields(json!({ "\"odd key\"": "String" })), &[]).unwrap();
        assert_snapshot!(ty, @r#"{ "odd key": string }"#);
    }

    #[test]
    fn test_index_name() {
        assert_eq!(index_name("faction id"), "faction_id");
        assert_eq!(index_name("item-id / name"), "item_id_name");
        assert_eq!(index_name("  "), "key");
    }
}
