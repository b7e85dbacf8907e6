use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::{IrField, IrSchema, IrShape, IrType};
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};

use super::name_normalizer::normalize_name;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Convert a parsed `SchemaOrRef` to an `IrType`.
pub fn schema_or_ref_to_ir_type(schema_or_ref: &SchemaOrRef) -> IrType {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            let name = ref_path.rsplit('/').next().unwrap_or("Unknown");
            IrType::Ref(normalize_name(name).identifier)
        }
        SchemaOrRef::Schema(schema) => schema_to_ir_type(schema),
    }
}

/// Convert a parsed `Schema` to an `IrType`, honouring `nullable`.
pub fn schema_to_ir_type(schema: &Schema) -> IrType {
    let base = schema_to_ir_type_inner(schema);
    if schema.nullable == Some(true) {
        base.nullable()
    } else {
        base
    }
}

fn schema_to_ir_type_inner(schema: &Schema) -> IrType {
    // Composition first
    if !schema.one_of.is_empty() {
        return IrType::Union(schema.one_of.iter().map(schema_or_ref_to_ir_type).collect());
    }
    if !schema.any_of.is_empty() {
        return IrType::Union(schema.any_of.iter().map(schema_or_ref_to_ir_type).collect());
    }
    if !schema.all_of.is_empty() {
        if schema.all_of.len() == 1 && schema.properties.is_empty() {
            return schema_or_ref_to_ir_type(&schema.all_of[0]);
        }
        let mut parts: Vec<IrType> = schema.all_of.iter().map(schema_or_ref_to_ir_type).collect();
        if !schema.properties.is_empty() {
            parts.push(IrType::Object(fields(&schema.properties, &schema.required)));
        }
        return IrType::Intersection(parts);
    }

    if !schema.enum_values.is_empty() {
        let variants = enum_variants(&schema.enum_values);
        return match variants.len() {
            0 => IrType::String,
            1 => variants.into_iter().next().unwrap_or(IrType::String),
            _ => IrType::Union(variants),
        };
    }

    if let Some(ref val) = schema.const_value {
        return literal_type(val).unwrap_or(IrType::Any);
    }

    match &schema.schema_type {
        Some(TypeSet::Single(t)) => single_type(t, schema),
        Some(TypeSet::Multiple(types)) => {
            let has_null = types.contains(&SchemaType::Null);
            let mut variants: Vec<IrType> = types
                .iter()
                .filter(|t| **t != SchemaType::Null)
                .map(|t| single_type(t, schema))
                .collect();
            let base = match variants.len() {
                0 => return IrType::Null,
                1 => variants.remove(0),
                _ => IrType::Union(variants),
            };
            if has_null { base.nullable() } else { base }
        }
        None => {
            // No type: an implicit object when it has properties
            if !schema.properties.is_empty() {
                resolve_object_type(schema)
            } else if let Some(ref items) = schema.items {
                IrType::Array(Box::new(schema_or_ref_to_ir_type(items)))
            } else {
                IrType::Any
            }
        }
    }
}

fn single_type(t: &SchemaType, schema: &Schema) -> IrType {
    match t {
        SchemaType::String => IrType::String,
        SchemaType::Number => IrType::Number,
        SchemaType::Integer => IrType::Integer,
        SchemaType::Boolean => IrType::Boolean,
        SchemaType::Null => IrType::Null,
        SchemaType::Array => match &schema.items {
            Some(items) => IrType::Array(Box::new(schema_or_ref_to_ir_type(items))),
            None => IrType::Array(Box::new(IrType::Any)),
        },
        SchemaType::Object => resolve_object_type(schema),
    }
}

fn resolve_object_type(schema: &Schema) -> IrType {
    if schema.properties.is_empty() {
        match &schema.additional_properties {
            Some(AdditionalProperties::Schema(s)) => {
                IrType::Map(Box::new(schema_or_ref_to_ir_type(s)))
            }
            Some(AdditionalProperties::Bool(_)) | None => IrType::Map(Box::new(IrType::Any)),
        }
    } else {
        IrType::Object(fields(&schema.properties, &schema.required))
    }
}

fn fields(properties: &IndexMap<String, SchemaOrRef>, required: &[String]) -> Vec<IrField> {
    properties
        .iter()
        .map(|(name, prop)| {
            IrField::new(name, schema_or_ref_to_ir_type(prop), required.contains(name))
        })
        .collect()
}

fn literal_type(value: &serde_json::Value) -> Option<IrType> {
    match value {
        serde_json::Value::String(s) => Some(IrType::StringLiteral(s.clone())),
        serde_json::Value::Number(n) => Some(IrType::NumberLiteral(n.to_string())),
        serde_json::Value::Bool(_) => Some(IrType::Boolean),
        serde_json::Value::Null => Some(IrType::Null),
        _ => None,
    }
}

fn enum_variants(values: &[serde_json::Value]) -> Vec<IrType> {
    let mut variants: Vec<IrType> = Vec::new();
    for value in values {
        if let Some(ty) = literal_type(value)
            && !variants.contains(&ty)
        {
            variants.push(ty);
        }
    }
    variants
}

/// Convert a named component schema to an `IrSchema`.
///
/// A top-level `$ref` becomes an alias of its target; it must point into
/// `#/components/schemas/`.
pub fn schema_or_ref_to_ir_schema(
    name: &str,
    schema_or_ref: &SchemaOrRef,
) -> Result<IrSchema, TransformError> {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            let target = ref_path
                .strip_prefix(SCHEMA_REF_PREFIX)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| TransformError::InvalidRefFormat(ref_path.clone()))?;
            Ok(IrSchema {
                name: normalize_name(name),
                description: None,
                shape: IrShape::Alias(IrType::Ref(normalize_name(target).identifier)),
            })
        }
        SchemaOrRef::Schema(schema) => Ok(schema_to_ir_schema(name, schema)),
    }
}

/// Convert a named `Schema` to an `IrSchema`.
///
/// Nullable enums, unions and objects fall through to an alias so the
/// `| null` survives in the declaration.
pub fn schema_to_ir_schema(name: &str, schema: &Schema) -> IrSchema {
    IrSchema {
        name: normalize_name(name),
        description: schema.description.clone(),
        shape: component_shape(schema),
    }
}

fn component_shape(schema: &Schema) -> IrShape {
    if schema.nullable == Some(true) {
        return IrShape::Alias(schema_to_ir_type(schema));
    }
    if !schema.enum_values.is_empty() {
        return IrShape::Enum(enum_variants(&schema.enum_values));
    }
    let alternatives = if schema.one_of.is_empty() {
        &schema.any_of
    } else {
        &schema.one_of
    };
    if !alternatives.is_empty() {
        return IrShape::Union(alternatives.iter().map(schema_or_ref_to_ir_type).collect());
    }

    let is_plain_object = schema.all_of.is_empty()
        && !schema.properties.is_empty()
        && matches!(
            schema.schema_type,
            Some(TypeSet::Single(SchemaType::Object)) | None
        );
    if !is_plain_object {
        return IrShape::Alias(schema_to_ir_type(schema));
    }

    let mut fields = fields(&schema.properties, &schema.required);
    for (field, prop) in fields.iter_mut().zip(schema.properties.values()) {
        if let SchemaOrRef::Schema(prop) = prop {
            field.description = prop.description.clone();
        }
    }
    IrShape::Object {
        fields,
        open: !matches!(
            schema.additional_properties,
            None | Some(AdditionalProperties::Bool(false))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(json: serde_json::Value) -> Schema {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_nullable_ref_via_all_of() {
        let s = schema(serde_json::json!({
            "allOf": [{ "$ref": "#/components/schemas/UserBasic" }],
            "nullable": true
        }));
        assert_eq!(
            schema_to_ir_type(&s),
            IrType::Union(vec![IrType::Ref("UserBasic".into()), IrType::Null])
        );
    }

    #[test]
    fn test_integer_enum_becomes_number_literals() {
        let s = schema(serde_json::json!({ "type": "integer", "enum": [1, 2] }));
        assert_eq!(
            schema_to_ir_type(&s),
            IrType::Union(vec![
                IrType::NumberLiteral("1".into()),
                IrType::NumberLiteral("2".into())
            ])
        );
    }

    #[test]
    fn test_type_list_with_null() {
        let s = schema(serde_json::json!({ "type": ["string", "null"] }));
        assert_eq!(
            schema_to_ir_type(&s),
            IrType::Union(vec![IrType::String, IrType::Null])
        );
    }

    #[test]
    fn test_open_object_is_map_of_any() {
        let s = schema(serde_json::json!({ "type": "object" }));
        assert_eq!(schema_to_ir_type(&s), IrType::Map(Box::new(IrType::Any)));
    }

    #[test]
    fn test_component_object_schema() {
        let s = schema(serde_json::json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string", "nullable": true }
            }
        }));
        let ir = schema_to_ir_schema("user_basic", &s);
        assert_eq!(ir.name.identifier, "UserBasic");
        match ir.shape {
            IrShape::Object { fields, open } => {
                assert!(!open);
                assert_eq!(fields.len(), 2);
                assert!(fields[0].required);
                assert!(!fields[1].required);
                assert_eq!(
                    fields[1].field_type,
                    IrType::Union(vec![IrType::String, IrType::Null])
                );
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_component_field_descriptions_and_extra_keys() {
        let s = schema(serde_json::json!({
            "properties": {
                "level": { "type": "integer", "description": "Current level" },
                "faction": { "$ref": "#/components/schemas/Faction" }
            },
            "additionalProperties": true
        }));
        let IrShape::Object { fields, open } = schema_to_ir_schema("Profile", &s).shape else {
            panic!("expected object");
        };
        assert!(open);
        assert_eq!(fields[0].description.as_deref(), Some("Current level"));
        assert_eq!(fields[1].description, None);
        assert_eq!(fields[1].field_type, IrType::Ref("Faction".into()));
    }

    #[test]
    fn test_nullable_enum_component_is_alias() {
        let s = schema(serde_json::json!({ "enum": ["Okay", "Jail"], "nullable": true }));
        let ir = schema_to_ir_schema("State", &s);
        assert_eq!(ir.kind(), "alias");
    }

    #[test]
    fn test_component_ref_must_target_schemas() {
        let bad = SchemaOrRef::Ref {
            ref_path: "#/components/parameters/Foo".into(),
        };
        assert!(matches!(
            schema_or_ref_to_ir_schema("Foo", &bad),
            Err(TransformError::InvalidRefFormat(_))
        ));
    }
}
