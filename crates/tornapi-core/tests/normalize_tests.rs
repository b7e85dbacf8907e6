use std::collections::BTreeSet;

use tornapi_core::normalize::normalize;
use tornapi_core::parse;
use tornapi_core::parse::schema::{Schema, SchemaOrRef};

const TORN: &str = include_str!("fixtures/torn-openapi.json");

/// Assert `required` equals the property-name set for every object schema
/// reachable through properties and array items.
fn assert_required_invariant(schema: &Schema, path: &str) {
    if !schema.properties.is_empty() {
        let declared: BTreeSet<&String> = schema.properties.keys().collect();
        let required: BTreeSet<&String> = schema.required.iter().collect();
        assert_eq!(declared, required, "required mismatch at {path}");
    }
    for (name, property) in &schema.properties {
        if let SchemaOrRef::Schema(s) = property {
            assert_required_invariant(s, &format!("{path}.{name}"));
        }
    }
    if let Some(SchemaOrRef::Schema(items)) = schema.items.as_deref() {
        assert_required_invariant(items, &format!("{path}[]"));
    }
}

fn component_schemas(spec: &parse::OpenApiSpec) -> Vec<(&String, &Schema)> {
    spec.components
        .as_ref()
        .unwrap()
        .schemas
        .iter()
        .filter_map(|(name, s)| match s {
            SchemaOrRef::Schema(schema) => Some((name, schema.as_ref())),
            SchemaOrRef::Ref { .. } => None,
        })
        .collect()
}

#[test]
fn normalized_fixture_satisfies_required_invariant() {
    let mut spec = parse::from_json(TORN).unwrap();
    normalize(&mut spec);
    for (name, schema) in component_schemas(&spec) {
        assert_required_invariant(schema, name);
    }
}

#[test]
fn normalized_fixture_has_no_type_beside_composition() {
    let mut spec = parse::from_json(TORN).unwrap();
    normalize(&mut spec);
    for (name, schema) in component_schemas(&spec) {
        for (prop_name, prop) in &schema.properties {
            if let SchemaOrRef::Schema(p) = prop {
                let composed = !p.all_of.is_empty() || !p.one_of.is_empty();
                assert!(
                    !(composed && p.schema_type.is_some()),
                    "{name}.{prop_name} still has a type beside allOf/oneOf"
                );
            }
        }
    }
}

#[test]
fn normalization_is_idempotent_on_fixture() {
    let mut once = parse::from_json(TORN).unwrap();
    normalize(&mut once);
    let mut twice = once.clone();
    normalize(&mut twice);
    assert_eq!(once, twice);
}
