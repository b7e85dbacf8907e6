//! In-place cleanup of the Torn OpenAPI document before conversion.
//!
//! The document mixes `type` with `allOf`/`oneOf` on the same property and
//! leaves `required` unset although every field is always present (possibly
//! `null`). Both trip up the type conversion, so they are fixed up here.

use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::OpenApiSpec;

/// Run all normalization passes, in order. Every pass is idempotent and a
/// document without `components.schemas` is left untouched.
pub fn normalize(spec: &mut OpenApiSpec) {
    let stripped_all_of = strip_type_beside_composition(spec, |s| !s.all_of.is_empty());
    let stripped_one_of = strip_type_beside_composition(spec, |s| !s.one_of.is_empty());
    let required = require_all_properties(spec);
    log::debug!(
        "normalized document: {stripped_all_of} allOf/type, {stripped_one_of} oneOf/type, {required} required lists"
    );
}

/// Delete `type` from component-schema properties that also carry the
/// composition keyword selected by `has_composition`. Returns the number of
/// properties changed.
pub fn strip_type_beside_composition(
    spec: &mut OpenApiSpec,
    has_composition: impl Fn(&Schema) -> bool,
) -> usize {
    let mut changed = 0;
    for schema in component_schemas_mut(spec) {
        for property in schema.properties.values_mut() {
            if let Some(property) = property.as_schema_mut()
                && property.schema_type.is_some()
                && has_composition(property)
            {
                property.schema_type = None;
                changed += 1;
            }
        }
    }
    changed
}

/// Set `required` to every declared property name, recursively, for each
/// object schema reachable from `components.schemas`. Returns the number of
/// object schemas visited.
pub fn require_all_properties(spec: &mut OpenApiSpec) -> usize {
    component_schemas_mut(spec).map(require_recursive).sum()
}

fn require_recursive(schema: &mut Schema) -> usize {
    let mut visited = 0;
    if !schema.properties.is_empty() {
        schema.required = schema.properties.keys().cloned().collect();
        visited += 1;
    }
    for property in schema.properties.values_mut() {
        if let Some(property) = property.as_schema_mut() {
            visited += require_recursive(property);
        }
    }
    if let Some(items) = schema.items.as_deref_mut().and_then(SchemaOrRef::as_schema_mut) {
        visited += require_recursive(items);
    }
    visited
}

fn component_schemas_mut(spec: &mut OpenApiSpec) -> impl Iterator<Item = &mut Schema> {
    spec.components
        .iter_mut()
        .flat_map(|c| c.schemas.values_mut())
        .filter_map(SchemaOrRef::as_schema_mut)
}
