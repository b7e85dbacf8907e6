pub mod name_normalizer;
pub mod schema_resolver;

use std::collections::HashMap;

use crate::error::TransformError;
use crate::ir::IrSchema;
use crate::parse::OpenApiSpec;

use schema_resolver::schema_or_ref_to_ir_schema;

/// Convert every component schema of a (normalized) document into the IR,
/// in declaration order. Two names that sanitize to the same identifier are
/// an error.
pub fn component_schemas(spec: &OpenApiSpec) -> Result<Vec<IrSchema>, TransformError> {
    let Some(ref components) = spec.components else {
        return Ok(Vec::new());
    };
    let schemas = components
        .schemas
        .iter()
        .map(|(name, schema_or_ref)| schema_or_ref_to_ir_schema(name, schema_or_ref))
        .collect::<Result<Vec<_>, _>>()?;

    let mut declared: HashMap<&str, &str> = HashMap::with_capacity(schemas.len());
    for schema in &schemas {
        let name = schema.name();
        if let Some(first) = declared.insert(&name.identifier, &name.original) {
            return Err(TransformError::NameCollision {
                identifier: name.identifier.clone(),
                first: first.to_string(),
                second: name.original.clone(),
            });
        }
    }
    log::debug!("converted {} component schemas", schemas.len());
    Ok(schemas)
}
