use minijinja::context;
use tornapi_core::ir::{IrField, IrSchema, IrShape};

use crate::error::EmitError;
use crate::type_mapper::{TsType, property_key};

use super::template_env;

/// Emit one TypeScript declaration per component schema, in order.
pub fn emit_component_types(schemas: &[IrSchema]) -> Result<String, EmitError> {
    let env = template_env()?;
    let tmpl = env.get_template("components.ts.j2")?;
    let schemas: Vec<_> = schemas.iter().map(schema_to_ctx).collect();
    Ok(tmpl.render(context! { schemas => schemas })?)
}

fn schema_to_ctx(schema: &IrSchema) -> minijinja::Value {
    let name = &schema.name.identifier;
    let description = &schema.description;
    match &schema.shape {
        // Typed extra keys would clash with the declared members, so any
        // additionalProperties collapse to an `unknown` index signature.
        IrShape::Object { fields, open } => context! {
            kind => "object",
            name => name,
            description => description,
            fields => fields.iter().map(field_to_ctx).collect::<Vec<_>>(),
            open => open,
        },
        IrShape::Enum(variants) | IrShape::Union(variants) => {
            let target = if variants.is_empty() {
                "never".to_string()
            } else {
                TsType::union(variants).to_string()
            };
            context! { kind => "alias", name => name, description => description, target => target }
        }
        IrShape::Alias(target) => context! {
            kind => "alias",
            name => name,
            description => description,
            target => TsType(target).to_string(),
        },
    }
}

fn field_to_ctx(field: &IrField) -> minijinja::Value {
    context! {
        key => property_key(&field.original_name),
        type => TsType(&field.field_type).to_string(),
        required => field.required,
        description => field.description,
    }
}
