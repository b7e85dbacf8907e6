use tornapi_core::legacy::{ErrorCode, LegacySection};
use tornapi_core::parse::OpenApiSpec;
use tornapi_core::sections::extract_v2_sections;
use tornapi_core::transform::component_schemas;

use crate::emitters::components::emit_component_types;
use crate::emitters::errors::emit_error_enum;
use crate::emitters::sections::{emit_sections_v1, emit_sections_v2};
use crate::error::EmitError;
use crate::splice::splice;

/// The hand-written TypeScript client the generated declarations go into.
pub const CLIENT_TEMPLATE: &str = include_str!("../templates/client.ts");

/// Legacy schema inputs; absent when only the OpenAPI document is used.
#[derive(Debug, Clone, Copy)]
pub struct LegacyInput<'a> {
    pub sections: &'a [LegacySection],
    pub errors: &'a [ErrorCode],
}

/// Every generated declaration block, in splice order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTypes {
    pub components: String,
    pub sections_v1: String,
    pub sections_v2: String,
    pub error_enum: String,
}

impl GeneratedTypes {
    /// The text that replaces the template's marker region.
    pub fn block(&self) -> String {
        [
            &self.components,
            &self.sections_v1,
            &self.sections_v2,
            &self.error_enum,
        ]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

/// Emit all declarations for a normalized OpenAPI document and, optionally,
/// the legacy sections and error codes.
///
/// Without legacy input `SectionsV1Map` is empty and `TornApiError` has no
/// members, so the client template still type-checks.
pub fn generate_types(
    spec: &OpenApiSpec,
    legacy: Option<LegacyInput<'_>>,
) -> Result<GeneratedTypes, EmitError> {
    let schemas = component_schemas(spec)?;
    let components = emit_component_types(&schemas)?;

    let v2_sections = extract_v2_sections(spec);
    log::debug!("extracted {} v2 sections", v2_sections.len());
    let sections_v2 = emit_sections_v2(&v2_sections)?;

    let (sections_v1, error_enum) = match legacy {
        Some(input) => (
            emit_sections_v1(input.sections)?,
            emit_error_enum(input.errors)?,
        ),
        None => (emit_sections_v1(&[])?, emit_error_enum(&[])?),
    };

    Ok(GeneratedTypes {
        components,
        sections_v1,
        sections_v2,
        error_enum,
    })
}

/// Splice the generated declarations into the client template.
pub fn render_client(types: &GeneratedTypes) -> Result<String, EmitError> {
    Ok(splice(CLIENT_TEMPLATE, &types.block())?)
}
