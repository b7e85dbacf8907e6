use indexmap::IndexSet;
use minijinja::context;
use tornapi_core::ir::SectionV2;
use tornapi_core::legacy::LegacySection;
use tornapi_core::transform::name_normalizer::{normalize_name, section_type_name};

use crate::error::EmitError;
use crate::legacy_types::synthesize;
use crate::type_mapper::string_literal;

use super::template_env;

pub const SECTIONS_V1_MAP: &str = "SectionsV1Map";
pub const SECTIONS_V2_MAP: &str = "SectionsV2Map";

/// Emit one `<Section>V1` interface per legacy section and the
/// `SectionsV1Map` that indexes them.
pub fn emit_sections_v1(sections: &[LegacySection]) -> Result<String, EmitError> {
    let mut section_ctxs = Vec::with_capacity(sections.len());
    for section in sections {
        let mut selections = Vec::with_capacity(section.schema.selections.len());
        for selection in &section.schema.selections {
            let response = synthesize(&selection.schema, &selection.structures).map_err(
                |source| EmitError::Synthesis {
                    section: section.name.clone(),
                    selection: selection.name.clone(),
                    source,
                },
            )?;
            selections.push(context! {
                key => string_literal(&selection.name),
                response => response,
                params => params_union(selection.params.iter().map(String::as_str)),
                required_id => Some(selection.requires_id()),
            });
        }
        section_ctxs.push(context! {
            key => string_literal(&section.name),
            interface => section_type_name(&section.name, "V1"),
            selections => selections,
        });
    }
    render_sections(SECTIONS_V1_MAP, section_ctxs)
}

/// Emit one `<Section>V2` interface per OpenAPI section and the
/// `SectionsV2Map` that indexes them.
pub fn emit_sections_v2(sections: &[SectionV2]) -> Result<String, EmitError> {
    let section_ctxs = sections
        .iter()
        .map(|section| {
            let selections: Vec<_> = section
                .selections
                .iter()
                .map(|(name, selection)| {
                    let response = selection
                        .response
                        .as_deref()
                        .map(|name| normalize_name(name).identifier)
                        .unwrap_or_else(|| "null".to_string());
                    context! {
                        key => string_literal(name),
                        response => response,
                        params => params_union(selection.params.iter().map(String::as_str)),
                        required_id => None::<bool>,
                    }
                })
                .collect();
            context! {
                key => string_literal(&section.name),
                interface => section_type_name(&section.name, "V2"),
                selections => selections,
            }
        })
        .collect();
    render_sections(SECTIONS_V2_MAP, section_ctxs)
}

fn render_sections(map_name: &str, sections: Vec<minijinja::Value>) -> Result<String, EmitError> {
    let env = template_env()?;
    let tmpl = env.get_template("sections.ts.j2")?;
    Ok(tmpl.render(context! {
        map_name => map_name,
        sections => sections,
    })?)
}

/// `"a" | "b"` over the distinct names, or `never` when there are none.
fn params_union<'a>(params: impl Iterator<Item = &'a str>) -> String {
    let unique: IndexSet<&str> = params.collect();
    if unique.is_empty() {
        return "never".to_string();
    }
    unique
        .into_iter()
        .map(string_literal)
        .collect::<Vec<_>>()
        .join(" | ")
}
