use std::collections::HashSet;

use minijinja::context;
use serde::Serialize;
use tornapi_core::legacy::ErrorCode;

use crate::error::EmitError;

use super::template_env;

/// Words that carry no meaning in an error name.
const STOPLIST: [&str; 11] = [
    "IS", "IN", "THE", "OF", "THIS", "IDENTITY", "PLEASE", "TRY", "DUE", "OWNER", "AGAIN",
];

const MAX_NAME_WORDS: usize = 5;

/// One `TornApiError` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMember {
    pub name: String,
    pub code: i64,
}

/// Derive a SCREAMING_SNAKE member name from an error message.
///
/// `"Key owner is in federal jail"` → `KEY_FEDERAL_JAIL`
pub fn error_member_name(message: &str) -> String {
    let cleaned: String = message
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| !STOPLIST.contains(word))
        .take(MAX_NAME_WORDS)
        .collect::<Vec<_>>()
        .join("_")
}

/// Pair every error code with its derived name, in fetched order.
///
/// Names that reduce to nothing become `CODE_<code>`, names starting with a
/// digit get a leading `_`, and a name already taken by an earlier code is
/// suffixed with `_<code>`.
pub fn error_members(errors: &[ErrorCode]) -> Vec<ErrorMember> {
    let mut taken = HashSet::new();
    errors
        .iter()
        .map(|error| {
            let mut name = error_member_name(&error.message);
            if name.is_empty() {
                name = format!("CODE_{}", error.code);
            } else if name.starts_with(|c: char| c.is_ascii_digit()) {
                name.insert(0, '_');
            }
            if !taken.insert(name.clone()) {
                log::warn!(
                    "error code {} collides with an earlier `{name}`; suffixing with its code",
                    error.code
                );
                name = format!("{name}_{}", error.code);
                taken.insert(name.clone());
            }
            ErrorMember {
                name,
                code: error.code,
            }
        })
        .collect()
}

/// Emit the `TornApiError` enum.
pub fn emit_error_enum(errors: &[ErrorCode]) -> Result<String, EmitError> {
    let env = template_env()?;
    let tmpl = env.get_template("errors.ts.j2")?;
    Ok(tmpl.render(context! { members => error_members(errors) })?)
}
