use heck::ToPascalCase;

use crate::ir::NormalizedName;

/// Pair a component or section name with the TypeScript identifier it is
/// declared under. Names that are already identifiers are kept as written.
pub fn normalize_name(name: &str) -> NormalizedName {
    let identifier = if is_identifier(name) {
        name.to_string()
    } else {
        sanitize_identifier(name)
    };
    NormalizedName {
        original: name.to_string(),
        identifier,
    }
}

/// Upper-case the first character of a section name and append `suffix`
/// (`user` + `V1` → `UserV1`). Names that are not plain identifiers fall
/// back to their sanitized form.
pub fn section_type_name(section: &str, suffix: &str) -> String {
    if !is_identifier(section) {
        return format!("{}{suffix}", sanitize_identifier(section));
    }
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => format!("{}{}{suffix}", first.to_ascii_uppercase(), chars.as_str()),
        None => suffix.to_string(),
    }
}

/// ASCII letters, digits, `_` and `$`, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// PascalCase the alphanumeric runs of `name`. A leading digit gets a `_`
/// prefix; an empty result becomes `Unnamed`.
fn sanitize_identifier(name: &str) -> String {
    let words = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let pascal = words.to_pascal_case();

    match pascal.chars().next() {
        None => "Unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{pascal}"),
        Some(_) => pascal,
    }
}
