use std::fmt::{self, Display, Formatter, Write};

use tornapi_core::ir::{IrField, IrType};

/// Render a string as a double-quoted TypeScript string literal.
pub fn string_literal(value: &str) -> String {
    // A JSON string is a valid TypeScript string literal
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// Render an object member name, quoting it unless it is a plain identifier.
pub fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if starts_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// TypeScript rendering of an IR type: `TsType(&ty).to_string()`.
pub struct TsType<'a>(pub &'a IrType);

impl<'a> TsType<'a> {
    /// `A | B | C`, without wrapping the members.
    pub fn union(variants: &'a [IrType]) -> impl Display + 'a {
        Joined {
            parts: variants,
            separator: " | ",
            parenthesize: |_| false,
        }
    }
}

impl Display for TsType<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            IrType::String => f.write_str("string"),
            IrType::Number | IrType::Integer => f.write_str("number"),
            IrType::Boolean => f.write_str("boolean"),
            IrType::Null => f.write_str("null"),
            IrType::Any => f.write_str("unknown"),
            IrType::StringLiteral(s) => f.write_str(&string_literal(s)),
            IrType::NumberLiteral(n) | IrType::Ref(n) => f.write_str(n),
            IrType::Array(inner) if is_compound(inner) => write!(f, "({})[]", TsType(inner)),
            IrType::Array(inner) => write!(f, "{}[]", TsType(inner)),
            IrType::Map(value) => write!(f, "Record<string, {}>", TsType(value)),
            IrType::Object(fields) if fields.is_empty() => f.write_str("Record<string, unknown>"),
            IrType::Object(fields) => {
                f.write_str("{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write_member(f, field)?;
                }
                f.write_str(" }")
            }
            IrType::Union(variants) => TsType::union(variants).fmt(f),
            IrType::Intersection(parts) => Joined {
                parts,
                separator: " & ",
                parenthesize: |p| matches!(p, IrType::Union(_)),
            }
            .fmt(f),
        }
    }
}

fn is_compound(ty: &IrType) -> bool {
    matches!(ty, IrType::Union(_) | IrType::Intersection(_))
}

fn write_member(f: &mut Formatter<'_>, field: &IrField) -> fmt::Result {
    f.write_str(&property_key(&field.original_name))?;
    if !field.required {
        f.write_char('?')?;
    }
    write!(f, ": {}", TsType(&field.field_type))
}

struct Joined<'a> {
    parts: &'a [IrType],
    separator: &'static str,
    parenthesize: fn(&IrType) -> bool,
}

impl Display for Joined<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            if (self.parenthesize)(part) {
                write!(f, "({})", TsType(part))?;
            } else {
                TsType(part).fmt(f)?;
            }
        }
        Ok(())
    }
}
