//! Models for the legacy (v1) per-section schema service.
//!
//! Field maps are parsed once into [`FieldKey`] / [`FieldDescriptor`]
//! variants, so later stages dispatch with a `match` instead of probing
//! JSON properties.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// `GET /sections`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SectionList {
    pub sections: Vec<String>,
}

/// `GET /schema/{section}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionSchema {
    pub selections: Vec<Selection>,
}

/// A legacy section's schema together with the section name it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacySection {
    pub name: String,
    pub schema: SectionSchema,
}

/// A queryable selection of a legacy section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Selection {
    pub name: String,
    pub schema: FieldMap,
    #[serde(default)]
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub id: IdRequirement,
}

impl Selection {
    pub fn requires_id(&self) -> bool {
        !self.id.optional
    }
}

/// Whether the path identifier may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IdRequirement {
    pub optional: bool,
}

impl Default for IdRequirement {
    fn default() -> Self {
        Self { optional: true }
    }
}

/// `GET /errors`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorList {
    pub errors: Vec<ErrorCode>,
}

/// A numeric error code with its human readable message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorCode {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub description: String,
}

/// The key of a field map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// An ordinary member name.
    Plain(String),
    /// A name that already carries its own quotes (`"foo"` or `'foo'`).
    Quoted(String),
    /// `<faction id>` or `[item_id]`: any string key maps to the value shape.
    /// Holds the text between the brackets.
    Placeholder(String),
}

impl FieldKey {
    pub fn parse(raw: &str) -> Self {
        let bracketed = |open: char, close: char| {
            raw.len() >= 2 && raw.starts_with(open) && raw.ends_with(close)
        };
        if bracketed('<', '>') || bracketed('[', ']') {
            FieldKey::Placeholder(raw[1..raw.len() - 1].to_string())
        } else if bracketed('"', '"') || bracketed('\'', '\'') {
            FieldKey::Quoted(raw.to_string())
        } else {
            FieldKey::Plain(raw.to_string())
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, FieldKey::Placeholder(_))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Plain(name) | FieldKey::Quoted(name) => f.write_str(name),
            FieldKey::Placeholder(name) => write!(f, "<{name}>"),
        }
    }
}

/// An ordered mapping of field keys to descriptors.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct FieldMap(pub IndexMap<FieldKey, FieldDescriptor>);

impl FieldMap {
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &FieldDescriptor)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<IndexMap<String, Value>> for FieldMap {
    type Error = ParseError;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(key, value)| {
                let descriptor = FieldDescriptor::from_value(&key, value)?;
                Ok((FieldKey::parse(&key), descriptor))
            })
            .collect::<Result<IndexMap<_, _>, ParseError>>()
            .map(FieldMap)
    }
}

/// What a single field of a legacy response looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDescriptor {
    /// A primitive type tag such as `Integer` or `Array of strings`.
    Primitive(String),
    /// A reference to one of the selection's structures.
    Structure(StructureId),
    /// An inline object.
    Nested(FieldMap),
}

impl FieldDescriptor {
    /// Classify a raw descriptor: a bare string or an object holding only a
    /// string `type` is a primitive, an object holding only `structure` is a
    /// reference, and any other object is a nested field map. `description`
    /// may accompany either marker.
    pub fn from_value(field: &str, value: Value) -> Result<Self, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidDescriptor {
            field: field.to_string(),
            reason: reason.to_string(),
        };
        match value {
            Value::String(tag) => Ok(FieldDescriptor::Primitive(tag)),
            Value::Object(mut object) => {
                let only = |marker: &str| {
                    object.contains_key(marker)
                        && object.keys().all(|k| k == marker || k == "description")
                };
                let (is_primitive, is_reference) = (only("type"), only("structure"));
                if is_primitive && let Some(Value::String(tag)) = object.get("type") {
                    return Ok(FieldDescriptor::Primitive(tag.clone()));
                }
                if is_reference && let Some(reference) = object.remove("structure") {
                    let id = match reference {
                        Value::Object(mut r) => r.remove("id"),
                        other => Some(other),
                    }
                    .ok_or_else(|| invalid("structure reference without id"))?;
                    return StructureId::from_value(&id)
                        .map(FieldDescriptor::Structure)
                        .ok_or_else(|| invalid("structure id must be a number or string"));
                }
                let nested: IndexMap<String, Value> = object.into_iter().collect();
                FieldMap::try_from(nested).map(FieldDescriptor::Nested)
            }
            _ => Err(invalid("expected a type tag or an object")),
        }
    }
}

/// Identifier of a structure; numeric and string ids compare by their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StructureId(pub String);

impl StructureId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(StructureId(n.to_string())),
            Value::String(s) => Some(StructureId(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reusable shape shared by the selections of a section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Structure {
    pub id: StructureId,
    pub kind: StructureKind,
    /// The entry as it appeared in the catalogue.
    pub raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructureKind {
    Enum(Vec<String>),
    Object(FieldMap),
    /// A kind the generator does not know how to render.
    Unsupported(String),
}

impl StructureKind {
    pub fn name(&self) -> &str {
        match self {
            StructureKind::Enum(_) => "enum",
            StructureKind::Object(_) => "object",
            StructureKind::Unsupported(kind) => kind,
        }
    }
}

impl TryFrom<Value> for Structure {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw = value.clone();
        let Value::Object(mut object) = value else {
            return Err(ParseError::InvalidStructure("expected an object".into()));
        };
        let id = object
            .get("id")
            .and_then(StructureId::from_value)
            .ok_or_else(|| ParseError::InvalidStructure("missing id".into()))?;
        let kind = match object.get("type").and_then(Value::as_str) {
            Some(t) if t.eq_ignore_ascii_case("enum") => {
                let values = object
                    .remove("values")
                    .map(serde_json::from_value::<Vec<Value>>)
                    .transpose()?
                    .unwrap_or_default();
                StructureKind::Enum(
                    values
                        .into_iter()
                        .map(|v| match v {
                            Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .collect(),
                )
            }
            Some(t) if t.eq_ignore_ascii_case("object") => {
                let schema: IndexMap<String, Value> = object
                    .remove("schema")
                    .map(serde_json::from_value)
                    .transpose()?
                    .unwrap_or_default();
                StructureKind::Object(FieldMap::try_from(schema)?)
            }
            Some(other) => StructureKind::Unsupported(other.to_string()),
            None => StructureKind::Unsupported("<missing>".to_string()),
        };
        Ok(Structure { id, kind, raw })
    }
}

/// Compact JSON of the catalogue entry.
impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
