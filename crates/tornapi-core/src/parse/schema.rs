use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// `type: "string"` or `type: ["string", "null"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// A property, item or component slot: either a `$ref` or an inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// Trailing segment of the `$ref` path, i.e. the component name.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => ref_path.rsplit('/').next(),
            SchemaOrRef::Schema(_) => None,
        }
    }

    pub fn as_schema_mut(&mut self) -> Option<&mut Schema> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema.as_mut()),
            SchemaOrRef::Ref { .. } => None,
        }
    }
}

/// The JSON Schema keywords that appear in the Torn document. Unknown
/// keywords (`format`, `examples`, numeric bounds) are ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,
    pub description: Option<String>,
    /// OpenAPI 3.0 spelling of `type: [.., "null"]`.
    pub nullable: Option<bool>,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", default)]
    pub all_of: Vec<SchemaOrRef>,
    #[serde(rename = "oneOf", default)]
    pub one_of: Vec<SchemaOrRef>,
    #[serde(rename = "anyOf", default)]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,
    #[serde(rename = "const")]
    pub const_value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}
