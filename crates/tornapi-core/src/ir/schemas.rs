use super::types::NormalizedName;

/// One `components.schemas` entry, ready to be declared as a TypeScript type.
#[derive(Debug, Clone)]
pub struct IrSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub shape: IrShape,
}

/// How a component is declared: interfaces for plain objects, type aliases
/// for everything else.
#[derive(Debug, Clone)]
pub enum IrShape {
    /// `open` objects allow extra keys (`additionalProperties`).
    Object { fields: Vec<IrField>, open: bool },
    /// Literal union from `enum`.
    Enum(Vec<IrType>),
    /// `oneOf` / `anyOf`.
    Union(Vec<IrType>),
    Alias(IrType),
}

impl IrSchema {
    pub fn name(&self) -> &NormalizedName {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        match self.shape {
            IrShape::Object { .. } => "object",
            IrShape::Enum(_) => "enum",
            IrShape::Union(_) => "union",
            IrShape::Alias(_) => "alias",
        }
    }
}

/// An object member. Inline objects reuse it without descriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    pub original_name: String,
    pub field_type: IrType,
    pub required: bool,
    pub description: Option<String>,
}

impl IrField {
    pub fn new(name: impl Into<String>, field_type: IrType, required: bool) -> Self {
        Self {
            original_name: name.into(),
            field_type,
            required,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    String,
    StringLiteral(String),
    /// Kept as written in the document (`1`, `2.5`).
    NumberLiteral(String),
    Number,
    Integer,
    Boolean,
    Null,
    Array(Box<IrType>),
    Object(Vec<IrField>),
    /// `Record<string, T>`
    Map(Box<IrType>),
    /// A component, by its PascalCase name.
    Ref(String),
    Union(Vec<IrType>),
    Intersection(Vec<IrType>),
    Any,
}

impl IrType {
    /// Wrap in a `T | null` union unless the type already admits null.
    pub fn nullable(self) -> IrType {
        match self {
            IrType::Null => IrType::Null,
            IrType::Union(mut variants) => {
                if !variants.contains(&IrType::Null) {
                    variants.push(IrType::Null);
                }
                IrType::Union(variants)
            }
            other => IrType::Union(vec![other, IrType::Null]),
        }
    }
}
