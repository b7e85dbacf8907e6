use thiserror::Error;

/// Fatal problems turning a legacy field map into a type. Each one means the
/// upstream schema changed in a way the generator does not understand.
#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    #[error("unknown primitive type `{tag}` for field `{field}`")]
    UnknownPrimitive { tag: String, field: String },

    #[error("field `{field}` references unknown structure #{id}; declared structures: [{}]", .structures.join(", "))]
    UnresolvedStructure {
        field: String,
        id: String,
        structures: Vec<String>,
    },

    #[error("field `{field}` references structure of unsupported kind `{kind}`")]
    UnsupportedStructure { field: String, kind: String },

    #[error("structure #{id} references itself through field `{field}`")]
    RecursiveStructure { field: String, id: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("template is missing the `{0}` marker")]
    MissingMarker(&'static str),

    #[error("template end marker precedes the start marker")]
    MarkersOutOfOrder,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("in section `{section}`, selection `{selection}`: {source}")]
    Synthesis {
        section: String,
        selection: String,
        #[source]
        source: SynthesisError,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("splice failed: {0}")]
    Splice(#[from] SpliceError),

    #[error("component conversion failed: {0}")]
    Transform(#[from] tornapi_core::error::TransformError),
}
