//! Errors raised while building or loading a program.

/// Error building a [`crate::Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("unknown value `{name}` in function `{func}`")]
    UnknownValue { func: String, name: String },

    #[error("unknown block `{label}` in function `{func}`")]
    UnknownBlock { func: String, label: String },

    #[error("unknown global or function `@{0}`")]
    UnknownSymbol(String),

    #[error("duplicate name `{0}`")]
    DuplicateName(String),

    #[error("malformed operand `{0}`")]
    MalformedOperand(String),

    #[error("malformed constant `{0}`")]
    MalformedConstant(String),

    #[error("integer constants wider than 128 bits are not supported (got i{0})")]
    IntegerTooWide(u32),

    #[error("expected an integer type, got `{0}`")]
    NotAnIntegerType(String),

    #[error("expected a function type, got `{0}`")]
    NotAFunctionType(String),

    #[error("`{0}` is not a named struct")]
    NotANamedStruct(String),

    #[error("struct `{0}` contains itself by value")]
    RecursiveStruct(String),

    #[error("type `{ty}` cannot be a field of struct `{name}`")]
    InvalidFieldType { name: String, ty: String },

    #[error("`%{name}` in function `{func}` names an instruction that produces no value")]
    NamedVoidValue { func: String, name: String },

    #[error("`{op}` requires the `{attr}` attribute")]
    MissingAttribute { op: String, attr: &'static str },

    #[error("unknown comparison predicate `{0}`")]
    UnknownPredicate(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
