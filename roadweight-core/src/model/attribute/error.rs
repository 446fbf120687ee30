use super::AttributeKind;

#[derive(thiserror::Error, Debug)]
pub enum AttributeError {
    #[error("attribute '{0}' is declared more than once")]
    Duplicate(String),
    #[error("attribute '{0}' is not registered")]
    Unknown(String),
    #[error("attribute '{name}' is {found}, not {expected}")]
    KindMismatch {
        name: String,
        expected: AttributeKind,
        found: AttributeKind,
    },
    #[error("invalid declaration for attribute '{name}': {message}")]
    InvalidDeclaration { name: String, message: String },
    #[error("invalid value for attribute '{name}': {message}")]
    InvalidValue { name: String, message: String },
}
