use crate::model::{attribute::AttributeKind, compiler::Section};

/// configuration errors raised while compiling a custom model. any of these
/// makes the profile unusable; there is no fallback to a default model.
#[derive(thiserror::Error, Debug)]
pub enum CustomModelError {
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("unknown area '{0}', areas must be declared in the custom model")]
    UnknownArea(String),
    #[error("{kind} attribute '{attribute}' {message}")]
    TypeMismatch {
        attribute: String,
        kind: AttributeKind,
        message: String,
    },
    #[error("invalid literal '{literal}': {message}")]
    InvalidLiteral { literal: String, message: String },
    #[error("failed to parse condition '{condition}': {message}")]
    ConditionParse { condition: String, message: String },
    #[error("malformed decision chain: {0}")]
    MalformedChain(String),
    #[error("operand attribute '{attribute}' has no finite maximum (found {max})")]
    UnboundedOperand { attribute: String, max: f64 },
    #[error("invalid {parameter}: {message}")]
    InvalidParameter { parameter: String, message: String },
    #[error("invalid area '{id}': {message}")]
    InvalidArea { id: String, message: String },
    #[error("{section} statement {index} ({statement}): {source}")]
    Statement {
        section: Section,
        index: usize,
        statement: String,
        source: Box<CustomModelError>,
    },
}
