use crate::model::{
    attribute::{AttributeKind, AttributeRegistry, DecimalHandle, EdgeState},
    condition::parse_number,
    custom_model::OperandValue,
    CustomModelError,
};

/// right hand side of a statement, resolved against the registry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Literal(f64),
    /// value read from the edge, bounded by the attribute's maximum
    Attribute { handle: DecimalHandle, max_value: f64 },
}

impl Operand {
    /// resolves a statement value. numbers must be finite and not negative.
    /// text is read as an attribute name if the registry knows it, and as a
    /// number otherwise.
    pub fn resolve(
        value: &OperandValue,
        registry: &dyn AttributeRegistry,
    ) -> Result<Operand, CustomModelError> {
        match value {
            OperandValue::Number(n) => literal(*n, &n.to_string()),
            OperandValue::Text(text) => {
                let text = text.trim();
                match registry.attribute_kind(text) {
                    Some(AttributeKind::Decimal) => resolve_attribute(text, registry),
                    Some(kind) => Err(CustomModelError::TypeMismatch {
                        attribute: text.to_string(),
                        kind,
                        message: String::from("cannot be used as a value, only decimal attributes"),
                    }),
                    None if text.starts_with(|c: char| c.is_alphabetic() || c == '_') => {
                        Err(CustomModelError::UnknownAttribute(text.to_string()))
                    }
                    None => {
                        let n = parse_number(text).map_err(|message| {
                            CustomModelError::InvalidLiteral {
                                literal: text.to_string(),
                                message,
                            }
                        })?;
                        literal(n, text)
                    }
                }
            }
        }
    }

    /// value for this edge and direction. attribute values below zero are
    /// read as zero.
    pub fn value(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        match self {
            Operand::Literal(v) => *v,
            Operand::Attribute { handle, .. } => handle.get(edge, reverse).max(0.0),
        }
    }

    /// largest value this operand can take on any edge
    pub fn upper_bound(&self) -> f64 {
        match self {
            Operand::Literal(v) => *v,
            Operand::Attribute { max_value, .. } => max_value.max(0.0),
        }
    }
}

fn literal(value: f64, text: &str) -> Result<Operand, CustomModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CustomModelError::InvalidLiteral {
            literal: text.to_string(),
            message: String::from("value must be a finite number >= 0"),
        });
    }
    Ok(Operand::Literal(value))
}

fn resolve_attribute(
    name: &str,
    registry: &dyn AttributeRegistry,
) -> Result<Operand, CustomModelError> {
    let resolved = registry
        .resolve_decimal(name)
        .ok_or_else(|| CustomModelError::UnknownAttribute(name.to_string()))?;
    if !resolved.max_value.is_finite() {
        return Err(CustomModelError::UnboundedOperand {
            attribute: name.to_string(),
            max: resolved.max_value,
        });
    }
    Ok(Operand::Attribute {
        handle: resolved.handle,
        max_value: resolved.max_value,
    })
}
