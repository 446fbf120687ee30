use super::{parse_condition, CompareOp, Expression};
use crate::model::{
    area::{AreaId, AreaIndex},
    attribute::{AttributeKind, AttributeRegistry, BooleanHandle, DecimalHandle, EdgeState, EnumHandle},
    CustomModelError,
};

/// a condition with every attribute and area resolved and type checked.
/// evaluation is a walk over this tree and never fails.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Constant(bool),
    Boolean {
        handle: BooleanHandle,
        expected: bool,
    },
    Enum {
        handle: EnumHandle,
        ordinal: u32,
        negate: bool,
    },
    Decimal {
        handle: DecimalHandle,
        op: CompareOp,
        value: f64,
    },
    InArea(AreaId),
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// parses and type checks a condition string
    pub fn compile(
        condition: &str,
        registry: &dyn AttributeRegistry,
        areas: &AreaIndex,
    ) -> Result<Condition, CustomModelError> {
        let expression =
            parse_condition(condition).map_err(|message| CustomModelError::ConditionParse {
                condition: condition.to_string(),
                message,
            })?;
        Condition::build(&expression, registry, areas)
    }

    pub fn build(
        expression: &Expression,
        registry: &dyn AttributeRegistry,
        areas: &AreaIndex,
    ) -> Result<Condition, CustomModelError> {
        match expression {
            Expression::Constant(b) => Ok(Condition::Constant(*b)),
            Expression::Variable(name) => build_variable(name, registry, areas),
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => build_comparison(attribute, *op, literal, registry),
            Expression::Not(inner) => Ok(Condition::Not(Box::new(Condition::build(
                inner, registry, areas,
            )?))),
            Expression::And(lhs, rhs) => Ok(Condition::And(
                Box::new(Condition::build(lhs, registry, areas)?),
                Box::new(Condition::build(rhs, registry, areas)?),
            )),
            Expression::Or(lhs, rhs) => Ok(Condition::Or(
                Box::new(Condition::build(lhs, registry, areas)?),
                Box::new(Condition::build(rhs, registry, areas)?),
            )),
        }
    }

    pub fn evaluate(&self, edge: &dyn EdgeState, reverse: bool, areas: &AreaIndex) -> bool {
        match self {
            Condition::Constant(b) => *b,
            Condition::Boolean { handle, expected } => handle.get(edge, reverse) == *expected,
            Condition::Enum {
                handle,
                ordinal,
                negate,
            } => (handle.get(edge, reverse) == *ordinal) != *negate,
            Condition::Decimal { handle, op, value } => op.compare(handle.get(edge, reverse), *value),
            Condition::InArea(area) => areas.contains_all(*area, edge.points()),
            Condition::Not(inner) => !inner.evaluate(edge, reverse, areas),
            Condition::And(lhs, rhs) => {
                lhs.evaluate(edge, reverse, areas) && rhs.evaluate(edge, reverse, areas)
            }
            Condition::Or(lhs, rhs) => {
                lhs.evaluate(edge, reverse, areas) || rhs.evaluate(edge, reverse, areas)
            }
        }
    }

    /// the value of the condition if it is the same for every edge, which
    /// is only decided from constants. `true && toll` is unknown while
    /// `false && toll` is false.
    pub fn constant_value(&self) -> Option<bool> {
        match self {
            Condition::Constant(b) => Some(*b),
            Condition::Not(inner) => inner.constant_value().map(|b| !b),
            Condition::And(lhs, rhs) => match (lhs.constant_value(), rhs.constant_value()) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Condition::Or(lhs, rhs) => match (lhs.constant_value(), rhs.constant_value()) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

fn build_variable(
    name: &str,
    registry: &dyn AttributeRegistry,
    areas: &AreaIndex,
) -> Result<Condition, CustomModelError> {
    match registry.attribute_kind(name) {
        Some(AttributeKind::Boolean) => {
            let handle = registry
                .resolve_boolean(name)
                .ok_or_else(|| CustomModelError::UnknownAttribute(name.to_string()))?;
            Ok(Condition::Boolean {
                handle,
                expected: true,
            })
        }
        Some(kind) => Err(CustomModelError::TypeMismatch {
            attribute: name.to_string(),
            kind,
            message: String::from("cannot be used as a condition without a comparison"),
        }),
        None => match name.strip_prefix("in_") {
            Some(area) => areas
                .area_id(area)
                .map(Condition::InArea)
                .ok_or_else(|| CustomModelError::UnknownArea(area.to_string())),
            None => Err(CustomModelError::UnknownAttribute(name.to_string())),
        },
    }
}

fn build_comparison(
    attribute: &str,
    op: CompareOp,
    literal: &str,
    registry: &dyn AttributeRegistry,
) -> Result<Condition, CustomModelError> {
    let kind = registry
        .attribute_kind(attribute)
        .ok_or_else(|| CustomModelError::UnknownAttribute(attribute.to_string()))?;
    let unknown = || CustomModelError::UnknownAttribute(attribute.to_string());
    if kind != AttributeKind::Decimal && !op.is_equality() {
        return Err(CustomModelError::TypeMismatch {
            attribute: attribute.to_string(),
            kind,
            message: format!("does not support '{op}', only '==' and '!='"),
        });
    }
    let invalid = |message: String| CustomModelError::InvalidLiteral {
        literal: literal.to_string(),
        message,
    };
    match kind {
        AttributeKind::Boolean => {
            let handle = registry.resolve_boolean(attribute).ok_or_else(unknown)?;
            let value = match literal {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(invalid(format!(
                        "boolean attribute '{attribute}' can only be compared to true or false"
                    )))
                }
            };
            Ok(Condition::Boolean {
                handle,
                expected: value != (op == CompareOp::Ne),
            })
        }
        AttributeKind::Enum => {
            let resolved = registry.resolve_enum(attribute).ok_or_else(unknown)?;
            let ordinal = resolved.ordinal_of(literal).ok_or_else(|| {
                invalid(format!(
                    "not a value of '{attribute}', expected one of [{}]",
                    resolved.values.join(", ")
                ))
            })?;
            Ok(Condition::Enum {
                handle: resolved.handle,
                ordinal,
                negate: op == CompareOp::Ne,
            })
        }
        AttributeKind::Decimal => {
            let resolved = registry.resolve_decimal(attribute).ok_or_else(unknown)?;
            let value = parse_number(literal).map_err(invalid)?;
            Ok(Condition::Decimal {
                handle: resolved.handle,
                op,
                value,
            })
        }
    }
}

/// reads a finite number. text like `inf` or `NaN`, which rust would parse,
/// is rejected by requiring a leading digit, sign or dot.
pub(crate) fn parse_number(text: &str) -> Result<f64, String> {
    let numeric_start = text
        .trim_start_matches(['-', '+'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !numeric_start {
        return Err(String::from("expected a number"));
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(format!("number must be finite, found {value}")),
        Err(e) => Err(format!("expected a number: {e}")),
    }
}
