use super::CompareOp;

/// syntax tree of a condition before attribute names are resolved.
///
/// literals stay text here. whether `PRIMARY`, `true` or `3.5` is a valid
/// right hand side depends on the kind of the attribute, which is only known
/// once the expression is checked against a registry.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Constant(bool),
    /// a bare name: a boolean attribute or an `in_<area>` predicate
    Variable(String),
    Comparison {
        attribute: String,
        op: CompareOp,
        literal: String,
    },
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Constant(b) => write!(f, "{b}"),
            Expression::Variable(name) => write!(f, "{name}"),
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => write!(f, "{attribute} {op} {literal}"),
            Expression::Not(inner) => write!(f, "!({inner})"),
            Expression::And(lhs, rhs) => write!(f, "({lhs} && {rhs})"),
            Expression::Or(lhs, rhs) => write!(f, "({lhs} || {rhs})"),
        }
    }
}
