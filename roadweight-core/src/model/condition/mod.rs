mod compare_op;
mod condition;
mod expression;
mod parser;

pub use compare_op::CompareOp;
pub use condition::Condition;
pub(crate) use condition::parse_number;
pub use expression::Expression;
pub use parser::parse_condition;
