mod custom_model;
mod speed_unit;
mod statement;

pub use custom_model::CustomModel;
pub use speed_unit::SpeedUnit;
pub use statement::{Keyword, Op, OperandValue, Statement};
