mod custom_model_compiler;
mod decision_chain;
mod operand;
mod rule_set;

pub use custom_model_compiler::CustomModelCompiler;
pub use decision_chain::{Clause, DecisionChain};
pub use operand::Operand;
pub use rule_set::RuleSet;

/// the two statement lists of a custom model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Speed,
    Priority,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Speed => write!(f, "speed"),
            Section::Priority => write!(f, "priority"),
        }
    }
}
