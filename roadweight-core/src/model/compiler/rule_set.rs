use super::DecisionChain;
use crate::model::{area::AreaIndex, attribute::EdgeState};

/// the decision chains of one section, applied one after another
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RuleSet {
    chains: Vec<DecisionChain>,
}

impl RuleSet {
    pub fn new(chains: Vec<DecisionChain>) -> RuleSet {
        RuleSet { chains }
    }

    pub fn chains(&self) -> &[DecisionChain] {
        &self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn apply(&self, initial: f64, edge: &dyn EdgeState, reverse: bool, areas: &AreaIndex) -> f64 {
        self.chains
            .iter()
            .fold(initial, |value, chain| chain.apply(value, edge, reverse, areas))
    }

    /// an upper bound of [`RuleSet::apply`] over all edges whose initial
    /// value is at most `initial`. chains are bounded one at a time, which
    /// may overestimate but never underestimates.
    pub fn upper_bound(&self, initial: f64) -> f64 {
        self.chains
            .iter()
            .fold(initial, |bound, chain| chain.upper_bound(bound))
    }
}
