use super::Operand;
use crate::model::{
    area::AreaIndex, attribute::EdgeState, condition::Condition, custom_model::Op,
};

/// a compiled statement: condition, operation and operand
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    pub condition: Condition,
    pub op: Op,
    pub operand: Operand,
}

/// an `if` with its `else_if` and `else` clauses. at most one clause of a
/// chain applies to an edge: the first whose condition holds.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DecisionChain {
    clauses: Vec<Clause>,
}

impl DecisionChain {
    pub fn new(first: Clause) -> DecisionChain {
        DecisionChain {
            clauses: vec![first],
        }
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// applies the first matching clause to the value, or returns it
    /// unchanged if no clause matches.
    pub fn apply(&self, value: f64, edge: &dyn EdgeState, reverse: bool, areas: &AreaIndex) -> f64 {
        self.clauses
            .iter()
            .find(|clause| clause.condition.evaluate(edge, reverse, areas))
            .map(|clause| clause.op.apply(value, clause.operand.value(edge, reverse)))
            .unwrap_or(value)
    }

    /// largest value the chain can produce when the incoming value is at
    /// most `bound`.
    ///
    /// every clause that some edge could reach contributes its result for
    /// the operand's maximum. a clause that is always false is unreachable.
    /// a clause that is always true ends the chain, so neither later clauses
    /// nor the unchanged value can be reached after it.
    pub fn upper_bound(&self, bound: f64) -> f64 {
        let mut result = f64::NEG_INFINITY;
        for clause in self.clauses.iter() {
            let candidate = clause.op.apply(bound, clause.operand.upper_bound());
            match clause.condition.constant_value() {
                Some(false) => {
                    log::debug!("clause {clause:?} never matches, skipped for bound");
                }
                Some(true) => return result.max(candidate),
                None => result = result.max(candidate),
            }
        }
        result.max(bound)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::attribute::{AttributeConfig, AttributeRegistry, EdgeId, InMemoryRegistry, NodeId};

    fn guarded(registry: &InMemoryRegistry, op: Op, value: f64) -> Clause {
        let condition = Condition::compile("toll", registry, &AreaIndex::empty())
            .expect("test invariant failed: condition should compile");
        Clause {
            condition,
            op,
            operand: Operand::Literal(value),
        }
    }

    fn always(value: bool, op: Op, operand: f64) -> Clause {
        Clause {
            condition: Condition::Constant(value),
            op,
            operand: Operand::Literal(operand),
        }
    }

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new(vec![
            AttributeConfig::boolean("toll", false),
            AttributeConfig::decimal("max_speed", Some(120.0), false),
        ])
        .expect("test invariant failed: registry could not be built")
    }

    #[test]
    fn test_first_match_wins() {
        let registry = registry();
        let mut chain = DecisionChain::new(guarded(&registry, Op::Multiply, 0.5));
        chain.push(always(true, Op::Multiply, 0.1));
        let mut edge = registry.new_edge(EdgeId(0), NodeId(0), NodeId(1), 10.0);
        let areas = AreaIndex::empty();
        assert!((chain.apply(1.0, &edge, false, &areas) - 0.1).abs() < 1e-12);
        registry.set_bool(&mut edge, "toll", true, true).expect("set toll");
        assert_eq!(chain.apply(1.0, &edge, false, &areas), 0.5);
    }

    #[test]
    fn test_no_match_is_identity() {
        let registry = registry();
        let chain = DecisionChain::new(guarded(&registry, Op::Limit, 10.0));
        let edge = registry.new_edge(EdgeId(0), NodeId(0), NodeId(1), 10.0);
        assert_eq!(chain.apply(42.0, &edge, false, &AreaIndex::empty()), 42.0);
    }

    #[test]
    fn test_attribute_operand() {
        let registry = registry();
        let max_speed = registry
            .resolve_decimal("max_speed")
            .expect("max_speed should resolve");
        let chain = DecisionChain::new(Clause {
            condition: Condition::Constant(true),
            op: Op::Limit,
            operand: Operand::Attribute {
                handle: max_speed.handle,
                max_value: max_speed.max_value,
            },
        });
        let mut edge = registry.new_edge(EdgeId(0), NodeId(0), NodeId(1), 10.0);
        registry
            .set_decimal(&mut edge, "max_speed", 30.0, 30.0)
            .expect("set max speed");
        assert_eq!(chain.apply(50.0, &edge, false, &AreaIndex::empty()), 30.0);
        assert_eq!(chain.upper_bound(155.0), 120.0);
    }

    #[test]
    fn test_upper_bound() {
        let registry = registry();
        // guarded clauses may raise the bound but not lower it
        let chain = DecisionChain::new(guarded(&registry, Op::Multiply, 3.0));
        assert_eq!(chain.upper_bound(1.0), 3.0);
        let chain = DecisionChain::new(guarded(&registry, Op::Multiply, 0.5));
        assert_eq!(chain.upper_bound(1.0), 1.0);
        // an unconditional clause closes the chain
        let chain = DecisionChain::new(always(true, Op::Multiply, 0.5));
        assert_eq!(chain.upper_bound(1.0), 0.5);
        let chain = DecisionChain::new(always(true, Op::Limit, 2.0));
        assert_eq!(chain.upper_bound(1.0), 1.0);
        // if ... else
        let mut chain = DecisionChain::new(guarded(&registry, Op::Multiply, 0.7));
        chain.push(always(true, Op::Limit, 30.0));
        assert!((chain.upper_bound(155.0) - 155.0 * 0.7).abs() < 1e-9);
        // clauses that never match are ignored
        let mut chain = DecisionChain::new(always(false, Op::Multiply, 5.0));
        chain.push(always(true, Op::Multiply, 0.5));
        assert_eq!(chain.upper_bound(1.0), 0.5);
    }
}
