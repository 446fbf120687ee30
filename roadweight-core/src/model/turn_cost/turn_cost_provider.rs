use crate::model::attribute::{EdgeId, NodeId};

/// cost of moving from one edge onto the next at their shared node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnCost {
    /// added to the path weight, infinite for forbidden turns
    pub weight: f64,
    pub millis: i64,
}

impl TurnCost {
    pub const FREE: TurnCost = TurnCost {
        weight: 0.0,
        millis: 0,
    };

    pub const FORBIDDEN: TurnCost = TurnCost {
        weight: f64::INFINITY,
        millis: 0,
    };
}

/// source of turn costs for a weighting. shared between search threads.
pub trait TurnCostProvider: Send + Sync {
    fn turn_cost(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> TurnCost;

    /// false if this provider never charges for turns, which lets a search
    /// skip turn handling entirely
    fn has_turn_costs(&self) -> bool {
        true
    }
}
