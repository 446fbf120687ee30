use super::{TurnCost, TurnCostProvider};
use crate::model::attribute::{EdgeId, NodeId};

/// every turn is free
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTurnCostProvider;

impl TurnCostProvider for NoTurnCostProvider {
    fn turn_cost(&self, _from_edge: EdgeId, _via_node: NodeId, _to_edge: EdgeId) -> TurnCost {
        TurnCost::FREE
    }

    fn has_turn_costs(&self) -> bool {
        false
    }
}
