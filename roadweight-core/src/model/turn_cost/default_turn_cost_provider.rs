use super::{TurnCost, TurnCostProvider, TurnCostsConfig, TurnRestrictionLookup};
use crate::model::{
    attribute::{EdgeId, NodeId},
    CustomModelError,
};

/// turn costs from stored restrictions plus a fixed price for U-turns.
///
/// a restricted turn is forbidden. turning from an edge back onto itself
/// costs the configured U-turn seconds as weight, or is forbidden if no
/// U-turn cost is configured. all other turns are free. turns never add
/// travel time.
pub struct DefaultTurnCostProvider<R: TurnRestrictionLookup> {
    restrictions: R,
    u_turn_weight: f64,
}

impl<R: TurnRestrictionLookup> DefaultTurnCostProvider<R> {
    pub fn new(
        restrictions: R,
        config: &TurnCostsConfig,
    ) -> Result<DefaultTurnCostProvider<R>, CustomModelError> {
        config.validate()?;
        Ok(DefaultTurnCostProvider {
            restrictions,
            u_turn_weight: config.u_turn_costs.unwrap_or(f64::INFINITY),
        })
    }
}

impl<R: TurnRestrictionLookup> TurnCostProvider for DefaultTurnCostProvider<R> {
    fn turn_cost(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> TurnCost {
        if self.restrictions.is_restricted(from_edge, via_node, to_edge) {
            TurnCost::FORBIDDEN
        } else if from_edge == to_edge {
            TurnCost {
                weight: self.u_turn_weight,
                millis: 0,
            }
        } else {
            TurnCost::FREE
        }
    }
}
