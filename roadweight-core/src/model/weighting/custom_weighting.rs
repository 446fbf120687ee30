use std::sync::Arc;

use uom::si::{f64::Time, time::millisecond};

use super::Weighting;
use crate::model::{
    area::AreaIndex,
    attribute::{DecimalAttribute, EdgeId, EdgeState, NodeId},
    compiler::RuleSet,
    custom_model::SpeedUnit,
    turn_cost::TurnCostProvider,
};

/// weighting compiled from a custom model by
/// [`crate::model::compiler::CustomModelCompiler`].
///
/// immutable after compilation. a changed model is compiled into a new
/// instance.
pub struct CustomWeighting {
    pub(crate) speed_attribute: DecimalAttribute,
    pub(crate) speed_unit: SpeedUnit,
    pub(crate) speed_rules: RuleSet,
    pub(crate) priority_rules: RuleSet,
    pub(crate) areas: AreaIndex,
    pub(crate) max_speed: f64,
    pub(crate) max_priority: f64,
    pub(crate) distance_influence: f64,
    pub(crate) heading_penalty: f64,
    pub(crate) turn_cost_provider: Arc<dyn TurnCostProvider>,
}

impl CustomWeighting {
    pub const NAME: &'static str = "custom";

    /// speed of the edge in the model's speed unit, between 0 and the
    /// maximum of the speed attribute
    pub fn edge_speed(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        let base = self.speed_attribute.handle.get(edge, reverse);
        let speed = self.speed_rules.apply(base, edge, reverse, &self.areas);
        speed.max(0.0).min(self.speed_attribute.max_value)
    }

    pub fn edge_priority(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        self.priority_rules.apply(1.0, edge, reverse, &self.areas)
    }

    pub fn edge_travel_time(&self, edge: &dyn EdgeState, reverse: bool) -> Time {
        Time::new::<millisecond>(self.edge_travel_time_millis(edge, reverse))
    }

    /// upper bound of [`CustomWeighting::edge_speed`] over all edges
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// upper bound of [`CustomWeighting::edge_priority`] over all edges
    pub fn max_priority(&self) -> f64 {
        self.max_priority
    }

    pub fn speed_unit(&self) -> SpeedUnit {
        self.speed_unit
    }

    pub fn distance_influence(&self) -> f64 {
        self.distance_influence
    }

    pub fn heading_penalty(&self) -> f64 {
        self.heading_penalty
    }

    fn speed_mps(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        self.edge_speed(edge, reverse) * self.speed_unit.meters_per_second()
    }
}

impl Weighting for CustomWeighting {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn min_weight_per_distance(&self) -> f64 {
        let max_speed_mps = self.max_speed * self.speed_unit.meters_per_second();
        1.0 / max_speed_mps / self.max_priority + self.distance_influence / 1000.0
    }

    fn edge_weight(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        let distance = edge.distance();
        let weight = if distance == 0.0 {
            0.0
        } else {
            let speed = self.speed_mps(edge, reverse);
            if speed == 0.0 {
                return f64::INFINITY;
            }
            let priority = self.edge_priority(edge, reverse);
            if priority <= 0.0 {
                return f64::INFINITY;
            }
            distance / speed / priority + self.distance_influence * distance / 1000.0
        };
        if edge.is_unfavored(reverse) {
            weight + self.heading_penalty
        } else {
            weight
        }
    }

    fn edge_travel_time_millis(&self, edge: &dyn EdgeState, reverse: bool) -> f64 {
        let distance = edge.distance();
        if distance == 0.0 {
            return 0.0;
        }
        let speed = self.speed_mps(edge, reverse);
        if speed == 0.0 {
            return f64::INFINITY;
        }
        distance / speed * 1000.0
    }

    fn turn_weight(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> f64 {
        self.turn_cost_provider
            .turn_cost(from_edge, via_node, to_edge)
            .weight
    }

    fn turn_millis(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> i64 {
        self.turn_cost_provider
            .turn_cost(from_edge, via_node, to_edge)
            .millis
    }

    fn has_turn_costs(&self) -> bool {
        self.turn_cost_provider.has_turn_costs()
    }
}
