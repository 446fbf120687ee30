use roadweight_core::model::{
    attribute::{EdgeId, EdgeState},
    weighting::{CustomWeighting, Weighting},
};
use serde::{Deserialize, Serialize};
use uom::si::time::millisecond;

/// weights and travel times of one edge in both directions
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightRow {
    pub edge_id: EdgeId,
    pub weight: f64,
    pub reverse_weight: f64,
    pub time_ms: f64,
    pub reverse_time_ms: f64,
}

impl WeightRow {
    pub fn new(weighting: &CustomWeighting, edge: &dyn EdgeState) -> WeightRow {
        WeightRow {
            edge_id: edge.edge_id(),
            weight: weighting.edge_weight(edge, false),
            reverse_weight: weighting.edge_weight(edge, true),
            time_ms: weighting.edge_travel_time(edge, false).get::<millisecond>(),
            reverse_time_ms: weighting.edge_travel_time(edge, true).get::<millisecond>(),
        }
    }
}

/// the static bounds of a compiled profile
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoundSummary {
    pub min_weight_per_distance: f64,
    pub max_speed: f64,
    pub speed_unit: String,
    pub max_priority: f64,
    pub distance_influence: f64,
    pub heading_penalty: f64,
    pub has_turn_costs: bool,
}

impl From<&CustomWeighting> for BoundSummary {
    fn from(weighting: &CustomWeighting) -> Self {
        BoundSummary {
            min_weight_per_distance: weighting.min_weight_per_distance(),
            max_speed: weighting.max_speed(),
            speed_unit: weighting.speed_unit().to_string(),
            max_priority: weighting.max_priority(),
            distance_influence: weighting.distance_influence(),
            heading_penalty: weighting.heading_penalty(),
            has_turn_costs: weighting.has_turn_costs(),
        }
    }
}
