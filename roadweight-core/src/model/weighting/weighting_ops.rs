//! helpers for searches that walk edge by edge and pay for turns on the way.

use super::Weighting;
use crate::model::attribute::{EdgeId, EdgeState};

/// weight of an edge plus the turn onto it (forward search) or off it
/// (reverse search).
///
/// in a forward search `prev_or_next_edge` is the edge the search arrived
/// on and the turn is taken at the edge's base node onto the edge. in a
/// reverse search it is the edge that follows, and the turn is taken from
/// this edge at its base node. without an adjacent edge there is no turn.
pub fn calc_weight_with_turn_weight(
    weighting: &dyn Weighting,
    edge: &dyn EdgeState,
    reverse: bool,
    prev_or_next_edge: Option<EdgeId>,
) -> f64 {
    let edge_weight = weighting.edge_weight(edge, reverse);
    let Some(other) = prev_or_next_edge else {
        return edge_weight;
    };
    let turn_weight = if reverse {
        weighting.turn_weight(edge.edge_id(), edge.base_node(), other)
    } else {
        weighting.turn_weight(other, edge.base_node(), edge.edge_id())
    };
    if edge_weight.is_infinite() || turn_weight.is_infinite() {
        f64::INFINITY
    } else {
        edge_weight + turn_weight
    }
}

/// travel time of an edge plus the time of the adjacent turn, in
/// milliseconds. see [`calc_weight_with_turn_weight`] for the turn.
pub fn calc_millis_with_turn_millis(
    weighting: &dyn Weighting,
    edge: &dyn EdgeState,
    reverse: bool,
    prev_or_next_edge: Option<EdgeId>,
) -> f64 {
    let edge_millis = weighting.edge_travel_time_millis(edge, reverse);
    let Some(other) = prev_or_next_edge else {
        return edge_millis;
    };
    let turn_millis = if reverse {
        weighting.turn_millis(edge.edge_id(), edge.base_node(), other)
    } else {
        weighting.turn_millis(other, edge.base_node(), edge.edge_id())
    };
    if edge_millis.is_infinite() {
        f64::INFINITY
    } else {
        edge_millis + turn_millis as f64
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::model::{
        attribute::{AttributeConfig, InMemoryEdge, InMemoryRegistry, NodeId},
        compiler::CustomModelCompiler,
        custom_model::CustomModel,
        turn_cost::{
            DefaultTurnCostProvider, InMemoryTurnRestrictions, NoTurnCostProvider,
            TurnCostProvider, TurnCostsConfig,
        },
        weighting::{CustomWeighting, WeightingConfig},
    };

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new(vec![AttributeConfig::decimal(
            "car_average_speed",
            Some(155.0),
            true,
        )])
        .expect("test invariant failed: registry could not be built")
    }

    fn weighting(registry: &InMemoryRegistry, provider: Arc<dyn TurnCostProvider>) -> CustomWeighting {
        CustomModelCompiler::new(registry, WeightingConfig::default())
            .compile(&CustomModel::new("car_average_speed"), provider)
            .expect("test invariant failed: custom model should compile")
    }

    fn edge(registry: &InMemoryRegistry, id: usize, base: usize, adj: usize) -> InMemoryEdge {
        let mut edge = registry.new_edge(EdgeId(id), NodeId(base), NodeId(adj), 100.0);
        registry
            .set_decimal(&mut edge, "car_average_speed", 60.0, 60.0)
            .expect("test invariant failed: speed should be storable");
        edge
    }

    #[test]
    fn test_restricted_turn() {
        let registry = registry();
        // edge 0 connects nodes 0-1, edge 1 connects nodes 1-2
        let restrictions: InMemoryTurnRestrictions =
            [(EdgeId(0), NodeId(1), EdgeId(1))].into_iter().collect();
        let provider = DefaultTurnCostProvider::new(restrictions, &TurnCostsConfig::default())
            .expect("test invariant failed: provider should build");
        let weighting = weighting(&registry, Arc::new(provider));
        let next = edge(&registry, 1, 1, 2);
        assert!(calc_weight_with_turn_weight(&weighting, &next, false, Some(EdgeId(0))).is_infinite());
        // the turn takes no time, only the edge does
        let millis = calc_millis_with_turn_millis(&weighting, &next, false, Some(EdgeId(0)));
        assert!((millis - 6000.0).abs() < 1e-6);
        // reverse search: the turn is taken from this edge onto the next one
        let reverse = edge(&registry, 0, 1, 0);
        assert!(calc_weight_with_turn_weight(&weighting, &reverse, true, Some(EdgeId(1))).is_infinite());
        assert!(weighting.has_turn_costs());
    }

    #[test]
    fn test_u_turn_costs() {
        let registry = registry();
        let provider = DefaultTurnCostProvider::new(
            InMemoryTurnRestrictions::default(),
            &TurnCostsConfig::with_u_turn_costs(40.0),
        )
        .expect("test invariant failed: provider should build");
        let weighting = weighting(&registry, Arc::new(provider));
        let edge = edge(&registry, 0, 0, 1);
        let weight = calc_weight_with_turn_weight(&weighting, &edge, false, Some(EdgeId(0)));
        assert!((weight - (6.0 + 40.0)).abs() < 1e-6);
        let millis = calc_millis_with_turn_millis(&weighting, &edge, false, Some(EdgeId(0)));
        assert!((millis - 6000.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_adjacent_edge() {
        let registry = registry();
        let weighting = weighting(&registry, Arc::new(NoTurnCostProvider));
        let edge = edge(&registry, 0, 0, 1);
        assert!((calc_weight_with_turn_weight(&weighting, &edge, false, None) - 6.0).abs() < 1e-9);
        assert!((calc_millis_with_turn_millis(&weighting, &edge, true, None) - 6000.0).abs() < 1e-6);
    }
}
