use crate::model::attribute::{EdgeId, EdgeState, NodeId};

/// the cost oracle of a shortest path search.
///
/// weights are in seconds-like units. an edge or turn that must not be used
/// has an infinite weight. implementations are immutable and may be shared
/// by any number of search threads.
pub trait Weighting: Send + Sync {
    fn name(&self) -> &str;

    /// lower bound of weight per meter over every edge, used by A* to
    /// estimate the remaining cost
    fn min_weight_per_distance(&self) -> f64;

    fn edge_weight(&self, edge: &dyn EdgeState, reverse: bool) -> f64;

    /// travel time of the edge in milliseconds, infinite if it cannot be
    /// traversed
    fn edge_travel_time_millis(&self, edge: &dyn EdgeState, reverse: bool) -> f64;

    fn turn_weight(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> f64;

    fn turn_millis(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> i64;

    fn has_turn_costs(&self) -> bool;
}
