use geo::Point;
use serde::{Deserialize, Serialize};

use super::AttributeId;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// read access to a single edge of the graph, as seen by a weighting.
///
/// attribute getters take an [`AttributeId`] issued by the same registry that
/// was used to compile the weighting. handing an edge from a different
/// registry to a weighting is a programming error and implementations may
/// panic on it.
pub trait EdgeState {
    fn edge_id(&self) -> EdgeId;

    /// node the edge starts from in its stored orientation
    fn base_node(&self) -> NodeId;

    /// node the edge leads to in its stored orientation
    fn adj_node(&self) -> NodeId;

    /// length of the edge in meters
    fn distance(&self) -> f64;

    /// true if traversing the edge in this direction should pay the heading
    /// penalty. set on virtual edges created when snapping a start or end point
    /// in order to discourage an immediate U-turn.
    fn is_unfavored(&self, reverse: bool) -> bool;

    /// representative (lon, lat) points of the edge used for area membership.
    fn points(&self) -> &[Point<f64>];

    fn get_bool(&self, id: AttributeId, reverse: bool) -> bool;

    /// ordinal of the enum value within the registry's value list
    fn get_enum(&self, id: AttributeId, reverse: bool) -> u32;

    fn get_decimal(&self, id: AttributeId, reverse: bool) -> f64;
}
