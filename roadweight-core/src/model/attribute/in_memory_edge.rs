use geo::Point;

use super::{AttributeId, EdgeId, EdgeState, NodeId};

/// an edge with attribute storage laid out by an [`super::InMemoryRegistry`].
/// each attribute slot holds a forward and a reverse value.
///
/// created through [`super::InMemoryRegistry::new_edge`], which sizes the
/// storage for every declared attribute. reading an id issued by another
/// registry panics.
#[derive(Clone, Debug)]
pub struct InMemoryEdge {
    edge_id: EdgeId,
    base_node: NodeId,
    adj_node: NodeId,
    distance: f64,
    unfavored: [bool; 2],
    points: Vec<Point<f64>>,
    pub(super) booleans: Vec<[bool; 2]>,
    pub(super) enums: Vec<[u32; 2]>,
    pub(super) decimals: Vec<[f64; 2]>,
}

impl InMemoryEdge {
    pub(super) fn new(
        edge_id: EdgeId,
        base_node: NodeId,
        adj_node: NodeId,
        distance: f64,
        slots: (usize, usize, usize),
    ) -> InMemoryEdge {
        let (n_boolean, n_enum, n_decimal) = slots;
        InMemoryEdge {
            edge_id,
            base_node,
            adj_node,
            distance,
            unfavored: [false, false],
            points: vec![],
            booleans: vec![[false, false]; n_boolean],
            enums: vec![[0, 0]; n_enum],
            decimals: vec![[0.0, 0.0]; n_decimal],
        }
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }

    /// flags (or releases) both directions of this edge as unfavored
    pub fn set_unfavored(&mut self, unfavored: bool) {
        self.unfavored = [unfavored, unfavored];
    }

    pub fn set_unfavored_direction(&mut self, reverse: bool, unfavored: bool) {
        self.unfavored[direction(reverse)] = unfavored;
    }

    pub fn set_points(&mut self, points: Vec<Point<f64>>) {
        self.points = points;
    }
}

impl EdgeState for InMemoryEdge {
    fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    fn base_node(&self) -> NodeId {
        self.base_node
    }

    fn adj_node(&self) -> NodeId {
        self.adj_node
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn is_unfavored(&self, reverse: bool) -> bool {
        self.unfavored[direction(reverse)]
    }

    fn points(&self) -> &[Point<f64>] {
        &self.points
    }

    fn get_bool(&self, id: AttributeId, reverse: bool) -> bool {
        self.booleans[id.0][direction(reverse)]
    }

    fn get_enum(&self, id: AttributeId, reverse: bool) -> u32 {
        self.enums[id.0][direction(reverse)]
    }

    fn get_decimal(&self, id: AttributeId, reverse: bool) -> f64 {
        self.decimals[id.0][direction(reverse)]
    }
}

fn direction(reverse: bool) -> usize {
    usize::from(reverse)
}
