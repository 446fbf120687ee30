use std::collections::HashSet;

use crate::model::attribute::{EdgeId, NodeId};

/// storage of forbidden turns
pub trait TurnRestrictionLookup: Send + Sync {
    fn is_restricted(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> bool;
}

/// set of forbidden (from edge, via node, to edge) turns
#[derive(Clone, Debug, Default)]
pub struct InMemoryTurnRestrictions {
    restricted: HashSet<(EdgeId, NodeId, EdgeId)>,
}

impl InMemoryTurnRestrictions {
    pub fn insert(&mut self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> bool {
        self.restricted.insert((from_edge, via_node, to_edge))
    }

    pub fn len(&self) -> usize {
        self.restricted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restricted.is_empty()
    }
}

impl FromIterator<(EdgeId, NodeId, EdgeId)> for InMemoryTurnRestrictions {
    fn from_iter<T: IntoIterator<Item = (EdgeId, NodeId, EdgeId)>>(iter: T) -> Self {
        InMemoryTurnRestrictions {
            restricted: iter.into_iter().collect(),
        }
    }
}

impl TurnRestrictionLookup for InMemoryTurnRestrictions {
    fn is_restricted(&self, from_edge: EdgeId, via_node: NodeId, to_edge: EdgeId) -> bool {
        self.restricted.contains(&(from_edge, via_node, to_edge))
    }
}
