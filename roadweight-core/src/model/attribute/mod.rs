mod attribute_config;
mod attribute_kind;
mod edge_state;
mod error;
mod handle;
mod in_memory_edge;
mod in_memory_registry;
mod registry;

pub use attribute_config::AttributeConfig;
pub use attribute_kind::AttributeKind;
pub use edge_state::{EdgeId, EdgeState, NodeId};
pub use error::AttributeError;
pub use handle::{
    AttributeId, BooleanHandle, DecimalAttribute, DecimalHandle, EnumAttribute, EnumHandle,
};
pub use in_memory_edge::InMemoryEdge;
pub use in_memory_registry::InMemoryRegistry;
pub use registry::AttributeRegistry;
