pub mod area;
pub mod attribute;
pub mod compiler;
pub mod condition;
pub mod custom_model;
mod error;
pub mod turn_cost;
pub mod weighting;

pub use error::CustomModelError;
