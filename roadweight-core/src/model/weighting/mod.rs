mod custom_weighting;
mod weighting;
mod weighting_config;
pub mod weighting_ops;

pub use custom_weighting::CustomWeighting;
pub use weighting::Weighting;
pub use weighting_config::WeightingConfig;
