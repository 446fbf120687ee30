mod edge_reader;
mod error;
mod profile;
mod profile_config;
mod roadweight_app;
mod weight_row;

pub use edge_reader::read_edges;
pub use error::AppError;
pub use profile::Profile;
pub use profile_config::ProfileConfig;
pub use roadweight_app::{RoadweightApp, RoadweightOperation};
pub use weight_row::{BoundSummary, WeightRow};
