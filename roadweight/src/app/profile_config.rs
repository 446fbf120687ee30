use std::path::{Path, PathBuf};

use config::{Config, File};
use roadweight_core::model::{
    attribute::AttributeConfig, turn_cost::TurnCostsConfig, weighting::WeightingConfig,
};
use serde::{Deserialize, Serialize};

use super::AppError;

/// contents of a profile TOML file. file paths are relative to the
/// directory of the profile file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProfileConfig {
    /// JSON file with the custom model of this profile
    pub custom_model_file: String,
    /// attributes stored on the edges of the graph
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
    #[serde(default)]
    pub weighting: WeightingConfig,
    /// enables turn costs. if omitted and no restrictions file is given,
    /// turns are free.
    #[serde(default)]
    pub turn_costs: Option<TurnCostsConfig>,
    /// CSV file with `from_edge,via_node,to_edge` rows of forbidden turns
    #[serde(default)]
    pub turn_restrictions_file: Option<String>,
}

impl ProfileConfig {
    pub fn from_file(path: &Path) -> Result<ProfileConfig, AppError> {
        let config_error = |message: String| AppError::Configuration {
            path: path.to_string_lossy().to_string(),
            message,
        };
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| config_error(e.to_string()))?;
        config
            .try_deserialize::<ProfileConfig>()
            .map_err(|e| config_error(e.to_string()))
    }

    pub fn custom_model_path(&self, profile_dir: &Path) -> PathBuf {
        profile_dir.join(&self.custom_model_file)
    }

    pub fn turn_restrictions_path(&self, profile_dir: &Path) -> Option<PathBuf> {
        self.turn_restrictions_file
            .as_ref()
            .map(|f| profile_dir.join(f))
    }
}
