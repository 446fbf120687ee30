use serde::{Deserialize, Serialize};

/// defaults for custom models that leave a parameter unset
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WeightingConfig {
    /// seconds added to unfavored edges
    #[serde(default = "WeightingConfig::default_heading_penalty")]
    pub default_heading_penalty: f64,
    #[serde(default)]
    pub default_distance_influence: f64,
}

impl WeightingConfig {
    pub const DEFAULT_HEADING_PENALTY: f64 = 300.0;

    fn default_heading_penalty() -> f64 {
        Self::DEFAULT_HEADING_PENALTY
    }
}

impl Default for WeightingConfig {
    fn default() -> Self {
        WeightingConfig {
            default_heading_penalty: Self::DEFAULT_HEADING_PENALTY,
            default_distance_influence: 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::WeightingConfig;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WeightingConfig = serde_json::from_str(r#"{"default_distance_influence": 70}"#)
            .expect("test invariant failed: config should parse");
        assert_eq!(config.default_heading_penalty, 300.0);
        assert_eq!(config.default_distance_influence, 70.0);
    }
}
