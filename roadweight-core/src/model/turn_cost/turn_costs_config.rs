use serde::{Deserialize, Serialize};

use crate::model::CustomModelError;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TurnCostsConfig {
    /// seconds charged for turning back onto the same edge. if not set,
    /// U-turns are forbidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u_turn_costs: Option<f64>,
}

impl TurnCostsConfig {
    pub fn with_u_turn_costs(u_turn_costs: f64) -> TurnCostsConfig {
        TurnCostsConfig {
            u_turn_costs: Some(u_turn_costs),
        }
    }

    pub fn validate(&self) -> Result<(), CustomModelError> {
        match self.u_turn_costs {
            Some(costs) if !costs.is_finite() || costs < 0.0 => {
                Err(CustomModelError::InvalidParameter {
                    parameter: String::from("u_turn_costs"),
                    message: format!("must be a finite number >= 0, found {costs}"),
                })
            }
            _ => Ok(()),
        }
    }
}
