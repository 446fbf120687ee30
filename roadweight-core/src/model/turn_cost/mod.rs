mod default_turn_cost_provider;
mod no_turn_cost_provider;
mod turn_cost_provider;
mod turn_costs_config;
mod turn_restrictions;

pub use default_turn_cost_provider::DefaultTurnCostProvider;
pub use no_turn_cost_provider::NoTurnCostProvider;
pub use turn_cost_provider::{TurnCost, TurnCostProvider};
pub use turn_costs_config::TurnCostsConfig;
pub use turn_restrictions::{InMemoryTurnRestrictions, TurnRestrictionLookup};
