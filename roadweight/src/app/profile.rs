use std::{fs, path::Path, sync::Arc};

use roadweight_core::model::{
    attribute::{EdgeId, InMemoryRegistry, NodeId},
    compiler::CustomModelCompiler,
    custom_model::CustomModel,
    turn_cost::{
        DefaultTurnCostProvider, InMemoryTurnRestrictions, NoTurnCostProvider, TurnCostProvider,
    },
    weighting::CustomWeighting,
};
use serde::Deserialize;

use super::{AppError, ProfileConfig};

/// a loaded profile: the attribute registry and the weighting compiled for it
pub struct Profile {
    pub registry: InMemoryRegistry,
    pub weighting: CustomWeighting,
}

#[derive(Deserialize)]
struct TurnRestrictionRow {
    from_edge: usize,
    via_node: usize,
    to_edge: usize,
}

impl Profile {
    /// loads the profile file and everything it references, then compiles
    /// the custom model. a query model, if given, refines the profile's
    /// model before compilation.
    pub fn load(profile_file: &Path, query_model_file: Option<&Path>) -> Result<Profile, AppError> {
        let config = ProfileConfig::from_file(profile_file)?;
        let profile_dir = profile_file.parent().unwrap_or_else(|| Path::new(""));
        let registry = InMemoryRegistry::new(config.attributes.clone())?;

        let mut model = read_custom_model(&config.custom_model_path(profile_dir))?;
        if let Some(query_file) = query_model_file {
            let query = read_custom_model(query_file)?;
            log::info!(
                "merging query model '{}' into profile model",
                query_file.to_string_lossy()
            );
            model = model.merge(&query)?;
        }

        let turn_costs = turn_cost_provider(&config, profile_dir)?;
        let weighting = CustomModelCompiler::new(&registry, config.weighting.clone())
            .compile(&model, turn_costs)?;
        Ok(Profile {
            registry,
            weighting,
        })
    }
}

fn read_custom_model(path: &Path) -> Result<CustomModel, AppError> {
    let model_error = |message: String| AppError::CustomModelFile {
        path: path.to_string_lossy().to_string(),
        message,
    };
    let contents = fs::read_to_string(path).map_err(|e| model_error(e.to_string()))?;
    contents
        .parse::<CustomModel>()
        .map_err(|e| model_error(e.to_string()))
}

fn turn_cost_provider(
    config: &ProfileConfig,
    profile_dir: &Path,
) -> Result<Arc<dyn TurnCostProvider>, AppError> {
    let restrictions_path = config.turn_restrictions_path(profile_dir);
    if config.turn_costs.is_none() && restrictions_path.is_none() {
        log::debug!("no turn costs configured");
        return Ok(Arc::new(NoTurnCostProvider));
    }
    let restrictions = match restrictions_path {
        Some(path) => read_turn_restrictions(&path)?,
        None => InMemoryTurnRestrictions::default(),
    };
    log::info!("loaded {} turn restrictions", restrictions.len());
    let turn_costs_config = config.turn_costs.clone().unwrap_or_default();
    let provider = DefaultTurnCostProvider::new(restrictions, &turn_costs_config)?;
    Ok(Arc::new(provider))
}

fn read_turn_restrictions(path: &Path) -> Result<InMemoryTurnRestrictions, AppError> {
    let csv_error = |source: csv::Error| AppError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    reader
        .deserialize::<TurnRestrictionRow>()
        .map(|row| {
            row.map(|r| (EdgeId(r.from_edge), NodeId(r.via_node), EdgeId(r.to_edge)))
                .map_err(csv_error)
        })
        .collect()
}
