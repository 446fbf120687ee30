use std::{fs::File, io::Write, path::Path};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{read_edges, AppError, BoundSummary, Profile, WeightRow};

/// Command line tool for evaluating custom model weightings on edge lists
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct RoadweightApp {
    #[command(subcommand)]
    pub op: RoadweightOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum RoadweightOperation {
    /// compute the weight and travel time of every edge in both directions.
    /// turn costs of the profile are not part of the per-edge output.
    Weight {
        /// profile TOML file declaring attributes, custom model and turn costs
        #[arg(short, long)]
        profile: String,

        /// CSV file of edges with one column per attribute
        #[arg(short, long)]
        edges: String,

        /// custom model JSON sent along with a query, merged into the
        /// profile's model before compilation
        #[arg(short, long)]
        query_model: Option<String>,

        /// CSV file to write. if not provided, rows are written to stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// print the heuristic bounds of a profile as JSON
    Bound {
        /// profile TOML file declaring attributes, custom model and turn costs
        #[arg(short, long)]
        profile: String,

        /// custom model JSON merged into the profile's model
        #[arg(short, long)]
        query_model: Option<String>,
    },
}

impl RoadweightOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            RoadweightOperation::Weight {
                profile,
                edges,
                query_model,
                output,
            } => {
                let profile = Profile::load(Path::new(profile), query_model.as_ref().map(Path::new))?;
                let rows = compute_weights(&profile, Path::new(edges))?;
                match output {
                    Some(file) => {
                        let out = File::create(file).map_err(|e| {
                            AppError::Output(format!("failure creating '{file}': {e}"))
                        })?;
                        write_rows(out, &rows)?;
                        log::info!("wrote {} rows to {file}", rows.len());
                    }
                    None => write_rows(std::io::stdout(), &rows)?,
                }
                Ok(())
            }
            RoadweightOperation::Bound {
                profile,
                query_model,
            } => {
                let profile = Profile::load(Path::new(profile), query_model.as_ref().map(Path::new))?;
                let summary = BoundSummary::from(&profile.weighting);
                log::info!(
                    "min weight per distance {}, max speed {} {}, max priority {}",
                    summary.min_weight_per_distance,
                    summary.max_speed,
                    summary.speed_unit,
                    summary.max_priority
                );
                let json = serde_json::to_string_pretty(&summary)
                    .map_err(|e| AppError::Output(e.to_string()))?;
                println!("{json}");
                Ok(())
            }
        }
    }
}

/// evaluates every edge of the file against the profile's weighting. edges
/// are evaluated in parallel over the shared weighting, output keeps the
/// order of the input.
pub fn compute_weights(profile: &Profile, edges_file: &Path) -> Result<Vec<WeightRow>, AppError> {
    let edges = read_edges(edges_file, &profile.registry)?;
    let rows = edges
        .par_iter()
        .map(|edge| WeightRow::new(&profile.weighting, edge))
        .collect::<Vec<_>>();
    let unusable = rows
        .iter()
        .filter(|r| r.weight.is_infinite() && r.reverse_weight.is_infinite())
        .count();
    if unusable > 0 {
        log::warn!("{unusable} edges cannot be traversed in either direction");
    }
    Ok(rows)
}

fn write_rows<W: Write>(out: W, rows: &[WeightRow]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    for (idx, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .map_err(|e| AppError::Output(format!("failure writing CSV output row {idx}: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::Output(format!("failure flushing CSV output: {e}")))
}
