//! Assess one health record against the persisted model
//!
//! Usage: cargo run --bin assess -- --record patient.json --model-dir models

use anyhow::{Context, Result};
use clap::Parser;
use health_ml::models::ForestConfig;
use health_ml::{HealthRecord, RiskAssessor};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score a health record")]
struct Args {
    /// JSON file with the vital-sign record
    #[arg(short, long)]
    record: PathBuf,

    /// Directory holding the model artifact
    #[arg(short, long, default_value = "models")]
    model_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("health_ml=info,assess=info")
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.record)
        .with_context(|| format!("Failed to read {}", args.record.display()))?;
    let record: HealthRecord =
        serde_json::from_str(&raw).context("Record file is not a JSON object")?;

    info!(model_dir = %args.model_dir.display(), "initializing assessor");
    let assessor = RiskAssessor::initialize(&args.model_dir, ForestConfig::default())?;

    let outcome = assessor.assess(&record);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
