//! Train the health risk model from labeled CSV data
//!
//! Usage: cargo run --bin train_model -- --data vitals.csv --model-dir models --trees 100

use anyhow::Result;
use clap::Parser;
use health_ml::assessment::MODEL_VERSION;
use health_ml::features::StandardScaler;
use health_ml::models::{ForestConfig, ModelArtifact, RandomForest};
use health_ml::Dataset;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the health risk classifier")]
struct Args {
    /// Labeled training data (feature columns + risk_label)
    #[arg(short, long)]
    data: PathBuf,

    /// Directory the model artifact is written to
    #[arg(short, long, default_value = "models")]
    model_dir: PathBuf,

    /// Number of trees
    #[arg(short, long, default_value = "100")]
    trees: usize,

    /// Max tree depth
    #[arg(long, default_value = "10")]
    max_depth: usize,

    /// Test set ratio
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("health_ml=info,train_model=info")
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Health Risk Model Training");
    println!("===========================================\n");

    info!(path = %args.data.display(), "loading training data");
    let dataset = Dataset::load_csv(&args.data)?;
    println!(
        "Loaded {} samples with {} features",
        dataset.n_samples(),
        dataset.n_features()
    );

    let split = dataset.random_split(args.test_ratio, args.seed);
    let mut train = split.train;

    let mut scaler = StandardScaler::new();
    scaler.fit_transform(&mut train);

    let config = ForestConfig {
        n_trees: args.trees,
        max_depth: args.max_depth,
        seed: args.seed,
        ..Default::default()
    };

    info!(n_trees = args.trees, max_depth = args.max_depth, "training forest");
    let mut forest = RandomForest::new(config);
    forest.fit(&train);

    let mut test = split.test;
    for row in &mut test.features {
        *row = scaler.transform(row);
    }

    println!("\nTraining complete:");
    println!("  Train accuracy: {:.4}", forest.accuracy(&train));
    if test.n_samples() > 0 {
        println!("  Test accuracy:  {:.4}", forest.accuracy(&test));
    }

    let artifact = ModelArtifact {
        forest,
        scaler,
        version: MODEL_VERSION.to_string(),
    };
    let path = ModelArtifact::path_in(&args.model_dir);
    artifact.save(&path)?;

    println!("\nModel saved to {}", path.display());
    Ok(())
}
