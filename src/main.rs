//! Mnemosyne CLI - Hyperdimensional Classifier
//!
//! Command-line interface for training, inspecting and querying models.

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use mnemosyne::data::load_features;
use mnemosyne::{load_samples, Config, HdcModel, MemoryBank, Result, VectorKind};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mnemosyne")]
#[command(author = "Mnemosyne Contributors")]
#[command(version)]
#[command(about = "Hyperdimensional classifier core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a feature table and a label table
    Train {
        /// Feature CSV (one sample per line)
        #[arg(short, long)]
        features: PathBuf,

        /// Label CSV (one class id per line)
        #[arg(short, long)]
        labels: PathBuf,

        /// Output model file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Hypervector dimension (overrides the configuration)
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Vector kind: binary or bipolar (overrides the configuration)
        #[arg(short, long)]
        kind: Option<VectorKind>,
    },

    /// Classify every row of a feature table
    Classify {
        /// Model file to use
        #[arg(short, long)]
        model: PathBuf,

        /// Feature CSV (one sample per line)
        #[arg(short, long)]
        features: PathBuf,
    },

    /// Measure accuracy against a labelled table
    Evaluate {
        /// Model file to use
        #[arg(short, long)]
        model: PathBuf,

        /// Feature CSV (one sample per line)
        #[arg(short, long)]
        features: PathBuf,

        /// Label CSV (one class id per line)
        #[arg(short, long)]
        labels: PathBuf,
    },

    /// Print the contents of one memory bank
    Dump {
        /// Model file to inspect
        #[arg(short, long)]
        model: PathBuf,

        /// Bank to print
        #[arg(short, long, value_enum, default_value = "am")]
        bank: Bank,
    },

    /// Show model statistics
    Info {
        /// Model file to inspect
        model: PathBuf,
    },

    /// Print the default configuration as JSON
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Bank {
    Im,
    Cim,
    Am,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = match cli.command {
        Commands::Train {
            features,
            labels,
            output,
            config,
            seed,
            dimension,
            kind,
        } => train_model(features, labels, output, config, seed, dimension, kind),

        Commands::Classify { model, features } => classify_rows(model, features),

        Commands::Evaluate {
            model,
            features,
            labels,
        } => evaluate_model(model, features, labels),

        Commands::Dump { model, bank } => dump_bank(model, bank),

        Commands::Info { model } => show_info(model),

        Commands::Config => print_config(),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn train_model(
    features: PathBuf,
    labels: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    dimension: Option<usize>,
    kind: Option<VectorKind>,
) -> Result<()> {
    let start_time = Instant::now();

    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if seed.is_some() {
        config.memory.seed = seed;
    }
    if let Some(dimension) = dimension {
        config.memory.dimension = dimension;
    }
    if let Some(kind) = kind {
        config.memory.kind = kind;
    }

    println!("Mnemosyne Hyperdimensional Classifier");
    println!("   Training from: {}", features.display());
    println!();

    let samples = load_samples(&features, &labels, config.training.num_features)?;
    println!("✓ Loaded {} samples", samples.len());

    let mut model = HdcModel::new(config)?;
    let report = model.train(&samples)?;
    println!(
        "✓ Trained {} classes from {} samples ({} skipped)",
        report.trained_classes().len(),
        report.samples_used,
        report.samples_skipped
    );
    for (class_id, count) in &report.class_counts {
        println!("    class {:>3}: {} samples", class_id, count);
    }

    model.save(&output)?;
    println!("✓ Saved model to {}", output.display());
    println!("   Finished in {:.2?}", start_time.elapsed());

    Ok(())
}

fn classify_rows(model_path: PathBuf, features: PathBuf) -> Result<()> {
    let model = HdcModel::load(&model_path)?;
    let rows = load_features(&features, model.config().training.num_features)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (row, decision) in model.predict_rows(&rows) {
        writeln!(out, "{}\t{}\t{}", row, decision.class_id, decision.distance)?;
    }

    Ok(())
}

fn evaluate_model(model_path: PathBuf, features: PathBuf, labels: PathBuf) -> Result<()> {
    let model = HdcModel::load(&model_path)?;
    let samples = load_samples(&features, &labels, model.config().training.num_features)?;
    let evaluation = model.evaluate(&samples)?;

    println!(
        "Accuracy: {:.2}% ({}/{})",
        evaluation.accuracy() * 100.0,
        evaluation.correct,
        evaluation.total
    );
    println!();
    println!("Confusion (rows: actual, columns: predicted)");
    for (actual, row) in evaluation.confusion.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|count| format!("{:>6}", count)).collect();
        println!("  {:>3} {}", actual, cells.join(""));
    }

    Ok(())
}

fn dump_bank(model_path: PathBuf, bank: Bank) -> Result<()> {
    let model = HdcModel::load(&model_path)?;
    let bank: &MemoryBank = match bank {
        Bank::Im => model.item_memory(),
        Bank::Cim => model.continuous_memory(),
        Bank::Am => model.associative_memory(),
    };

    let stdout = io::stdout();
    bank.dump(stdout.lock())?;
    Ok(())
}

fn show_info(model_path: PathBuf) -> Result<()> {
    let model = HdcModel::load(&model_path)?;
    let config = model.config();

    println!("Model: {:?}", model_path);
    println!("  Vector kind: {}", config.memory.kind);
    println!("  Dimension: {}", config.memory.dimension);
    println!("  Classes: {}", config.memory.num_classes);
    println!(
        "  Levels: {} over [{}, {}]",
        config.encoder.num_levels, config.encoder.min_level, config.encoder.max_level
    );
    println!("  Features per sample: {}", config.training.num_features);

    Ok(())
}

fn print_config() -> Result<()> {
    println!("{}", Config::default().to_json()?);
    Ok(())
}
