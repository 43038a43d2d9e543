use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    cache::PredictionCache,
    predictor::HttpPredictor,
};

use super::Commands;

/// Handle CLI subcommands. Returns true when the command was fully handled
/// and the process should exit instead of starting a chat session.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing Counselor configuration...");
            init_config()?;
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Cache { clear } => {
            show_cache(*clear)?;
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to chat interface
    }
}

/// Show version information
pub fn show_version() {
    println!("Counselor v{}", env!("CARGO_PKG_VERSION"));
    println!("   An interactive college cutoff predictor chatbot");
}

/// Show status of the prediction service and local setup
async fn show_status(config: &Config) -> Result<()> {
    println!("Counselor Status:");
    println!();

    // Check the prediction service
    let predictor = HttpPredictor::with_defaults(&config.endpoint.url)?;
    if predictor.is_reachable().await {
        println!("  [OK] Prediction service: {}", predictor.base_url().green());
    } else {
        println!(
            "  [ERROR] Prediction service: {} not reachable",
            predictor.base_url().red()
        );
    }

    // Check configuration
    let config_path = get_config_dir()?.join("config.toml");
    if config_path.exists() {
        println!("  [OK] Configuration: {}", config_path.display());
    } else {
        println!("  [WARNING] Configuration: Not found (using defaults)");
    }

    // Check the cache
    let cache = PredictionCache::open_default()?;
    println!("  [OK] Prediction cache: {} entries", cache.len());

    println!();
    Ok(())
}

/// List cached predictions, or clear them with --clear
fn show_cache(clear: bool) -> Result<()> {
    let mut cache = PredictionCache::open_default()?;

    if clear {
        let count = cache.len();
        cache.clear()?;
        println!("Cleared {} cached prediction(s)", count);
        return Ok(());
    }

    if cache.is_empty() {
        println!("The prediction cache is empty.");
        return Ok(());
    }

    println!("Cached predictions (newest first):");
    let now = Local::now();
    for entry in cache.entries() {
        let age = now.signed_duration_since(entry.cached_at);
        let age_text = if age.num_hours() > 0 {
            format!("{}h {}m ago", age.num_hours(), age.num_minutes() % 60)
        } else {
            format!("{}m ago", age.num_minutes())
        };
        let total = entry.results.exact_matches.len()
            + entry.results.near_matches.len()
            + entry.results.weak_matches.len();
        println!(
            "  • {} {} rank {} in {} ({}) — {} match(es), {}",
            entry.input.college_type.green(),
            entry.input.exam_type,
            entry.input.rank,
            entry.input.place,
            entry.input.category,
            total,
            age_text,
        );
    }

    Ok(())
}
