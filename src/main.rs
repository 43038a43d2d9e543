use anyhow::Result;
use clap::Parser;

use counselor::{
    app::load_config,
    cache::PredictionCache,
    cli::Cli,
    predictor::HttpPredictor,
    runtime::{input_from_cli, run_one_shot, Orchestrator},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // A rank on the command line means non-interactive mode, unless an
    // explicit subcommand was given
    if cli.is_one_shot() {
        run_non_interactive(cli).await
    } else {
        // Create and run the orchestrator for interactive mode
        let orchestrator = Orchestrator::new(cli)?;
        orchestrator.run().await
    }
}

/// Run a single prediction from CLI flags
async fn run_non_interactive(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)?;
        toml::from_str(&toml_str)?
    } else {
        load_config().unwrap_or_default()
    };

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.url = endpoint.clone();
    }

    let input = input_from_cli(&cli, &config)?;

    let predictor = HttpPredictor::new(&config.endpoint.url, config.endpoint.timeout_secs)?;
    let mut cache = if cli.no_cache {
        PredictionCache::in_memory()
    } else {
        PredictionCache::open_default()?
    };

    let output = run_one_shot(&predictor, &mut cache, input, cli.output_format).await?;
    println!("{}", output);

    Ok(())
}
