use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
    app::{load_config, Config},
    cache::PredictionCache,
    chat::{ChatController, MessageRole, TurnAction},
    cli::{handle_command, Cli},
    predictor::HttpPredictor,
};

/// Main runtime orchestrator for the interactive chat session
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = if let Some(config_path) = &cli.config {
            let toml_str = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config at {}", config_path.display()))?;
            toml::from_str::<Config>(&toml_str)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        // Flag overrides must land before any subcommand looks at the config
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint.url = endpoint.clone();
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        // Handle subcommands
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(()); // Command handled, exit
            }
            // Continue to chat for Commands::Chat
        }

        let predictor =
            HttpPredictor::new(&self.config.endpoint.url, self.config.endpoint.timeout_secs)?;
        let mut cache = if self.cli.no_cache {
            PredictionCache::in_memory()
        } else {
            PredictionCache::open_default()?
        };
        let mut controller = ChatController::new(self.config.options.clone());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut awaiting_rank = false;

        loop {
            self.flush_transcript(&mut controller).await;

            if awaiting_rank {
                print!("{} ", "Your rank:".bold());
                flush_stdout();
                let Some(line) = lines.next_line().await? else {
                    break;
                };
                awaiting_rank = false;
                if controller.submit_rank(&line).is_ok() {
                    self.flush_transcript(&mut controller).await;
                    println!("{}", "Analyzing colleges...".dimmed());
                    if let Err(e) = controller.run_prediction(&predictor, &mut cache).await {
                        debug!("prediction attempt failed: {e}");
                    }
                } else {
                    // Validation message is already in the transcript; re-prompt
                    awaiting_rank = true;
                }
                continue;
            }

            let options = controller.current_options();
            print_options(&options);
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let Some(selection) = resolve_selection(&line, &options) else {
                controller.handle_free_text(line.trim());
                continue;
            };

            match controller.submit_selection(&selection) {
                TurnAction::AwaitRank => awaiting_rank = true,
                TurnAction::Exit => {
                    println!("{}", "Good luck with your admissions! 👋".cyan());
                    break;
                }
                TurnAction::Prompt | TurnAction::Reset | TurnAction::Ignored => {}
            }
        }

        Ok(())
    }

    /// Print transcript lines added since the last flush, pausing before bot
    /// turns to simulate typing (configurable, zero disables)
    async fn flush_transcript(&self, controller: &mut ChatController) {
        let delay = self.config.chat.typing_delay_ms;
        for message in controller.drain_unseen() {
            match message.role {
                MessageRole::User => println!("{} {}", "You:".bold(), message.content),
                MessageRole::Bot => {
                    if delay > 0 {
                        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                    }
                    println!("{} {}", "Bot:".cyan().bold(), message.content);
                }
            }
        }
    }
}

/// Map a typed line onto one of the offered options: either its number or a
/// case-insensitive match on the undecorated label
fn resolve_selection(line: &str, options: &[String]) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        if index >= 1 && index <= options.len() {
            return Some(options[index - 1].clone());
        }
        return None;
    }

    options
        .iter()
        .find(|option| {
            crate::chat::canonical_option(option).eq_ignore_ascii_case(trimmed)
        })
        .cloned()
}

fn print_options(options: &[String]) {
    for (index, option) in options.iter().enumerate() {
        println!("  {} {}", format!("{}.", index + 1).green(), option);
    }
    print!("{} ", ">".bold());
    flush_stdout();
}

fn flush_stdout() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}
