use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "counselor")]
#[command(version)]
#[command(about = "An interactive college cutoff predictor chatbot", long_about = None)]
pub struct Cli {
    /// Prediction service base URL (overrides configuration)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Don't read or write the on-disk prediction cache
    #[arg(long)]
    pub no_cache: bool,

    /// Rank for a non-interactive prediction (skips the chat)
    #[arg(short, long)]
    pub rank: Option<u32>,

    /// Program type for non-interactive mode (e.g. MCA, MBA, MTech)
    #[arg(long, requires = "rank")]
    pub college_type: Option<String>,

    /// Exam type for non-interactive mode
    #[arg(long, requires = "rank")]
    pub exam_type: Option<String>,

    /// Reservation category for non-interactive mode (e.g. GM, OBC, SC, ST)
    #[arg(long, requires = "rank")]
    pub category: Option<String>,

    /// Preferred location for non-interactive mode ("All" for no filter)
    #[arg(long, requires = "rank")]
    pub place: Option<String>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "rank")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// True when the flags ask for a single prediction instead of a chat
    /// session. An explicit subcommand always takes priority over one-shot
    /// flags, so `counselor cache --rank 5` still runs the cache command.
    pub fn is_one_shot(&self) -> bool {
        self.rank.is_some() && self.command.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start a chat session (default)
    Chat,
    /// Check the prediction service and local setup
    Status,
    /// Show or clear the prediction cache
    Cache {
        /// Remove all cached predictions
        #[arg(long)]
        clear: bool,
    },
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
