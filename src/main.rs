//! Norsk Lexicon - Russian/Norwegian phrasebook engine
//!
//! Command-line entry point: answer single queries, run a line-oriented chat
//! session, or serve the HTTP API used by the chat widget.

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "norsk-lexicon")]
#[command(about = "Russian/Norwegian phrasebook lookup engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, env = "NORSK_LEXICON_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Extra dictionary file or URL (repeatable)
    #[arg(short, long = "source")]
    sources: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single query and print the reply
    Ask {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Interactive session reading one query per line from stdin
    Chat,

    /// Print a random vocabulary word
    RandomWord,

    /// Show dictionary, index and cache counters
    Stats {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Start the HTTP API server
    Serve {
        /// Server address
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Ask { .. } => "ask",
            Commands::Chat => "chat",
            Commands::RandomWord => "random-word",
            Commands::Stats { .. } => "stats",
            Commands::Serve { .. } => "serve",
            Commands::Config => "config",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "norsk_lexicon={},tower_http=warn",
            level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Norsk Lexicon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli::helpers::load_config(cli.config.as_deref(), &cli.sources)?;

    let command = cli.command.name();
    let result = match cli.command {
        Commands::Ask { query } => cli::ask::handle(config, query.join(" ")).await,
        Commands::Chat => cli::chat::handle(config).await,
        Commands::RandomWord => cli::random_word::handle(config).await,
        Commands::Stats { format } => cli::stats::handle(config, &format).await,
        Commands::Serve { addr } => cli::serve::handle(config, &addr).await,
        Commands::Config => cli::config::handle(&config),
    };

    result.with_context(|| format!("norsk-lexicon {} failed", command))
}
