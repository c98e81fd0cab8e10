//! Resizer CLI - derivative-image generation for storage uploads.
//!
//! Runs the resize pipeline against a local bucket directory, either from a
//! storage-event notification document or for a single key.
//!
//! # Usage
//!
//! ```bash
//! # Handle an object-created notification
//! resizer handle event.json
//!
//! # Same, reading the notification from stdin
//! cat event.json | resizer handle -
//!
//! # Render one key directly
//! resizer run --bucket media --key origin/article/photo.jpg
//!
//! # View configuration
//! resizer config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Resizer - derivative-image generation for storage uploads.
#[derive(Parser, Debug)]
#[command(name = "resizer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "RESIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Local storage root, overriding `storage.root`
    #[arg(long, global = true, env = "RESIZER_STORAGE_ROOT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pipeline for every record of a storage event
    Handle(cli::handle::HandleArgs),

    /// Run the pipeline for a single bucket/key
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(resizer_core::Config::default_path);
    let config = match &cli.config {
        Some(path) if path.exists() => resizer_core::Config::load_from(path)?,
        Some(_) => resizer_core::Config::default(),
        None => match resizer_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `resizer config path`."
                );
                resizer_core::Config::default()
            }
        },
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Resizer v{}", resizer_core::VERSION);

    let ctx = cli::Context {
        config,
        config_path,
        root_override: cli.root,
    };

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Handle(args) => cli::handle::execute(&ctx, args).await,
        Commands::Run(args) => cli::run::execute(&ctx, args).await,
        Commands::Config(args) => cli::config::execute(&ctx, args).await,
    }
}
