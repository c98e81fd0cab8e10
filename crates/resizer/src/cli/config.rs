//! The `resizer config` command for configuration management.

use std::path::Path;

use clap::{Args, Subcommand};
use resizer_core::Config;

use super::Context;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration, catalog included
    Show,

    /// Show the config file in use (`--config` or the platform default)
    Path,

    /// Write the default configuration to the config file in use
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(ctx: &Context, args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => print!("{}", ctx.config.to_toml()?),
        ConfigCommand::Path => println!("{}", ctx.config_path.display()),
        ConfigCommand::Init { force } => {
            write_default(&ctx.config_path, force)?;
            println!("Configuration initialized at: {}", ctx.config_path.display());
        }
    }
    Ok(())
}

/// Write the default config to `path`, creating parent directories.
fn write_default(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().to_toml()?)?;
    tracing::info!("Config file created at: {}", path.display());
    Ok(())
}
