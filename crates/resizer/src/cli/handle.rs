//! The `resizer handle` command: run the pipeline for a storage event.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::Args;
use resizer_core::StorageEvent;

use super::types::OutputFormat;
use super::{emit_reports, Context};

/// Arguments for the `handle` command.
#[derive(Args, Debug)]
pub struct HandleArgs {
    /// Event notification document (JSON), or `-` for stdin
    #[arg(default_value = "-")]
    pub event: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Execute the handle command.
pub async fn execute(ctx: &Context, args: HandleArgs) -> anyhow::Result<()> {
    let event = read_event(&args.event)?;
    tracing::info!("Handling event with {} record(s)", event.records.len());

    let start = Instant::now();
    let reports = ctx.orchestrator().handle_event(&event).await?;

    let written: usize = reports.iter().map(|r| r.renditions.len()).sum();
    tracing::info!(
        "Event complete: {} record(s), {} rendition(s) in {:.2}s",
        reports.len(),
        written,
        start.elapsed().as_secs_f64()
    );

    emit_reports(&reports, args.format)?;
    Ok(())
}

fn read_event(path: &Path) -> anyhow::Result<StorageEvent> {
    if path.as_os_str() == "-" {
        return StorageEvent::from_reader(io::stdin().lock())
            .context("Failed to parse event from stdin");
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open event file: {}", path.display()))?;
    StorageEvent::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse event file: {}", path.display()))
}
