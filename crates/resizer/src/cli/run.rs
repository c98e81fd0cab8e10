//! The `resizer run` command: run the pipeline for one key.

use clap::Args;
use resizer_core::keys::decode_event_key;

use super::types::OutputFormat;
use super::{emit_reports, Context};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Bucket containing the source object
    #[arg(short, long)]
    pub bucket: String,

    /// Source key, e.g. `origin/article/photo.jpg`
    #[arg(short, long)]
    pub key: String,

    /// Treat the key as form-encoded, as delivered in event notifications
    #[arg(long)]
    pub encoded: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Execute the run command.
pub async fn execute(ctx: &Context, args: RunArgs) -> anyhow::Result<()> {
    let key = if args.encoded {
        decode_event_key(&args.key)?
    } else {
        args.key
    };

    let report = ctx.orchestrator().process(&args.bucket, &key).await?;
    if report.renditions.is_empty() {
        tracing::info!("No renditions written for {}/{}", args.bucket, key);
    }

    emit_reports(std::slice::from_ref(&report), args.format)?;
    Ok(())
}
