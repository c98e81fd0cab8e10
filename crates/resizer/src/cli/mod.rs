//! Command handlers for the `resizer` binary.

pub mod config;
pub mod handle;
pub mod run;
pub mod types;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use resizer_core::{Config, InvocationReport, LocalStore, Orchestrator, OutputWriter};

use self::types::OutputFormat;

/// State shared by every command.
pub struct Context {
    pub config: Config,
    /// Config file in use: `--config` or the platform default
    pub config_path: PathBuf,
    pub root_override: Option<PathBuf>,
}

impl Context {
    /// Storage root: `--root` wins over `storage.root`.
    pub fn storage_root(&self) -> PathBuf {
        self.root_override
            .clone()
            .unwrap_or_else(|| self.config.storage_root())
    }

    /// Build an orchestrator over the local bucket directory.
    pub fn orchestrator(&self) -> Orchestrator {
        let store = LocalStore::new(self.storage_root());
        tracing::debug!("Storage root: {}", store.root().display());
        Orchestrator::new(&self.config, Arc::new(store))
    }
}

/// Print reports to stdout in the requested format.
pub fn emit_reports(reports: &[InvocationReport], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format.into(), true);
    match format {
        OutputFormat::Json if reports.len() == 1 => writer.write(&reports[0])?,
        _ => writer.write_all(reports)?,
    }
    writer.flush()
}
