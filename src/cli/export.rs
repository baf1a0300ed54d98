//! CLI commands for data export
//!
//! Writes to a file when `--output` is given, otherwise to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::today_or;
use crate::config::Settings;
use crate::error::{DuesError, DuesResult};
use crate::export::{export_full_json, export_full_yaml, export_members_csv, export_payments_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export members (with next due date and status) to CSV
    Members {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Evaluate due status as of this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Export payments to CSV
    Payments {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export everything to JSON
    Json {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Export everything to YAML
    Yaml {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> DuesResult<()> {
    match cmd {
        ExportCommands::Members { output, as_of } => {
            let today = today_or(as_of.as_deref())?;
            with_output(output.as_deref(), "Members", |w| {
                export_members_csv(storage, w, today, settings.reminder_window_days)
            })
        }
        ExportCommands::Payments { output } => {
            with_output(output.as_deref(), "Payments", |w| export_payments_csv(storage, w))
        }
        ExportCommands::Json { output, compact } => {
            with_output(output.as_deref(), "Full database", |w| {
                export_full_json(storage, w, !compact)
            })
        }
        ExportCommands::Yaml { output } => {
            with_output(output.as_deref(), "Full database", |w| {
                export_full_yaml(storage, w)
            })
        }
    }
}

fn with_output<F>(output: Option<&Path>, what: &str, export: F) -> DuesResult<()>
where
    F: FnOnce(&mut dyn Write) -> DuesResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                DuesError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| DuesError::Export(e.to_string()))?;

            tracing::info!(path = %path.display(), "export written");
            println!("{} exported to: {}", what, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
