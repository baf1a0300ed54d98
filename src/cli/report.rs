//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_month, today_or};
use crate::config::Settings;
use crate::error::{DuesError, DuesResult};
use crate::models::YearMonth;
use crate::reports::IncomeReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expected versus collected income for a month
    Income {
        /// Month to report on (YYYY-MM, default: the month containing today)
        #[arg(short, long)]
        month: Option<String>,
        /// Classify members as of this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        /// Write the report as CSV to this file instead of printing it
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> DuesResult<()> {
    match cmd {
        ReportCommands::Income { month, as_of, csv } => {
            let today = today_or(as_of.as_deref())?;
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => YearMonth::of(today),
            };

            let report =
                IncomeReport::generate(storage, month, today, settings.reminder_window_days)?;

            match csv {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        DuesError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    report.export_csv(BufWriter::new(file))?;
                    println!("Income report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(settings)),
            }
        }
    }

    Ok(())
}
