//! Due status and reminder CLI commands

use std::io;

use clap::Subcommand;

use super::today_or;
use crate::config::Settings;
use crate::display::format_due_table;
use crate::error::DuesResult;
use crate::services::{DueService, ReminderService};
use crate::storage::Storage;

/// Due subcommands
#[derive(Subcommand)]
pub enum DueCommands {
    /// Show due status for every active member
    Status {
        /// Reminder window in days (default: from config)
        #[arg(short, long)]
        window: Option<u32>,
        /// Only members who are due soon or overdue
        #[arg(short, long)]
        due_only: bool,
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Print reminder messages for members who are due soon or overdue
    Remind {
        /// Reminder window in days (default: from config)
        #[arg(short, long)]
        window: Option<u32>,
        /// Message template; supports {name}, {amount}, {due_date}, {status}
        #[arg(short, long)]
        template: Option<String>,
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
}

/// Handle a due command
pub fn handle_due_command(storage: &Storage, settings: &Settings, cmd: DueCommands) -> DuesResult<()> {
    match cmd {
        DueCommands::Status {
            window,
            due_only,
            as_of,
        } => {
            let today = today_or(as_of.as_deref())?;
            let service = DueService::new(storage, window.unwrap_or(settings.reminder_window_days));

            let dues = if due_only {
                service.due_members(today)?
            } else {
                service.summaries(today)?
            };

            println!(
                "Due status as of {} (reminder window: {} days)\n",
                settings.format_date(today),
                service.reminder_window_days()
            );
            print!("{}", format_due_table(&dues, settings));
        }

        DueCommands::Remind {
            window,
            template,
            as_of,
        } => {
            let today = today_or(as_of.as_deref())?;
            let due = DueService::new(storage, window.unwrap_or(settings.reminder_window_days))
                .due_members(today)?;

            let mut reminders = ReminderService::new(settings);
            if let Some(template) = template {
                reminders = reminders.with_template(template);
            }

            let list = reminders.build(&due);
            if list.is_empty() {
                println!("No members are due. Nothing to send.");
                return Ok(());
            }

            let stdout = io::stdout();
            let sent = reminders.dispatch(&list, &mut stdout.lock())?;
            println!("{} reminder(s) prepared.", sent);
        }
    }

    Ok(())
}
