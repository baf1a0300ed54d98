//! Member CLI commands
//!
//! Implements CLI commands for member management.

use clap::Subcommand;

use super::{parse_date, parse_frequency, parse_money, today_or};
use crate::config::Settings;
use crate::display::{format_member_details, format_member_list};
use crate::error::DuesResult;
use crate::services::{DueService, MemberService, MemberUpdate, NewMember, PaymentService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a new member
    Add {
        /// Member name
        name: String,
        /// Dues amount per period (e.g., "25.00" or "25")
        #[arg(short, long)]
        amount: String,
        /// Payment frequency (monthly, quarterly, semi-annual, yearly)
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Payment start date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List members
    List {
        /// Include inactive members
        #[arg(short, long)]
        all: bool,
    },
    /// Show member details, due status, and payments
    Show {
        /// Member name or ID
        member: String,
        /// Evaluate due status as of this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Edit a member
    Edit {
        /// Member name or ID
        member: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        frequency: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        /// New email (empty string clears it)
        #[arg(short, long)]
        email: Option<String>,
        /// New phone (empty string clears it)
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Mark a member active
    Activate {
        /// Member name or ID
        member: String,
    },
    /// Mark a member inactive
    Deactivate {
        /// Member name or ID
        member: String,
    },
    /// Delete a member and all of their payments
    Delete {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MemberCommands,
) -> DuesResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add {
            name,
            amount,
            frequency,
            start,
            email,
            phone,
            notes,
        } => {
            let start = match start {
                Some(s) => parse_date(&s)?,
                None => today_or(None)?,
            };
            let mut new = NewMember::new(
                name,
                parse_money(&amount)?,
                parse_frequency(&frequency)?,
                start,
            );
            new.email = email;
            new.phone = phone;
            new.notes = notes;

            let member = service.create(new)?;

            println!("Added member: {}", member.name);
            println!(
                "  Dues: {} {}",
                settings.format_money(member.payment_amount),
                member.payment_frequency
            );
            println!("  Start date: {}", settings.format_date(member.payment_start_date));
            println!("  ID: {}", member.id);
        }

        MemberCommands::List { all } => {
            let members = service.list(all)?;
            print!("{}", format_member_list(&members, settings));
        }

        MemberCommands::Show { member, as_of } => {
            let today = today_or(as_of.as_deref())?;
            let found = service.require(&member)?;

            let summary = DueService::new(storage, settings.reminder_window_days)
                .summary_for(&found, today)?;
            let payments = PaymentService::new(storage).list_for_member(found.id)?;

            print!(
                "{}",
                format_member_details(&found, &summary, &payments, settings, today)
            );
        }

        MemberCommands::Edit {
            member,
            name,
            amount,
            frequency,
            start,
            email,
            phone,
            notes,
        } => {
            let found = service.require(&member)?;

            let changes = MemberUpdate {
                name,
                payment_amount: amount.as_deref().map(parse_money).transpose()?,
                payment_frequency: frequency.as_deref().map(parse_frequency).transpose()?,
                payment_start_date: start.as_deref().map(parse_date).transpose()?,
                email,
                phone,
                notes,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --help to see editable fields.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated member: {}", updated.name);
        }

        MemberCommands::Activate { member } => {
            let found = service.require(&member)?;
            let updated = service.set_active(found.id, true)?;
            println!("Activated member: {}", updated.name);
        }

        MemberCommands::Deactivate { member } => {
            let found = service.require(&member)?;
            let updated = service.set_active(found.id, false)?;
            println!("Deactivated member: {}", updated.name);
        }

        MemberCommands::Delete { member } => {
            let found = service.require(&member)?;
            let (removed, payment_count) = service.delete(found.id)?;
            println!(
                "Deleted member: {} ({} payment(s) removed)",
                removed.name, payment_count
            );
        }
    }

    Ok(())
}
