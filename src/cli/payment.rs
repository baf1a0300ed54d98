//! Payment CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use super::{local_now, parse_money, parse_month, parse_status, parse_timestamp};
use crate::config::Settings;
use crate::display::format_payment_list;
use crate::error::DuesResult;
use crate::services::{MemberService, NewPayment, PaymentService};
use crate::storage::Storage;

/// Payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment
    Add {
        /// Member name or ID
        member: String,
        /// Amount (default: the member's dues amount)
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment date (YYYY-MM-DD or RFC 3339, default: now)
        #[arg(short, long)]
        date: Option<String>,
        /// Status (paid, unpaid, overdue)
        #[arg(short, long, default_value = "paid")]
        status: String,
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List payments
    List {
        /// Only payments for this member (name or ID)
        #[arg(short = 'M', long)]
        member: Option<String>,
        /// Only payments dated in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Change a payment's status
    Status {
        /// Payment ID
        payment: String,
        /// New status (paid, unpaid, overdue)
        status: String,
    },
    /// Delete a payment
    Delete {
        /// Payment ID
        payment: String,
    },
}

/// Handle a payment command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> DuesResult<()> {
    let service = PaymentService::new(storage);
    let members = MemberService::new(storage);

    match cmd {
        PaymentCommands::Add {
            member,
            amount,
            date,
            status,
            memo,
        } => {
            let found = members.require(&member)?;
            let payment_date = match date {
                Some(d) => parse_timestamp(&d)?,
                None => local_now(),
            };

            let payment = service.record(NewPayment {
                member_id: found.id,
                amount: amount.as_deref().map(parse_money).transpose()?,
                payment_date,
                status: parse_status(&status)?,
                memo,
            })?;

            println!(
                "Recorded {} payment of {} for {} on {}",
                payment.status,
                settings.format_money(payment.amount),
                found.name,
                settings.format_date(payment.paid_on())
            );
            println!("  ID: {}", payment.id);
        }

        PaymentCommands::List { member, month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let payments = match (member, month) {
                (Some(m), month) => {
                    let mut payments = service.list_for_member(members.require(&m)?.id)?;
                    if let Some(month) = month {
                        payments.retain(|p| month.contains(p.paid_on()));
                    }
                    payments
                }
                (None, Some(month)) => service.list_for_month(month)?,
                (None, None) => service.list()?,
            };

            let names: HashMap<_, _> = members
                .list(true)?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect();
            print!("{}", format_payment_list(&payments, &names, settings));
        }

        PaymentCommands::Status { payment, status } => {
            let updated = service.set_status(&payment, parse_status(&status)?)?;
            println!("Payment {} is now {}", updated.id, updated.status);
        }

        PaymentCommands::Delete { payment } => {
            let removed = service.delete(&payment)?;
            println!(
                "Deleted payment {} ({})",
                removed.id,
                settings.format_money(removed.amount)
            );
        }
    }

    Ok(())
}
