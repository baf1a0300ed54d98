//! CSV Export functionality
//!
//! Exports members (with their computed due status) and payments to CSV.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::DueStatus;
use crate::error::{DuesError, DuesResult};
use crate::models::PaymentStatus;
use crate::services::DueService;
use crate::storage::Storage;

#[derive(Serialize)]
struct MemberRow<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    amount: String,
    frequency: &'static str,
    start_date: NaiveDate,
    active: bool,
    last_paid: Option<NaiveDate>,
    next_due: Option<NaiveDate>,
    days_until_due: Option<i64>,
    status: &'static str,
}

#[derive(Serialize)]
struct PaymentRow<'a> {
    id: String,
    member: &'a str,
    amount: String,
    date: String,
    status: &'static str,
    memo: &'a str,
}

/// Export all members to CSV
///
/// Due columns are filled for active members only and computed at `today`.
pub fn export_members_csv<W: Write>(
    storage: &Storage,
    writer: W,
    today: NaiveDate,
    reminder_window_days: u32,
) -> DuesResult<()> {
    let due_service = DueService::new(storage, reminder_window_days);
    let summaries: HashMap<_, _> = due_service
        .summaries(today)?
        .into_iter()
        .map(|d| (d.member.id, d.summary))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);

    for member in storage.members.get_all()? {
        let summary = summaries.get(&member.id);
        let status = match summary.map(|s| s.status) {
            Some(DueStatus::Overdue) => "overdue",
            Some(DueStatus::DueSoon) => "due-soon",
            Some(DueStatus::Current) => "current",
            None => "inactive",
        };

        csv.serialize(MemberRow {
            id: member.id.as_uuid().to_string(),
            name: &member.name,
            email: member.email.as_deref().unwrap_or_default(),
            phone: member.phone.as_deref().unwrap_or_default(),
            amount: member.payment_amount.to_decimal_string(),
            frequency: member.payment_frequency.as_str(),
            start_date: member.payment_start_date,
            active: member.active,
            last_paid: summary.and_then(|s| s.last_paid).map(|d| d.date_naive()),
            next_due: summary.map(|s| s.next_due),
            days_until_due: summary.map(|s| s.days_until_due),
            status,
        })?;
    }

    csv.flush().map_err(|e| DuesError::Export(e.to_string()))?;
    Ok(())
}

/// Export all payments to CSV, most recent first
pub fn export_payments_csv<W: Write>(storage: &Storage, writer: W) -> DuesResult<()> {
    let names: HashMap<_, _> = storage
        .members
        .get_all()?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);

    for payment in storage.payments.get_all()? {
        let member = names
            .get(&payment.member_id)
            .map(String::as_str)
            .unwrap_or("Unknown");

        csv.serialize(PaymentRow {
            id: payment.id.as_uuid().to_string(),
            member,
            amount: payment.amount.to_decimal_string(),
            date: payment.payment_date.to_rfc3339(),
            status: match payment.status {
                PaymentStatus::Paid => "paid",
                PaymentStatus::Unpaid => "unpaid",
                PaymentStatus::Overdue => "overdue",
            },
            memo: &payment.memo,
        })?;
    }

    csv.flush().map_err(|e| DuesError::Export(e.to_string()))?;
    Ok(())
}
