//! Due-status classification
//!
//! Classifies a member as current, due soon, or overdue relative to an
//! explicit "today". Nothing here reads the wall clock.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schedule::{last_paid_date, next_due_date};
use crate::models::{Member, MemberId, Payment};

/// Default number of days before the due date at which a member becomes "due soon"
pub const DEFAULT_REMINDER_WINDOW_DAYS: u32 = 3;

/// Derived timeliness of a member's dues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Current,
}

impl DueStatus {
    /// Classify from the signed number of days until the due date
    pub fn from_days_until_due(days: i64, reminder_window_days: u32) -> Self {
        if days < 0 {
            Self::Overdue
        } else if days <= i64::from(reminder_window_days) {
            Self::DueSoon
        } else {
            Self::Current
        }
    }

    /// True for statuses that belong on a reminder list
    pub fn needs_reminder(&self) -> bool {
        matches!(self, Self::DueSoon | Self::Overdue)
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due soon",
            Self::Current => "Current",
        };
        f.pad(label)
    }
}

/// Everything derived about one member's dues at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueSummary {
    pub member_id: MemberId,
    pub last_paid: Option<DateTime<FixedOffset>>,
    pub next_due: NaiveDate,
    /// Signed calendar days from today to the next due date
    pub days_until_due: i64,
    pub status: DueStatus,
}

/// Compute last paid date, next due date, and status for one member
///
/// `payments` should hold only this member's payments.
pub fn summarize<'a, I>(
    member: &Member,
    payments: I,
    reminder_window_days: u32,
    today: NaiveDate,
) -> DueSummary
where
    I: IntoIterator<Item = &'a Payment>,
{
    let last_paid = last_paid_date(payments);
    let next_due = next_due_date(member, last_paid.map(|d| d.date_naive()));
    let days_until_due = (next_due - today).num_days();

    DueSummary {
        member_id: member.id,
        last_paid,
        next_due,
        days_until_due,
        status: DueStatus::from_days_until_due(days_until_due, reminder_window_days),
    }
}

/// Classify a member's payment status at `today`
pub fn payment_status<'a, I>(
    member: &Member,
    payments: I,
    reminder_window_days: u32,
    today: NaiveDate,
) -> DueStatus
where
    I: IntoIterator<Item = &'a Payment>,
{
    summarize(member, payments, reminder_window_days, today).status
}

/// True if the member is due soon or overdue at `today`
///
/// Callers filter to active members; this does not look at the active flag.
pub fn is_due<'a, I>(
    member: &Member,
    payments: I,
    reminder_window_days: u32,
    today: NaiveDate,
) -> bool
where
    I: IntoIterator<Item = &'a Payment>,
{
    payment_status(member, payments, reminder_window_days, today).needs_reminder()
}
