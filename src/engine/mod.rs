//! Due-date and status engine
//!
//! Pure functions over borrowed members and payments. The current date is
//! always an explicit argument so results are reproducible; callers pass
//! `Local::now().date_naive()` at the edge. Payments are placed on the
//! calendar by `Payment::paid_on`, the date in their recorded offset.
//!
//! - `schedule`: next due date and last paid date
//! - `status`: current / due soon / overdue classification
//! - `income`: expected and collected monthly income

pub mod income;
pub mod schedule;
pub mod status;

pub use income::{monthly_collected_income, monthly_expected_income, monthly_share};
pub use schedule::{add_months_clamped, interval_months, last_paid_date, next_due_date};
pub use status::{
    is_due, payment_status, summarize, DueStatus, DueSummary, DEFAULT_REMINDER_WINDOW_DAYS,
};
