//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod due;
pub mod export;
pub mod member;
pub mod payment;
pub mod report;

pub use audit::handle_audit_command;
pub use due::{handle_due_command, DueCommands};
pub use export::{handle_export_command, ExportCommands};
pub use member::{handle_member_command, MemberCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

use crate::error::{DuesError, DuesResult};
use crate::models::{Money, PaymentFrequency, PaymentStatus, YearMonth};

/// Today's date, or the `--as-of` override
pub(crate) fn today_or(as_of: Option<&str>) -> DuesResult<NaiveDate> {
    match as_of {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_date(s: &str) -> DuesResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        DuesError::InvalidInput(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

/// The current time in the local offset
pub(crate) fn local_now() -> DateTime<FixedOffset> {
    Local::now().into()
}

/// Parse a payment timestamp
///
/// RFC 3339 input keeps its offset. A bare date is midnight in the local
/// timezone, so its calendar date is always the date typed.
pub(crate) fn parse_timestamp(s: &str) -> DuesResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Ok(dt);
    }
    let date = parse_date(s)?;
    Local
        .offset_from_utc_date(&date)
        .from_local_datetime(&date.and_time(NaiveTime::default()))
        .single()
        .ok_or_else(|| DuesError::InvalidInput(format!("Invalid date '{}'", s)))
}

pub(crate) fn parse_money(s: &str) -> DuesResult<Money> {
    Money::parse(s).map_err(|e| {
        DuesError::InvalidInput(format!(
            "{}. Use a format like '25.00' or '25'",
            e
        ))
    })
}

pub(crate) fn parse_frequency(s: &str) -> DuesResult<PaymentFrequency> {
    PaymentFrequency::parse(s).ok_or_else(|| {
        let valid: Vec<_> = PaymentFrequency::ALL.iter().map(|f| f.as_str()).collect();
        DuesError::InvalidInput(format!(
            "Invalid frequency '{}'. Valid frequencies: {}",
            s,
            valid.join(", ")
        ))
    })
}

pub(crate) fn parse_status(s: &str) -> DuesResult<PaymentStatus> {
    PaymentStatus::parse(s).ok_or_else(|| {
        DuesError::InvalidInput(format!(
            "Invalid status '{}'. Valid statuses: paid, unpaid, overdue",
            s
        ))
    })
}

pub(crate) fn parse_month(s: &str) -> DuesResult<YearMonth> {
    YearMonth::parse(s).map_err(|e| DuesError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let date_only = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(date_only.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(date_only.time(), NaiveTime::default());

        let west = parse_timestamp("2025-03-08T20:00:00-08:00").unwrap();
        assert_eq!(west.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        assert_eq!(west.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(
            west,
            chrono::Utc.with_ymd_and_hms(2025, 3, 9, 4, 0, 0).unwrap()
        );
        assert!(parse_timestamp("yesterday").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_parse_inputs_reject_garbage() {
        assert!(parse_date("2025-02-30").unwrap_err().is_invalid_input());
        assert!(parse_money("ten").unwrap_err().is_invalid_input());
        assert!(parse_frequency("fortnightly").unwrap_err().is_invalid_input());
        assert!(parse_status("maybe").unwrap_err().is_invalid_input());
        assert!(parse_month("2025-13").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_today_override() {
        assert_eq!(
            today_or(Some("2025-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }
}
