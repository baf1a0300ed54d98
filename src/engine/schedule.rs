//! Due-date projection
//!
//! A member's next due date is one frequency interval after their most recent
//! paid payment, or after their payment start date if nothing has been paid.

use chrono::{DateTime, FixedOffset, Months, NaiveDate};

use crate::models::{Member, Payment, PaymentFrequency};

/// Calendar months between two dues for a frequency
///
/// `Unrecognized` frequencies fall back to a monthly interval.
pub fn interval_months(frequency: PaymentFrequency) -> u32 {
    match frequency {
        PaymentFrequency::Monthly => 1,
        PaymentFrequency::Quarterly => 3,
        PaymentFrequency::SemiAnnual => 6,
        PaymentFrequency::Yearly => 12,
        PaymentFrequency::Unrecognized => 1,
    }
}

/// Add whole months to a date, clamping to the last day of the target month
///
/// Jan 31 + 1 month is Feb 28 (Feb 29 in leap years); Feb 29 + 1 year is
/// Feb 28. Dates past the end of the supported calendar saturate to
/// `NaiveDate::MAX`.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Project the next due date for a member
///
/// The anchor is `last_paid` when present, otherwise the member's payment
/// start date.
pub fn next_due_date(member: &Member, last_paid: Option<NaiveDate>) -> NaiveDate {
    let anchor = last_paid.unwrap_or(member.payment_start_date);
    add_months_clamped(anchor, interval_months(member.payment_frequency))
}

/// The payment date of the most recent `Paid` payment, if any
///
/// Callers pass one member's payments; unpaid and overdue records are
/// ignored. Payments compare by instant, whatever offset each was recorded
/// in. Ties on the exact same instant are not disambiguated.
pub fn last_paid_date<'a, I>(payments: I) -> Option<DateTime<FixedOffset>>
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .filter(|p| p.status.is_paid())
        .map(|p| p.payment_date)
        .max()
}
