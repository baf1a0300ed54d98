//! Income aggregates
//!
//! Expected income spreads every active member's dues over a month; collected
//! income sums the paid payments that landed in a given month.

use crate::models::{Member, Money, MonthlyAmount, Payment, PaymentFrequency, YearMonth};

/// The monthly-equivalent contribution of one member
///
/// Inactive members and members with an unrecognized frequency contribute zero.
pub fn monthly_share(member: &Member) -> MonthlyAmount {
    if !member.active {
        return MonthlyAmount::zero();
    }

    let per_year = match member.payment_frequency {
        PaymentFrequency::Monthly => 12,
        PaymentFrequency::Quarterly => 4,
        PaymentFrequency::SemiAnnual => 2,
        PaymentFrequency::Yearly => 1,
        PaymentFrequency::Unrecognized => 0,
    };

    MonthlyAmount::share_of(member.payment_amount, per_year)
}

/// Total monthly-equivalent income expected from all active members
pub fn monthly_expected_income<'a, I>(members: I) -> MonthlyAmount
where
    I: IntoIterator<Item = &'a Member>,
{
    members.into_iter().map(monthly_share).sum()
}

/// Total of `Paid` payments whose recorded calendar date falls in `month`
///
/// A payment belongs to the month of [`Payment::paid_on`], the date in the
/// offset it was recorded with. The whole month counts, first day included.
pub fn monthly_collected_income<'a, I>(payments: I, month: YearMonth) -> Money
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .filter(|p| p.status.is_paid() && month.contains(p.paid_on()))
        .map(|p| p.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberId, PaymentStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn member(amount: i64, frequency: PaymentFrequency) -> Member {
        Member::new("Test", Money::from_units(amount), frequency, start())
    }

    #[test]
    fn test_expected_income_mixed_frequencies() {
        let members = vec![
            member(600, PaymentFrequency::Yearly),
            member(1200, PaymentFrequency::Monthly),
        ];
        let total = monthly_expected_income(&members);
        assert!(total.is_whole_cents());
        assert_eq!(total.rounded(), Money::from_units(1250));
    }

    #[test]
    fn test_inactive_member_contributes_nothing() {
        let mut inactive = member(5000, PaymentFrequency::Monthly);
        inactive.deactivate();
        let members = vec![member(1200, PaymentFrequency::Monthly), inactive];

        assert_eq!(
            monthly_expected_income(&members).rounded(),
            Money::from_units(1200)
        );
    }

    #[test]
    fn test_unrecognized_frequency_contributes_nothing() {
        let members = vec![member(900, PaymentFrequency::Unrecognized)];
        assert_eq!(monthly_expected_income(&members), MonthlyAmount::zero());
    }

    #[test]
    fn test_fractional_shares_are_not_rounded_in_aggregate() {
        // $10 quarterly three times: each share is $3.333..., total exactly $10
        let members = vec![
            member(10, PaymentFrequency::Quarterly),
            member(10, PaymentFrequency::Quarterly),
            member(10, PaymentFrequency::Quarterly),
        ];
        let total = monthly_expected_income(&members);
        assert_eq!(total.rounded(), Money::from_units(10));

        // Rounding each share first would have lost a cent
        let pre_rounded: Money = members.iter().map(|m| monthly_share(m).rounded()).sum();
        assert_eq!(pre_rounded.cents(), 999);
    }

    #[test]
    fn test_semi_annual_share() {
        let share = monthly_share(&member(60, PaymentFrequency::SemiAnnual));
        assert_eq!(share.rounded(), Money::from_units(10));
    }

    #[test]
    fn test_collected_income_for_month() {
        let id = MemberId::new();
        let jan = YearMonth::new(2025, 1).unwrap();
        let payments = vec![
            Payment::paid(id, Money::from_units(50), Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()),
            Payment::paid(id, Money::from_units(20), Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap()),
            // adjacent months
            Payment::paid(id, Money::from_units(100), Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap()),
            Payment::paid(id, Money::from_units(100), Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
            // not paid
            Payment::new(
                id,
                Money::from_units(300),
                Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
                PaymentStatus::Unpaid,
            ),
        ];

        assert_eq!(monthly_collected_income(&payments, jan), Money::from_units(70));
    }

    #[test]
    fn test_collected_income_includes_first_instant() {
        let id = MemberId::new();
        let payments = vec![Payment::paid(
            id,
            Money::from_units(40),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        )];
        let march = YearMonth::new(2025, 3).unwrap();
        assert_eq!(monthly_collected_income(&payments, march), Money::from_units(40));
    }

    #[test]
    fn test_collected_income_uses_recorded_date() {
        let id = MemberId::new();
        let at = |s: &str| chrono::DateTime::parse_from_rfc3339(s).unwrap();
        let payments = vec![
            // February 1 in UTC, still January 31 where it was paid
            Payment::paid(id, Money::from_units(15), at("2025-01-31T22:00:00-05:00")),
            // January 31 in UTC, already February 1 where it was paid
            Payment::paid(id, Money::from_units(25), at("2025-02-01T08:00:00+09:00")),
        ];

        let jan = YearMonth::new(2025, 1).unwrap();
        let feb = YearMonth::new(2025, 2).unwrap();
        assert_eq!(monthly_collected_income(&payments, jan), Money::from_units(15));
        assert_eq!(monthly_collected_income(&payments, feb), Money::from_units(25));
    }

    #[test]
    fn test_collected_income_empty() {
        let payments: Vec<Payment> = Vec::new();
        let month = YearMonth::new(2025, 1).unwrap();
        assert!(monthly_collected_income(&payments, month).is_zero());
    }
}
