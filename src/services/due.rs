//! Due service
//!
//! Joins active members with their payments and runs the due-date engine
//! over them at a given "today".

use chrono::NaiveDate;

use crate::engine::{self, DueStatus, DueSummary};
use crate::error::DuesResult;
use crate::models::Member;
use crate::storage::Storage;

/// A member together with their derived due summary
#[derive(Debug, Clone)]
pub struct MemberDue {
    pub member: Member,
    pub summary: DueSummary,
}

impl MemberDue {
    pub fn status(&self) -> DueStatus {
        self.summary.status
    }
}

/// Service for due-date queries
pub struct DueService<'a> {
    storage: &'a Storage,
    reminder_window_days: u32,
}

impl<'a> DueService<'a> {
    pub fn new(storage: &'a Storage, reminder_window_days: u32) -> Self {
        Self {
            storage,
            reminder_window_days,
        }
    }

    pub fn reminder_window_days(&self) -> u32 {
        self.reminder_window_days
    }

    /// Due summary for one member
    pub fn summary_for(&self, member: &Member, today: NaiveDate) -> DuesResult<DueSummary> {
        let payments = self.storage.payments.get_by_member(member.id)?;
        Ok(engine::summarize(
            member,
            &payments,
            self.reminder_window_days,
            today,
        ))
    }

    /// Due summaries for every active member, soonest due first
    pub fn summaries(&self, today: NaiveDate) -> DuesResult<Vec<MemberDue>> {
        let members = self.storage.members.get_active()?;
        let payments = self.storage.payments.group_by_member()?;

        let mut dues: Vec<MemberDue> = members
            .into_iter()
            .map(|member| {
                let member_payments = payments
                    .get(&member.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let summary = engine::summarize(
                    &member,
                    member_payments,
                    self.reminder_window_days,
                    today,
                );
                MemberDue { member, summary }
            })
            .collect();

        dues.sort_by(|a, b| {
            a.summary
                .days_until_due
                .cmp(&b.summary.days_until_due)
                .then_with(|| a.member.name.to_lowercase().cmp(&b.member.name.to_lowercase()))
        });
        Ok(dues)
    }

    /// Active members who are due soon or overdue, most overdue first
    pub fn due_members(&self, today: NaiveDate) -> DuesResult<Vec<MemberDue>> {
        let mut dues = self.summaries(today)?;
        dues.retain(|d| d.status().needs_reminder());

        tracing::debug!(
            count = dues.len(),
            window = self.reminder_window_days,
            %today,
            "computed due list"
        );
        Ok(dues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuesPaths;
    use crate::models::{Money, Payment, PaymentFrequency, PaymentStatus};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_member(storage: &Storage, name: &str, start: NaiveDate) -> Member {
        let member = Member::new(name, Money::from_units(20), PaymentFrequency::Monthly, start);
        storage.members.upsert(member.clone()).unwrap();
        member
    }

    #[test]
    fn test_due_members_sorted_most_overdue_first() {
        let (_temp, storage) = create_test_storage();
        // today 2025-03-10
        add_member(&storage, "Current", date(2025, 3, 1)); // due 04-01
        add_member(&storage, "Soon", date(2025, 2, 12)); // due 03-12
        add_member(&storage, "Late", date(2025, 1, 5)); // due 02-05
        add_member(&storage, "Later", date(2025, 2, 1)); // due 03-01

        let service = DueService::new(&storage, 3);
        let due = service.due_members(date(2025, 3, 10)).unwrap();

        let names: Vec<_> = due.iter().map(|d| d.member.name.as_str()).collect();
        assert_eq!(names, vec!["Late", "Later", "Soon"]);
        assert_eq!(due[0].status(), DueStatus::Overdue);
        assert_eq!(due[2].status(), DueStatus::DueSoon);
    }

    #[test]
    fn test_inactive_members_excluded() {
        let (_temp, storage) = create_test_storage();
        let mut member = add_member(&storage, "Gone", date(2024, 1, 1));
        member.deactivate();
        storage.members.upsert(member).unwrap();

        let service = DueService::new(&storage, 3);
        assert!(service.summaries(date(2025, 3, 10)).unwrap().is_empty());
    }

    #[test]
    fn test_paid_payment_moves_due_date() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage, "Alice", date(2025, 1, 5));
        storage
            .payments
            .upsert(Payment::paid(
                member.id,
                Money::from_units(20),
                Utc.with_ymd_and_hms(2025, 3, 8, 9, 0, 0).unwrap(),
            ))
            .unwrap();
        storage
            .payments
            .upsert(Payment::new(
                member.id,
                Money::from_units(20),
                Utc.with_ymd_and_hms(2025, 3, 9, 9, 0, 0).unwrap(),
                PaymentStatus::Unpaid,
            ))
            .unwrap();

        let service = DueService::new(&storage, 3);
        let summary = service.summary_for(&member, date(2025, 3, 10)).unwrap();
        assert_eq!(summary.next_due, date(2025, 4, 8));
        assert_eq!(summary.status, DueStatus::Current);
        assert!(service.due_members(date(2025, 3, 10)).unwrap().is_empty());
    }
}
