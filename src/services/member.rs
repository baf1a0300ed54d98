//! Member service
//!
//! Provides business logic for member management: CRUD operations,
//! validation, activation, and cascading deletes.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{DuesError, DuesResult};
use crate::models::{Member, MemberId, Money, PaymentFrequency};
use crate::storage::Storage;

/// Fields for a new member
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub payment_amount: Money,
    pub payment_frequency: PaymentFrequency,
    pub payment_start_date: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl NewMember {
    pub fn new(
        name: impl Into<String>,
        payment_amount: Money,
        payment_frequency: PaymentFrequency,
        payment_start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            payment_amount,
            payment_frequency,
            payment_start_date,
            email: None,
            phone: None,
            notes: None,
        }
    }
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub payment_amount: Option<Money>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub payment_start_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl MemberUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.payment_amount.is_none()
            && self.payment_frequency.is_none()
            && self.payment_start_date.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.notes.is_none()
    }
}

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new member
    pub fn create(&self, new: NewMember) -> DuesResult<Member> {
        let name = new.name.trim();
        if self.storage.members.name_exists(name, None)? {
            return Err(DuesError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            });
        }

        let mut member = Member::new(
            name,
            new.payment_amount,
            new.payment_frequency,
            new.payment_start_date,
        );
        member.email = non_empty(new.email);
        member.phone = non_empty(new.phone);
        member.notes = new.notes.unwrap_or_default();

        member
            .validate()
            .map_err(|e| DuesError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        tracing::info!(member = %member.id, name = %member.name, "created member");
        Ok(member)
    }

    pub fn get(&self, id: MemberId) -> DuesResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by name or ID
    pub fn find(&self, identifier: &str) -> DuesResult<Option<Member>> {
        self.storage.members.find(identifier)
    }

    /// Find a member by name or ID, failing if there is none
    pub fn require(&self, identifier: &str) -> DuesResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| DuesError::member_not_found(identifier))
    }

    /// List members sorted by name
    pub fn list(&self, include_inactive: bool) -> DuesResult<Vec<Member>> {
        if include_inactive {
            self.storage.members.get_all()
        } else {
            self.storage.members.get_active()
        }
    }

    /// Apply a partial update to a member
    pub fn update(&self, id: MemberId, changes: MemberUpdate) -> DuesResult<Member> {
        let before = self
            .get(id)?
            .ok_or_else(|| DuesError::member_not_found(id.to_string()))?;
        let mut member = before.clone();
        let mut diffs = Vec::new();

        if let Some(name) = changes.name {
            let name = name.trim().to_string();
            if name != member.name {
                if self.storage.members.name_exists(&name, Some(id))? {
                    return Err(DuesError::Duplicate {
                        entity_type: "Member",
                        identifier: name,
                    });
                }
                diffs.push(format!("name: {} -> {}", member.name, name));
                member.name = name;
            }
        }

        if let Some(amount) = changes.payment_amount {
            if amount != member.payment_amount {
                diffs.push(format!("amount: {} -> {}", member.payment_amount, amount));
                member.set_payment_amount(amount);
            }
        }

        if let Some(frequency) = changes.payment_frequency {
            if frequency != member.payment_frequency {
                diffs.push(format!(
                    "frequency: {} -> {}",
                    member.payment_frequency, frequency
                ));
                member.set_payment_frequency(frequency);
            }
        }

        if let Some(start) = changes.payment_start_date {
            if start != member.payment_start_date {
                diffs.push(format!(
                    "start date: {} -> {}",
                    member.payment_start_date, start
                ));
                member.payment_start_date = start;
            }
        }

        if let Some(email) = changes.email {
            let email = non_empty(Some(email));
            if email != member.email {
                diffs.push("email changed".to_string());
                member.email = email;
            }
        }

        if let Some(phone) = changes.phone {
            let phone = non_empty(Some(phone));
            if phone != member.phone {
                diffs.push("phone changed".to_string());
                member.phone = phone;
            }
        }

        if let Some(notes) = changes.notes {
            if notes != member.notes {
                diffs.push("notes changed".to_string());
                member.notes = notes;
            }
        }

        if diffs.is_empty() {
            return Ok(member);
        }

        member
            .validate()
            .map_err(|e| DuesError::Validation(e.to_string()))?;
        member.updated_at = chrono::Utc::now();

        self.save_update(&before, &member, diffs.join(", "))?;
        Ok(member)
    }

    /// Activate or deactivate a member
    pub fn set_active(&self, id: MemberId, active: bool) -> DuesResult<Member> {
        let before = self
            .get(id)?
            .ok_or_else(|| DuesError::member_not_found(id.to_string()))?;

        if before.active == active {
            return Ok(before);
        }

        let mut member = before.clone();
        if active {
            member.activate();
        } else {
            member.deactivate();
        }

        self.save_update(
            &before,
            &member,
            format!("active: {} -> {}", before.active, member.active),
        )?;
        Ok(member)
    }

    /// Delete a member and all of their payments
    ///
    /// Returns the removed member and the number of payments removed with it.
    pub fn delete(&self, id: MemberId) -> DuesResult<(Member, usize)> {
        let member = self
            .storage
            .members
            .delete(id)?
            .ok_or_else(|| DuesError::member_not_found(id.to_string()))?;

        let removed_payments = self.storage.payments.delete_by_member(id)?;

        self.storage.members.save()?;
        self.storage.payments.save()?;

        for payment in &removed_payments {
            self.storage.log_delete(
                EntityType::Payment,
                payment.id.to_string(),
                Some(member.name.clone()),
                payment,
            )?;
        }
        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        tracing::info!(
            member = %member.id,
            payments = removed_payments.len(),
            "deleted member"
        );
        Ok((member, removed_payments.len()))
    }

    fn save_update(&self, before: &Member, after: &Member, diff: String) -> DuesResult<()> {
        self.storage.members.upsert(after.clone())?;
        self.storage.members.save()?;

        self.storage.log_update(
            EntityType::Member,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            Some(diff),
        )?;

        tracing::info!(member = %after.id, "updated member");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuesPaths;
    use crate::models::Payment;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn new_member(name: &str) -> NewMember {
        NewMember::new(
            name,
            Money::from_units(30),
            PaymentFrequency::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_create_member() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let mut new = new_member("  Alice  ");
        new.email = Some("alice@example.org".into());
        new.phone = Some("   ".into());
        let member = service.create(new).unwrap();

        assert_eq!(member.name, "Alice");
        assert_eq!(member.email.as_deref(), Some("alice@example.org"));
        assert!(member.phone.is_none());
        assert!(service.find("alice").unwrap().is_some());
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        service.create(new_member("Alice")).unwrap();
        let result = service.create(new_member("ALICE"));
        assert!(matches!(result, Err(DuesError::Duplicate { .. })));

        service.create(new_member("Émile")).unwrap();
        let result = service.create(new_member("émile"));
        assert!(matches!(result, Err(DuesError::Duplicate { .. })));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let mut new = new_member("Alice");
        new.payment_amount = Money::zero();
        let err = service.create(new).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_amount_above_limit_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let mut new = new_member("Big");
        new.payment_amount = Money::from_units(100_000_000_000_000);
        assert!(service.create(new).unwrap_err().is_validation());

        let member = service.create(new_member("Alice")).unwrap();
        let update = MemberUpdate {
            payment_amount: Some(Money::from_units(100_000_000_000_000)),
            ..Default::default()
        };
        assert!(service.update(member.id, update).unwrap_err().is_validation());
        assert_eq!(
            service.get(member.id).unwrap().unwrap().payment_amount,
            Money::from_units(30)
        );
    }

    #[test]
    fn test_update_member() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let member = service.create(new_member("Alice")).unwrap();

        let updated = service
            .update(
                member.id,
                MemberUpdate {
                    payment_amount: Some(Money::from_units(45)),
                    payment_frequency: Some(PaymentFrequency::Quarterly),
                    ..MemberUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.payment_amount, Money::from_units(45));
        assert_eq!(updated.payment_frequency, PaymentFrequency::Quarterly);

        let entries = storage.audit().read_all().unwrap();
        let diff = entries.last().unwrap().diff_summary.clone().unwrap();
        assert!(diff.contains("amount: $30.00 -> $45.00"));
        assert!(diff.contains("frequency: Monthly -> Quarterly"));
    }

    #[test]
    fn test_update_rename_conflict() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        service.create(new_member("Alice")).unwrap();
        let bob = service.create(new_member("Bob")).unwrap();

        let result = service.update(
            bob.id,
            MemberUpdate {
                name: Some("alice".into()),
                ..MemberUpdate::default()
            },
        );
        assert!(matches!(result, Err(DuesError::Duplicate { .. })));
    }

    #[test]
    fn test_deactivate_hides_from_active_list() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let alice = service.create(new_member("Alice")).unwrap();
        service.create(new_member("Bob")).unwrap();

        let alice = service.set_active(alice.id, false).unwrap();
        assert!(!alice.active);
        assert_eq!(service.list(false).unwrap().len(), 1);
        assert_eq!(service.list(true).unwrap().len(), 2);

        assert!(service.set_active(alice.id, true).unwrap().active);
    }

    #[test]
    fn test_delete_cascades_payments() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let alice = service.create(new_member("Alice")).unwrap();
        let bob = service.create(new_member("Bob")).unwrap();

        let date = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        storage
            .payments
            .upsert(Payment::paid(alice.id, Money::from_units(30), date))
            .unwrap();
        storage
            .payments
            .upsert(Payment::paid(bob.id, Money::from_units(30), date))
            .unwrap();

        let (removed, payment_count) = service.delete(alice.id).unwrap();
        assert_eq!(removed.name, "Alice");
        assert_eq!(payment_count, 1);
        assert_eq!(storage.payments.count().unwrap(), 1);
        assert!(service.get(alice.id).unwrap().is_none());
    }

    #[test]
    fn test_require_missing_member() {
        let (_temp, storage) = create_test_storage();
        let service = MemberService::new(&storage);
        let err = service.require("Nobody").unwrap_err();
        assert!(err.is_not_found());
    }
}
