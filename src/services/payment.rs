//! Payment service
//!
//! Records dues payments against members and maintains their status.

use chrono::{DateTime, FixedOffset};

use crate::audit::EntityType;
use crate::error::{DuesError, DuesResult};
use crate::models::{Member, MemberId, Money, Payment, PaymentStatus, YearMonth};
use crate::storage::Storage;

/// Fields for a new payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub member_id: MemberId,
    /// Defaults to the member's configured dues amount
    pub amount: Option<Money>,
    pub payment_date: DateTime<FixedOffset>,
    pub status: PaymentStatus,
    pub memo: Option<String>,
}

impl NewPayment {
    pub fn paid(member_id: MemberId, payment_date: impl Into<DateTime<FixedOffset>>) -> Self {
        Self {
            member_id,
            amount: None,
            payment_date: payment_date.into(),
            status: PaymentStatus::Paid,
            memo: None,
        }
    }
}

/// Service for payment management
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment for an existing member
    pub fn record(&self, new: NewPayment) -> DuesResult<Payment> {
        let member = self.member(new.member_id)?;
        let amount = new.amount.unwrap_or(member.payment_amount);

        let mut payment = Payment::new(member.id, amount, new.payment_date, new.status);
        if let Some(memo) = new.memo {
            payment.set_memo(memo);
        }

        payment
            .validate()
            .map_err(|e| DuesError::Validation(e.to_string()))?;

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        self.storage.log_create(
            EntityType::Payment,
            payment.id.to_string(),
            Some(member.name.clone()),
            &payment,
        )?;

        tracing::info!(
            payment = %payment.id,
            member = %member.name,
            amount = %payment.amount,
            status = %payment.status,
            "recorded payment"
        );
        Ok(payment)
    }

    /// Find a payment by short or full ID, failing if there is none
    pub fn require(&self, identifier: &str) -> DuesResult<Payment> {
        self.storage
            .payments
            .find(identifier)?
            .ok_or_else(|| DuesError::payment_not_found(identifier))
    }

    /// All payments, most recent first
    pub fn list(&self) -> DuesResult<Vec<Payment>> {
        self.storage.payments.get_all()
    }

    pub fn list_for_member(&self, member_id: MemberId) -> DuesResult<Vec<Payment>> {
        self.storage.payments.get_by_member(member_id)
    }

    /// Payments whose recorded date falls within a calendar month
    pub fn list_for_month(&self, month: YearMonth) -> DuesResult<Vec<Payment>> {
        let mut payments = self.list()?;
        payments.retain(|p| month.contains(p.paid_on()));
        Ok(payments)
    }

    /// Change the status of a recorded payment
    pub fn set_status(&self, identifier: &str, status: PaymentStatus) -> DuesResult<Payment> {
        let before = self.require(identifier)?;
        if before.status == status {
            return Ok(before);
        }

        let mut payment = before.clone();
        payment.set_status(status);

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        let member_name = self.storage.members.get(payment.member_id)?.map(|m| m.name);
        self.storage.log_update(
            EntityType::Payment,
            payment.id.to_string(),
            member_name,
            &before,
            &payment,
            Some(format!("status: {} -> {}", before.status, payment.status)),
        )?;

        tracing::info!(payment = %payment.id, status = %payment.status, "updated payment status");
        Ok(payment)
    }

    /// Delete a payment
    pub fn delete(&self, identifier: &str) -> DuesResult<Payment> {
        let target = self.require(identifier)?;
        let payment = self
            .storage
            .payments
            .delete(target.id)?
            .ok_or_else(|| DuesError::payment_not_found(identifier))?;
        self.storage.payments.save()?;

        let member_name = self.storage.members.get(payment.member_id)?.map(|m| m.name);
        self.storage.log_delete(
            EntityType::Payment,
            payment.id.to_string(),
            member_name,
            &payment,
        )?;

        tracing::info!(payment = %payment.id, "deleted payment");
        Ok(payment)
    }

    fn member(&self, id: MemberId) -> DuesResult<Member> {
        self.storage
            .members
            .get(id)?
            .ok_or_else(|| DuesError::member_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuesPaths;
    use crate::models::PaymentFrequency;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_member(storage: &Storage) -> Member {
        let member = Member::new(
            "Alice",
            Money::from_units(25),
            PaymentFrequency::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        storage.members.upsert(member.clone()).unwrap();
        member
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_record_defaults_to_member_amount() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage);
        let service = PaymentService::new(&storage);

        let payment = service
            .record(NewPayment::paid(member.id, at(2025, 2, 1)))
            .unwrap();

        assert_eq!(payment.amount, Money::from_units(25));
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(service.list_for_member(member.id).unwrap().len(), 1);
    }

    #[test]
    fn test_record_unknown_member() {
        let (_temp, storage) = create_test_storage();
        let service = PaymentService::new(&storage);

        let err = service
            .record(NewPayment::paid(MemberId::new(), at(2025, 2, 1)))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.payments.count().unwrap(), 0);
    }

    #[test]
    fn test_record_rejects_non_positive_amount() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage);
        let service = PaymentService::new(&storage);

        let mut new = NewPayment::paid(member.id, at(2025, 2, 1));
        new.amount = Some(Money::from_cents(-100));
        assert!(service.record(new).unwrap_err().is_validation());
    }

    #[test]
    fn test_list_for_month() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage);
        let service = PaymentService::new(&storage);

        service.record(NewPayment::paid(member.id, at(2025, 1, 31))).unwrap();
        service.record(NewPayment::paid(member.id, at(2025, 2, 1))).unwrap();
        service.record(NewPayment::paid(member.id, at(2025, 2, 28))).unwrap();
        service.record(NewPayment::paid(member.id, at(2025, 3, 1))).unwrap();

        let feb = YearMonth::new(2025, 2).unwrap();
        assert_eq!(service.list_for_month(feb).unwrap().len(), 2);
    }

    #[test]
    fn test_set_status_and_delete() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage);
        let service = PaymentService::new(&storage);

        let mut new = NewPayment::paid(member.id, at(2025, 2, 1));
        new.status = PaymentStatus::Unpaid;
        let payment = service.record(new).unwrap();
        let short = payment.id.to_string();

        let updated = service.set_status(&short, PaymentStatus::Paid).unwrap();
        assert!(updated.status.is_paid());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(
            entries.last().unwrap().diff_summary.as_deref(),
            Some("status: Unpaid -> Paid")
        );

        service.delete(&short).unwrap();
        assert!(service.require(&short).unwrap_err().is_not_found());
    }
}
