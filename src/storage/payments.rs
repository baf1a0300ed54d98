//! Payment repository for JSON storage
//!
//! Manages loading and saving payments to payments.json, with an index of
//! payment IDs per member.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DuesError;
use crate::models::{MemberId, Payment, PaymentId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PaymentData {
    #[serde(default)]
    payments: Vec<Payment>,
}

pub struct PaymentRepository {
    path: PathBuf,
    data: RwLock<HashMap<PaymentId, Payment>>,
    /// Index: member_id -> payment_ids
    by_member: RwLock<HashMap<MemberId, Vec<PaymentId>>>,
}

impl PaymentRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_member: RwLock::new(HashMap::new()),
        }
    }

    /// Load payments from disk and rebuild the member index
    pub fn load(&self) -> Result<(), DuesError> {
        let file_data: PaymentData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        let mut by_member = write_lock(&self.by_member)?;
        data.clear();
        by_member.clear();

        for payment in file_data.payments {
            by_member.entry(payment.member_id).or_default().push(payment.id);
            data.insert(payment.id, payment);
        }

        tracing::debug!(count = data.len(), "loaded payments");
        Ok(())
    }

    pub fn save(&self) -> Result<(), DuesError> {
        let payments = self.get_all()?;
        write_json_atomic(&self.path, &PaymentData { payments })
    }

    pub fn get(&self, id: PaymentId) -> Result<Option<Payment>, DuesError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Find a payment by short or full ID
    pub fn find(&self, identifier: &str) -> Result<Option<Payment>, DuesError> {
        let data = read_lock(&self.data)?;
        Ok(data.values().find(|p| p.id.matches(identifier)).cloned())
    }

    /// All payments, most recent first
    pub fn get_all(&self) -> Result<Vec<Payment>, DuesError> {
        let data = read_lock(&self.data)?;
        let mut payments: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut payments);
        Ok(payments)
    }

    /// Payments for one member, most recent first
    pub fn get_by_member(&self, member_id: MemberId) -> Result<Vec<Payment>, DuesError> {
        let data = read_lock(&self.data)?;
        let by_member = read_lock(&self.by_member)?;

        let mut payments: Vec<_> = by_member
            .get(&member_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        sort_newest_first(&mut payments);
        Ok(payments)
    }

    /// All payments grouped by member
    pub fn group_by_member(&self) -> Result<HashMap<MemberId, Vec<Payment>>, DuesError> {
        let data = read_lock(&self.data)?;
        let mut grouped: HashMap<MemberId, Vec<Payment>> = HashMap::new();
        for payment in data.values() {
            grouped
                .entry(payment.member_id)
                .or_default()
                .push(payment.clone());
        }
        Ok(grouped)
    }

    pub fn upsert(&self, payment: Payment) -> Result<(), DuesError> {
        let mut data = write_lock(&self.data)?;
        let mut by_member = write_lock(&self.by_member)?;

        // A payment can be re-pointed at a different member on update
        if let Some(old) = data.get(&payment.id) {
            if old.member_id != payment.member_id {
                if let Some(ids) = by_member.get_mut(&old.member_id) {
                    ids.retain(|id| *id != payment.id);
                }
            }
        }

        let ids = by_member.entry(payment.member_id).or_default();
        if !ids.contains(&payment.id) {
            ids.push(payment.id);
        }
        data.insert(payment.id, payment);
        Ok(())
    }

    pub fn delete(&self, id: PaymentId) -> Result<Option<Payment>, DuesError> {
        let mut data = write_lock(&self.data)?;
        let mut by_member = write_lock(&self.by_member)?;

        let removed = data.remove(&id);
        if let Some(payment) = &removed {
            if let Some(ids) = by_member.get_mut(&payment.member_id) {
                ids.retain(|pid| *pid != id);
            }
        }
        Ok(removed)
    }

    /// Remove every payment belonging to a member
    pub fn delete_by_member(&self, member_id: MemberId) -> Result<Vec<Payment>, DuesError> {
        let mut data = write_lock(&self.data)?;
        let mut by_member = write_lock(&self.by_member)?;

        let removed = by_member
            .remove(&member_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| data.remove(&id))
            .collect();
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, DuesError> {
        Ok(read_lock(&self.data)?.len())
    }
}

fn sort_newest_first(payments: &mut [Payment]) {
    payments.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then(b.created_at.cmp(&a.created_at))
    });
}
