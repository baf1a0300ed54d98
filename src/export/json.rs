//! JSON Export functionality
//!
//! Exports every member and payment to JSON with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DuesError, DuesResult};
use crate::models::{Member, Payment};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub members: Vec<Member>,
    pub payments: Vec<Payment>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub active_member_count: usize,
    pub payment_count: usize,

    /// Date of the earliest payment
    pub earliest_payment: Option<String>,

    /// Date of the latest payment
    pub latest_payment: Option<String>,
}

impl FullExport {
    /// Snapshot storage into an export, checking referential integrity
    pub fn from_storage(storage: &Storage) -> DuesResult<Self> {
        let members = storage.members.get_all()?;
        let payments = storage.payments.get_all()?;

        let earliest_payment = payments
            .iter()
            .map(|p| p.paid_on())
            .min()
            .map(|d| d.to_string());
        let latest_payment = payments
            .iter()
            .map(|p| p.paid_on())
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            member_count: members.len(),
            active_member_count: members.iter().filter(|m| m.active).count(),
            payment_count: payments.len(),
            earliest_payment,
            latest_payment,
        };

        let export = Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            members,
            payments,
            metadata,
        };

        export.validate().map_err(DuesError::Export)?;
        Ok(export)
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let member_ids: HashSet<_> = self.members.iter().map(|m| m.id).collect();
        for payment in &self.payments {
            if !member_ids.contains(&payment.member_id) {
                return Err(format!(
                    "Payment {} references unknown member {}",
                    payment.id, payment.member_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> DuesResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| DuesError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DuesPaths;
    use crate::models::{MemberId, Money, PaymentFrequency};
    use chrono::{NaiveDate, TimeZone};
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
            Money::from_units(40),
            PaymentFrequency::Quarterly,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        storage.members.upsert(member.clone()).unwrap();
        member
    }

    #[test]
    fn test_full_export() {
        let (_temp, storage) = create_test_storage();
        let member = add_member(&storage);
        for day in [3, 20] {
            storage
                .payments
                .upsert(Payment::paid(
                    member.id,
                    Money::from_units(40),
                    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
                ))
                .unwrap();
        }

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.member_count, 1);
        assert_eq!(export.metadata.payment_count, 2);
        assert_eq!(export.metadata.earliest_payment.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_payment.as_deref(), Some("2025-01-20"));
    }

    #[test]
    fn test_orphaned_payment_fails_export() {
        let (_temp, storage) = create_test_storage();
        storage
            .payments
            .upsert(Payment::paid(
                MemberId::new(),
                Money::from_units(10),
                Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap(),
            ))
            .unwrap();

        let result = FullExport::from_storage(&storage);
        assert!(matches!(result, Err(DuesError::Export(_))));
    }

    #[test]
    fn test_json_output_parses_back() {
        let (_temp, storage) = create_test_storage();
        add_member(&storage);

        let mut out = Vec::new();
        export_full_json(&storage, &mut out, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&out).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.members[0].name, "Alice");
        assert_eq!(parsed.members[0].payment_frequency, PaymentFrequency::Quarterly);
    }
}
