//! Storage layer for dues-cli
//!
//! Flat JSON files (one per collection) with atomic writes, plus the audit
//! log every mutation is recorded in.

pub mod file_io;
pub mod members;
pub mod payments;

pub use file_io::{read_json, write_json_atomic};
pub use members::MemberRepository;
pub use payments::PaymentRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::DuesPaths;
use crate::error::DuesError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: DuesPaths,
    pub members: MemberRepository,
    pub payments: PaymentRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: DuesPaths) -> Result<Self, DuesError> {
        paths.ensure_directories()?;

        Ok(Self {
            members: MemberRepository::new(paths.members_file()),
            payments: PaymentRepository::new(paths.payments_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &DuesPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DuesError> {
        self.members.load()?;
        self.payments.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DuesError> {
        self.members.save()?;
        self.payments.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), DuesError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), DuesError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), DuesError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DuesError> {
    lock.read()
        .map_err(|e| DuesError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DuesError> {
    lock.write()
        .map_err(|e| DuesError::Storage(format!("Failed to acquire write lock: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DuesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());

        storage.load_all().unwrap();
        storage.save_all().unwrap();
        assert!(temp_dir.path().join("data").join("members.json").exists());
        assert!(temp_dir.path().join("data").join("payments.json").exists());
    }
}
