//! Audit logging for dues-cli
//!
//! Records every create, update and delete of members and payments, with
//! before/after values, in an append-only JSONL file.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
