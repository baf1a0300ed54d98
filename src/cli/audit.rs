//! Audit log CLI command

use crate::error::DuesResult;
use crate::storage::Storage;

/// Print the most recent audit log entries
pub fn handle_audit_command(storage: &Storage, limit: usize) -> DuesResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!(
        "\nShowing {} entries from {}",
        entries.len(),
        storage.audit().path().display()
    );

    Ok(())
}
