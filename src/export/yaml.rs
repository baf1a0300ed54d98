//! YAML Export functionality
//!
//! Human-readable variant of the full JSON export.

use std::io::Write;

use crate::error::{DuesError, DuesResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write + ?Sized>(storage: &Storage, writer: &mut W) -> DuesResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# dues-cli export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| DuesError::Export(e.to_string()))?;

    Ok(())
}
