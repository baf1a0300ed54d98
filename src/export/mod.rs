//! Export module for dues-cli
//!
//! - CSV: members (with due status) and payments, spreadsheet-compatible
//! - JSON: machine-readable full export with schema version
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_members_csv, export_payments_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
