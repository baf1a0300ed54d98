//! dues-cli - membership dues tracking from the terminal
//!
//! This library keeps a roster of members who owe recurring dues, records
//! their payments, and derives who is due soon or overdue along with
//! expected and collected monthly income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: Pure due-date, status, and income calculations
//! - `models`: Members, payments, money, and month types
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Income report
//! - `export`: CSV, JSON, and YAML export
//! - `config`: Configuration and path management
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use dues_cli::config::{paths::DuesPaths, settings::Settings};
//! use dues_cli::services::DueService;
//! use dues_cli::storage::Storage;
//!
//! let paths = DuesPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let today = chrono::Local::now().date_naive();
//! let due = DueService::new(&storage, settings.reminder_window_days).due_members(today)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{DuesError, DuesResult};
