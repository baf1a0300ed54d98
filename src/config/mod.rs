//! Configuration module for dues-cli
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DuesPaths;
pub use settings::Settings;
