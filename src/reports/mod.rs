//! Reports module for dues-cli
//!
//! Provides the monthly income report: expected versus collected dues and
//! a breakdown of members by due status.

pub mod income;

pub use income::{FrequencyBreakdown, IncomeReport, StatusCounts};
