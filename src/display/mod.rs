//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for members, payments, and due status.

pub mod due;
pub mod member;
pub mod payment;

pub use due::format_due_table;
pub use member::{describe_days, format_member_details, format_member_list};
pub use payment::format_payment_list;
