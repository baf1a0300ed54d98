//! Service layer for dues-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging, and cross-entity operations such as
//! joining members with their payments for the due-date engine.

pub mod due;
pub mod member;
pub mod payment;
pub mod reminder;

pub use due::{DueService, MemberDue};
pub use member::{MemberService, MemberUpdate, NewMember};
pub use payment::{NewPayment, PaymentService};
pub use reminder::{Reminder, ReminderService};
