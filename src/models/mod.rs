//! Core data models for dues-cli
//!
//! Members, their payments, and the money and ID types they are built from.

pub mod ids;
pub mod member;
pub mod money;
pub mod month;
pub mod payment;

pub use ids::{MemberId, PaymentId};
pub use member::{Member, MemberValidationError, PaymentFrequency};
pub use money::{Money, MoneyParseError, MonthlyAmount};
pub use month::{MonthParseError, YearMonth};
pub use payment::{Payment, PaymentStatus, PaymentValidationError};
