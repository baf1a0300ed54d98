//! Payment model
//!
//! A payment is one recorded dues event for a member. Only `Paid` payments
//! move a member's next due date forward.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{MemberId, PaymentId};
use super::money::Money;

/// Recorded status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Unpaid,
    Overdue,
}

impl PaymentStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "unpaid" | "pending" => Some(Self::Unpaid),
            "overdue" | "late" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::Overdue => "Overdue",
        };
        f.pad(label)
    }
}

/// A single dues payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub amount: Money,
    /// When the payment was made, keeping the UTC offset it was recorded in
    pub payment_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub memo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        member_id: MemberId,
        amount: Money,
        payment_date: impl Into<DateTime<FixedOffset>>,
        status: PaymentStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::new(),
            member_id,
            amount,
            payment_date: payment_date.into(),
            status,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a payment already marked as paid
    pub fn paid(
        member_id: MemberId,
        amount: Money,
        payment_date: impl Into<DateTime<FixedOffset>>,
    ) -> Self {
        Self::new(member_id, amount, payment_date, PaymentStatus::Paid)
    }

    /// Calendar date of the payment as seen by whoever recorded it
    ///
    /// Due dates and monthly income are bucketed by this date, not by UTC.
    pub fn paid_on(&self) -> NaiveDate {
        self.payment_date.date_naive()
    }

    pub fn set_status(&mut self, status: PaymentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        if !self.amount.is_positive() {
            return Err(PaymentValidationError::NonPositiveAmount);
        }
        if self.amount > Money::MAX_DUES {
            return Err(PaymentValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentValidationError {
    NonPositiveAmount,
    AmountTooLarge,
}

impl fmt::Display for PaymentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Payment amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Payment amount cannot exceed {}", Money::MAX_DUES)
            }
        }
    }
}

impl std::error::Error for PaymentValidationError {}
