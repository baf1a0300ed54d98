//! Member model
//!
//! A member is a person enrolled for recurring dues. Each member owes a fixed
//! amount on a fixed cadence starting from a payment start date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;
use super::money::Money;

/// How often a member's dues recur
///
/// Stored as a lowercase string. A stored value this build does not know is
/// read back as `Unrecognized` instead of failing the whole file; it is never
/// produced from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Yearly,
    Unrecognized,
}

impl PaymentFrequency {
    /// All frequencies a user can choose
    pub const ALL: [PaymentFrequency; 4] = [
        Self::Monthly,
        Self::Quarterly,
        Self::SemiAnnual,
        Self::Yearly,
    ];

    /// Parse a frequency from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "quarterly" | "quarter" => Some(Self::Quarterly),
            "semi-annual" | "semiannual" | "semi_annual" | "biannual" => Some(Self::SemiAnnual),
            "yearly" | "annual" | "annually" | "year" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// The stable storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Yearly => "yearly",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        Self::Monthly
    }
}

impl From<String> for PaymentFrequency {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or(Self::Unrecognized)
    }
}

impl From<PaymentFrequency> for String {
    fn from(frequency: PaymentFrequency) -> Self {
        frequency.as_str().to_string()
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnual => "Semi-annual",
            Self::Yearly => "Yearly",
            Self::Unrecognized => "Unrecognized",
        };
        f.pad(label)
    }
}

/// A person enrolled for recurring dues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub payment_amount: Money,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    pub payment_start_date: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Member {
    /// Create a new active member
    pub fn new(
        name: impl Into<String>,
        payment_amount: Money,
        payment_frequency: PaymentFrequency,
        payment_start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: None,
            phone: None,
            payment_amount,
            payment_frequency,
            payment_start_date,
            active: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn monthly(name: impl Into<String>, amount: Money, start: NaiveDate) -> Self {
        Self::new(name, amount, PaymentFrequency::Monthly, start)
    }

    pub fn yearly(name: impl Into<String>, amount: Money, start: NaiveDate) -> Self {
        Self::new(name, amount, PaymentFrequency::Yearly, start)
    }

    /// Preferred contact for reminders: email first, then phone
    pub fn contact(&self) -> Option<&str> {
        self.email.as_deref().or(self.phone.as_deref())
    }

    pub fn set_payment_amount(&mut self, amount: Money) {
        self.payment_amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_payment_frequency(&mut self, frequency: PaymentFrequency) {
        self.payment_frequency = frequency;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }

        if !self.payment_amount.is_positive() {
            return Err(MemberValidationError::NonPositiveAmount);
        }

        if self.payment_amount > Money::MAX_DUES {
            return Err(MemberValidationError::AmountTooLarge);
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(MemberValidationError::InvalidEmail(email.clone()));
            }
        }

        if self.payment_frequency == PaymentFrequency::Unrecognized {
            return Err(MemberValidationError::UnrecognizedFrequency);
        }

        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.payment_amount, self.payment_frequency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
    NonPositiveAmount,
    AmountTooLarge,
    InvalidEmail(String),
    UnrecognizedFrequency,
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Payment amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Payment amount cannot exceed {}", Money::MAX_DUES)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::UnrecognizedFrequency => write!(f, "Payment frequency is not recognized"),
        }
    }
}

impl std::error::Error for MemberValidationError {}
