use chrono::NaiveDate;

use super::schedule::{DayOfMonth, PayWeekday};

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidWeekday(u8),
    InvalidDayOfMonth(u8),
    AmountOutOfRange { amount: u32, min: u32, max: u32 },
    AnchorWeekdayMismatch { expected: PayWeekday, anchor: NaiveDate },
    AnchorInFuture(NaiveDate),
    DuplicateSemiMonthlyDay(DayOfMonth),
    AccountFrozen,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidWeekday(n) => {
                write!(f, "Invalid pay weekday: {} (expected 1-5, Monday-Friday)", n)
            }
            DomainError::InvalidDayOfMonth(n) => {
                write!(f, "Invalid day of month: {} (expected 1-31)", n)
            }
            DomainError::AmountOutOfRange { amount, min, max } => {
                write!(f, "Amount ${} is outside the allowed range ${}-${}", amount, min, max)
            }
            DomainError::AnchorWeekdayMismatch { expected, anchor } => {
                write!(f, "Anchor date {} does not fall on a {}", anchor, expected.full_name())
            }
            DomainError::AnchorInFuture(date) => {
                write!(f, "Anchor date {} is in the future", date)
            }
            DomainError::DuplicateSemiMonthlyDay(day) => {
                write!(f, "Semi-monthly days must be distinct: {} chosen twice", day.label())
            }
            DomainError::AccountFrozen => {
                write!(f, "Account is frozen and cannot draw funds")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
