//! Error types for circuit-calc

use thiserror::Error;

pub const EMPTY_RESISTANCE_LIST: &str = "You must provide at least one resistance value.";
pub const INVALID_TOPOLOGY: &str = "Invalid type, use 'series' or 'parallel'.";
pub const OHMS_LAW_ARITY: &str = "Provide exactly two values to calculate the third.";
pub const RESISTANCE_DIVISION_BY_ZERO: &str =
    "Division by zero is not allowed in resistance calculation.";
pub const OHMS_LAW_DIVISION_BY_ZERO: &str =
    "Division by zero is not allowed in Ohm's law calculation.";
pub const NON_FINITE_RESULT: &str = "The result is not a finite number.";

/// Calculation errors
///
/// Every failure is a deterministic function of the input, so none of these
/// are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Malformed or underspecified input
    #[error("{0}")]
    InvalidInput(String),

    /// A zero denominator was hit during the computation
    #[error("{0}")]
    DivisionByZero(String),
}

impl CalcError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }

    /// Human-readable message without the variant prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(msg) | Self::DivisionByZero(msg) => msg,
        }
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero(_))
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
