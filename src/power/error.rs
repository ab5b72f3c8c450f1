//! Error types for power computation

use thiserror::Error;

/// Errors raised by the power functions and their input boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The value does not support exponentiation (text, booleans, null, ...)
    #[error("unsupported operand type for exponentiation: {found}")]
    InvalidInputType { found: String },

    /// An integer literal too wide for a 64-bit input value
    #[error("input value out of range: {input}")]
    InputOutOfRange { input: String },

    /// The exact result does not fit in 128 bits, or a float result is infinite
    #[error("result of raising to the power {exponent} is out of range")]
    Overflow { exponent: u32 },
}

impl CalcError {
    pub fn invalid_input_type(found: impl Into<String>) -> Self {
        Self::InvalidInputType { found: found.into() }
    }

    pub fn input_out_of_range(input: impl Into<String>) -> Self {
        Self::InputOutOfRange { input: input.into() }
    }

    /// True for the "not a number" case, as opposed to a range problem
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidInputType { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
