//! Error types for cloth construction and control.

use core::fmt;

/// Errors that can occur while building or driving a cloth simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// A construction or solver parameter is outside its valid range.
    InvalidParameter { name: &'static str, value: f64 },
    /// More impulse vectors were supplied than there are impulse slots.
    TooManyImpulses { given: usize, slots: usize },
}

impl ClothError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        ClothError::InvalidParameter { name, value }
    }
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter `{}`: {}", name, value)
            }
            ClothError::TooManyImpulses { given, slots } => {
                write!(f, "{} impulses given but only {} slots exist", given, slots)
            }
        }
    }
}

impl core::error::Error for ClothError {}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ClothError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ClothError::invalid(name, value))
    }
}

/// Fails unless `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ClothError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ClothError::invalid(name, value))
    }
}
