//! Error types shared by the sizing engine.

use thiserror::Error;

use crate::catalog::cable::AmpacityKey;

pub type Result<T> = std::result::Result<T, SizingError>;

/// Failures reported by the sizing operations.
///
/// An optimizer search that finds nothing is not an error (it returns
/// `None`), and currents beyond the breaker ladder saturate instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// A value that must be finite and within range was not.
    #[error("invalid input: `{field}` = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The cable table has no defined ampacity for the requested arrangement.
    #[error("cable table has no ampacity defined for {key}")]
    NoApplicableCable { key: AmpacityKey },
}

impl SizingError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Rejects NaN, infinities and negative values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SizingError::invalid(field, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(SizingError::invalid(field, value, "must be >= 0"));
    }
    Ok(value)
}

/// Rejects NaN, infinities, zero and negative values.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SizingError::invalid(field, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SizingError::invalid(field, value, "must be > 0"));
    }
    Ok(value)
}
