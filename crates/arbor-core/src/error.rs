//! Core error types.

use thiserror::Error;

/// Rejected lottery odds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid lottery odds {numerator}/{denominator}")]
pub struct InvalidLottery {
    /// The rejected numerator.
    pub numerator: u32,
    /// The rejected denominator.
    pub denominator: u32,
}
