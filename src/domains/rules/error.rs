//! Business rule error types.

use thiserror::Error;

/// Errors raised by the pure business rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The value is not a SIREN (exactly nine ASCII digits).
    #[error("Invalid SIREN '{0}': expected exactly 9 digits")]
    InvalidSiren(String),

    /// An identifier used to build a query contains forbidden characters.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),
}
