//! Domain error types

use thiserror::Error;

/// Why a contact submission did not reach its recipient.
///
/// Both variants are handled the same way by the submission controller:
/// an error notification, back to idle, input kept for a retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The endpoint answered and reported failure
    #[error("delivery rejected: {0}")]
    Rejected(String),
    /// The request never completed (network, TLS, unexpected body)
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors raised by the field store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}
