//! Trait abstraction for the delivery endpoint to enable mocking in tests

use crate::error::DeliveryError;
use crate::state::ContactFields;
use async_trait::async_trait;

/// Remote service that hands a contact message to a human.
///
/// Implementations only report whether delivery succeeded; the controller
/// treats every error the same way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryEndpoint: Send + Sync {
    /// Deliver one contact submission
    async fn deliver(&self, payload: &ContactFields) -> Result<(), DeliveryError>;

    /// Short human-readable name for logs and the status bar
    fn describe(&self) -> String;
}
