//! Delivery endpoint module
//!
//! Sends finished contact submissions to the remote email function.

mod client;
mod simulated;
mod traits;

pub use client::HttpEndpoint;
pub use simulated::SimulatedEndpoint;
pub use traits::DeliveryEndpoint;

#[cfg(test)]
pub use traits::MockDeliveryEndpoint;

use crate::config::ContactConfig;
use std::sync::Arc;

/// Pick the endpoint described by the configuration
pub fn endpoint_from_config(config: &ContactConfig) -> Arc<dyn DeliveryEndpoint> {
    match config.endpoint() {
        Some(url) => Arc::new(HttpEndpoint::new(url)),
        None => Arc::new(SimulatedEndpoint::default()),
    }
}
