//! Offline endpoint used when no delivery URL is configured

use super::traits::DeliveryEndpoint;
use crate::error::DeliveryError;
use crate::state::ContactFields;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Latency of the simulated round trip
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

/// Accepts every submission after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedEndpoint {
    latency: Duration,
}

impl SimulatedEndpoint {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedEndpoint {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

#[async_trait]
impl DeliveryEndpoint for SimulatedEndpoint {
    async fn deliver(&self, payload: &ContactFields) -> Result<(), DeliveryError> {
        tokio::time::sleep(self.latency).await;
        info!(from = %payload.email, "simulated delivery accepted");
        Ok(())
    }

    fn describe(&self) -> String {
        "simulated".to_string()
    }
}
