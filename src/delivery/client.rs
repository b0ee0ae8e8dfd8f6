//! HTTPS client for the contact delivery function
//!
//! The endpoint accepts the contact fields as a JSON object and answers with
//! a status code and, optionally, a small JSON body.

use super::traits::DeliveryEndpoint;
use crate::error::DeliveryError;
use crate::state::ContactFields;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Optional body returned by the delivery function
#[derive(Debug, Default, Deserialize)]
struct DeliveryResponse {
    success: Option<bool>,
    error: Option<String>,
}

/// Client for the remote delivery endpoint
pub struct HttpEndpoint {
    http: Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DeliveryEndpoint for HttpEndpoint {
    async fn deliver(&self, payload: &ContactFields) -> Result<(), DeliveryError> {
        debug!(url = %self.url, "posting contact submission");

        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        classify_response(status, &body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Map a settled HTTP exchange to success or rejection.
///
/// A 2xx answer is a success unless its JSON body says otherwise; a body
/// that is not JSON is ignored.
fn classify_response(status: StatusCode, body: &str) -> Result<(), DeliveryError> {
    let parsed: Option<DeliveryResponse> = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str(body).ok()
    };

    if !status.is_success() {
        let reason = parsed
            .and_then(|r| r.error)
            .unwrap_or_else(|| format!("endpoint returned {status}"));
        return Err(DeliveryError::Rejected(reason));
    }

    match parsed {
        Some(DeliveryResponse {
            error: Some(reason),
            ..
        }) => Err(DeliveryError::Rejected(reason)),
        Some(DeliveryResponse {
            success: Some(false),
            ..
        }) => Err(DeliveryError::Rejected(
            "endpoint reported failure".to_string(),
        )),
        _ => Ok(()),
    }
}
