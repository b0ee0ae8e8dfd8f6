//! Notification value object

use serde::{Deserialize, Serialize};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A short-lived, user-visible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, body)
    }
}
