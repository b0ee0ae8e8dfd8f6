//! Toast queue backing the notification sink

use super::notification::{Notification, Severity};
use super::traits::NotificationSink;
use crate::config::ContactConfig;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Maximum number of toasts drawn at once
pub const MAX_VISIBLE: usize = 3;

/// A notification on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub notification: Notification,
    /// Wall-clock time shown in the toast
    pub issued_at: DateTime<Local>,
    expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Holds live toasts, newest last
#[derive(Debug)]
pub struct NotificationCenter {
    toasts: VecDeque<Toast>,
    success_lifetime: Duration,
    error_lifetime: Duration,
}

impl NotificationCenter {
    pub fn new(success_lifetime: Duration, error_lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            success_lifetime,
            error_lifetime,
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(config.success_toast(), config.error_toast())
    }

    fn lifetime(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Success => self.success_lifetime,
            Severity::Error => self.error_lifetime,
        }
    }

    /// Queue a notification issued at `now`
    pub fn push_at(&mut self, notification: Notification, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        let expires_at = now + self.lifetime(notification.severity);
        debug!(%id, title = %notification.title, "showing notification");
        self.toasts.push_back(Toast {
            id,
            notification,
            issued_at: Local::now(),
            expires_at,
        });
        id
    }

    /// Drop every toast whose lifetime has elapsed; returns how many went
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    #[allow(dead_code)]
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    /// Dismiss the most recent toast
    pub fn dismiss_latest(&mut self) -> Option<Toast> {
        self.toasts.pop_back()
    }

    /// Toasts to draw, newest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev().take(MAX_VISIBLE)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}
