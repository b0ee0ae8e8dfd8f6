//! Trait abstraction for the notification sink to enable mocking in tests

use super::notification::Notification;

/// Fire-and-forget receiver of user-facing notifications
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}
