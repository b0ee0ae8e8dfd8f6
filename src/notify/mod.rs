//! Toast notifications for submission feedback
//!
//! - `notification`: the message value and its severity
//! - `traits`: the sink the submission controller reports to
//! - `center`: toast queue with per-severity lifetimes

mod center;
mod notification;
mod traits;

pub use center::{NotificationCenter, Toast};
pub use notification::{Notification, Severity};
pub use traits::NotificationSink;

#[cfg(test)]
pub use traits::MockNotificationSink;
