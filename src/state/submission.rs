//! Submission state machine values

use super::forms::ContactField;
use std::fmt;

/// Phase of the contact submission workflow.
///
/// A failed delivery is not a phase of its own: it drops back to `Idle`
/// and leaves an error notification behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

impl SubmissionState {
    /// Whether the submit control accepts input
    pub fn accepts_submit(self) -> bool {
        self == SubmissionState::Idle
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of asking the controller to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivery is in flight
    Started,
    /// Not idle (or torn down); nothing happened
    Ignored(SubmissionState),
    /// Required fields are blank; nothing was sent
    Incomplete(Vec<ContactField>),
}
