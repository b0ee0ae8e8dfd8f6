//! Application state and core logic

use crate::config::ContactConfig;
use crate::controller::{SubmissionController, SubmissionEvent};
use crate::delivery::{self, DeliveryEndpoint};
use crate::notify::NotificationCenter;
use crate::state::{ContactField, FieldStore, Form, SubmissionState, SubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Shown under the form after a failed delivery, until the next edit
pub const RETRY_HINT: &str = "Your message was not sent. Press Enter on Send to try again.";

/// Main application struct
pub struct App {
    /// Field store for the contact form
    pub form: FieldStore,
    /// Submission state machine
    pub controller: SubmissionController,
    /// Toasts raised by the controller
    pub notifications: NotificationCenter,
    /// Inline message under the form (missing fields, last failure)
    pub hint: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from the user configuration
    pub fn new(config: &ContactConfig) -> Self {
        Self::with_endpoint(delivery::endpoint_from_config(config), config)
    }

    pub fn with_endpoint(endpoint: Arc<dyn DeliveryEndpoint>, config: &ContactConfig) -> Self {
        Self {
            form: FieldStore::new(),
            controller: SubmissionController::new(endpoint, config.reset_delay()),
            notifications: NotificationCenter::from_config(config),
            hint: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Text of the submit button
    pub fn submit_label(&self) -> &'static str {
        match self.controller.state() {
            SubmissionState::Submitting => "Sending...",
            _ => "Send Message",
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global quit: Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        if key.code == KeyCode::Esc {
            self.notifications.dismiss_latest();
            return;
        }

        // The success panel replaces the form until the reset fires
        if self.controller.state() == SubmissionState::Submitted {
            return;
        }

        let on_buttons = self.form.is_buttons_row_active();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_submit();
            }
            KeyCode::Enter if on_buttons => self.request_submit(),
            KeyCode::Enter => {
                // Enter in the message adds a newline; elsewhere it submits
                if self
                    .form
                    .active_contact_field()
                    .is_some_and(ContactField::is_multiline)
                {
                    self.edit(|form| form.insert_newline());
                } else {
                    self.request_submit();
                }
            }
            KeyCode::Char(c)
                if !on_buttons
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit(|form| form.input_char(c));
            }
            KeyCode::Backspace if !on_buttons => self.edit(FieldStore::backspace),
            _ => {}
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut FieldStore)) {
        apply(&mut self.form);
        self.hint = None;
    }

    /// Submit the form if every required field is filled in
    pub fn request_submit(&mut self) {
        if !self.controller.can_submit() {
            debug!(state = %self.controller.state(), "submit control disabled");
            return;
        }

        let missing = self.form.missing_required();
        if let Some(first) = missing.first() {
            self.form.focus(*first);
            self.hint = Some(missing_hint(&missing));
            return;
        }

        match self.controller.submit(self.form.snapshot()) {
            SubmitOutcome::Started => self.hint = None,
            SubmitOutcome::Ignored(state) => debug!(%state, "submit ignored"),
            SubmitOutcome::Incomplete(missing) => self.hint = Some(missing_hint(&missing)),
        }
    }

    /// Apply a report from the delivery or reset task
    pub fn apply_submission_event(&mut self, event: SubmissionEvent) {
        let before = self.controller.state();
        let after = self
            .controller
            .handle_event(event, &mut self.form, &mut self.notifications);

        if before == SubmissionState::Submitting && after == SubmissionState::Idle {
            self.hint = Some(RETRY_HINT.to_string());
        }
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self) {
        self.notifications.prune_expired(Instant::now());
    }

    /// Tear the form down before exit
    pub fn shutdown(&mut self) {
        self.controller.teardown();
    }
}

fn missing_hint(missing: &[ContactField]) -> String {
    let labels: Vec<_> = missing.iter().map(|f| f.label()).collect();
    format!("Please fill in: {}", labels.join(", "))
}
