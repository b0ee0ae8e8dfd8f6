//! Submission controller
//!
//! Drives one contact form through `Idle -> Submitting -> Submitted -> Idle`.
//! The delivery call and the reset timer run as tasks on the current runtime
//! and report back through a channel; [`SubmissionController::handle_event`]
//! applies what they report.

use crate::delivery::DeliveryEndpoint;
use crate::error::DeliveryError;
use crate::notify::{Notification, NotificationSink};
use crate::state::{ContactFields, FieldStore, SubmissionState, SubmitOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const SENT_TITLE: &str = "Message Sent";
pub const SENT_BODY: &str = "Thank you for reaching out. We'll be in touch soon.";
pub const FAILED_TITLE: &str = "Message Not Sent";
pub const FAILED_BODY: &str = "Something went wrong while sending your message. Please try again.";

/// Something a background task reported back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The delivery call finished
    Settled(Result<(), DeliveryError>),
    /// The reset timer with this generation fired
    ResetElapsed { generation: u64 },
}

/// Pending reset after a successful submission
#[derive(Debug)]
struct ResetTimer {
    generation: u64,
    armed_at: Instant,
    handle: JoinHandle<()>,
}

pub struct SubmissionController {
    endpoint: Arc<dyn DeliveryEndpoint>,
    reset_delay: Duration,
    state: SubmissionState,
    events_tx: UnboundedSender<SubmissionEvent>,
    events_rx: UnboundedReceiver<SubmissionEvent>,
    reset_timer: Option<ResetTimer>,
    generation: u64,
    torn_down: bool,
}

impl SubmissionController {
    pub fn new(endpoint: Arc<dyn DeliveryEndpoint>, reset_delay: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            endpoint,
            reset_delay,
            state: SubmissionState::Idle,
            events_tx,
            events_rx,
            reset_timer: None,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.torn_down && self.state.accepts_submit()
    }

    #[allow(dead_code)]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn endpoint_name(&self) -> String {
        self.endpoint.describe()
    }

    /// Fraction of the reset delay already elapsed, while a reset is pending
    pub fn reset_progress(&self) -> Option<f64> {
        let timer = self.reset_timer.as_ref()?;
        if self.reset_delay.is_zero() {
            return Some(1.0);
        }
        let elapsed = timer.armed_at.elapsed().as_secs_f64();
        Some((elapsed / self.reset_delay.as_secs_f64()).min(1.0))
    }

    /// Start delivering `fields`.
    ///
    /// Only acts from `Idle`; a call while a delivery is in flight or the
    /// success panel is up returns `Ignored` and sends nothing.
    pub fn submit(&mut self, fields: &ContactFields) -> SubmitOutcome {
        if !self.can_submit() {
            debug!(state = %self.state, torn_down = self.torn_down, "submit ignored");
            return SubmitOutcome::Ignored(self.state);
        }

        let missing = fields.missing_required();
        if !missing.is_empty() {
            debug!(?missing, "submit blocked by missing required fields");
            return SubmitOutcome::Incomplete(missing);
        }

        self.transition(SubmissionState::Submitting);

        let endpoint = Arc::clone(&self.endpoint);
        let payload = fields.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = endpoint.deliver(&payload).await;
            // The receiver is gone if the form was dropped mid-flight.
            let _ = events.send(SubmissionEvent::Settled(result));
        });

        SubmitOutcome::Started
    }

    /// Wait for the next report from a delivery or timer task
    pub async fn next_event(&mut self) -> SubmissionEvent {
        match self.events_rx.recv().await {
            Some(event) => event,
            // Unreachable while we hold a sender; park instead of spinning.
            None => std::future::pending().await,
        }
    }

    /// Apply a reported event and return the resulting state
    pub fn handle_event(
        &mut self,
        event: SubmissionEvent,
        fields: &mut FieldStore,
        sink: &mut dyn NotificationSink,
    ) -> SubmissionState {
        if self.torn_down {
            debug!(?event, "event ignored after teardown");
            return self.state;
        }

        match event {
            SubmissionEvent::Settled(result) => self.settle(result, sink),
            SubmissionEvent::ResetElapsed { generation } => self.fire_reset(generation, fields),
        }
        self.state
    }

    /// Wait for the next event and apply it
    pub async fn process_next_event(
        &mut self,
        fields: &mut FieldStore,
        sink: &mut dyn NotificationSink,
    ) -> SubmissionState {
        let event = self.next_event().await;
        self.handle_event(event, fields, sink)
    }

    /// Detach from the form: cancel the pending reset and ignore later events
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.cancel_reset_timer();
        info!(state = %self.state, "submission controller torn down");
    }

    fn settle(&mut self, result: Result<(), DeliveryError>, sink: &mut dyn NotificationSink) {
        if self.state != SubmissionState::Submitting {
            debug!(state = %self.state, "delivery result ignored outside submitting");
            return;
        }

        match result {
            Ok(()) => {
                sink.notify(Notification::success(SENT_TITLE, SENT_BODY));
                self.transition(SubmissionState::Submitted);
                self.arm_reset_timer();
            }
            Err(err) => {
                warn!(error = %err, "contact submission failed");
                sink.notify(Notification::error(FAILED_TITLE, FAILED_BODY));
                self.transition(SubmissionState::Idle);
            }
        }
    }

    fn arm_reset_timer(&mut self) {
        self.cancel_reset_timer();
        self.generation += 1;

        let generation = self.generation;
        let delay = self.reset_delay;
        let events = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SubmissionEvent::ResetElapsed { generation });
        });

        debug!(generation, ?delay, "reset timer armed");
        self.reset_timer = Some(ResetTimer {
            generation,
            armed_at: Instant::now(),
            handle,
        });
    }

    fn fire_reset(&mut self, generation: u64, fields: &mut FieldStore) {
        let is_current = self
            .reset_timer
            .as_ref()
            .is_some_and(|timer| timer.generation == generation);
        if !is_current || self.state != SubmissionState::Submitted {
            debug!(generation, "stale reset timer ignored");
            return;
        }

        self.reset_timer = None;
        fields.reset();
        self.transition(SubmissionState::Idle);
    }

    fn cancel_reset_timer(&mut self) {
        if let Some(timer) = self.reset_timer.take() {
            timer.handle.abort();
            debug!(generation = timer.generation, "reset timer cancelled");
        }
    }

    fn transition(&mut self, to: SubmissionState) {
        info!(from = %self.state, %to, "submission state changed");
        self.state = to;
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.cancel_reset_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::MockDeliveryEndpoint;
    use crate::notify::{MockNotificationSink, NotificationCenter, Severity};
    use crate::state::ContactField;
    use tokio::time::timeout;

    const DELAY: Duration = Duration::from_secs(3);

    fn jane() -> ContactFields {
        ContactFields {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            company: String::new(),
            message: "Hello".to_string(),
        }
    }

    fn filled_store() -> FieldStore {
        let mut store = FieldStore::new();
        let fields = jane();
        store.update(ContactField::Name, fields.name);
        store.update(ContactField::Email, fields.email);
        store.update(ContactField::Message, fields.message);
        store
    }

    fn endpoint_ok(times: usize) -> Arc<MockDeliveryEndpoint> {
        let mut endpoint = MockDeliveryEndpoint::new();
        endpoint
            .expect_deliver()
            .times(times)
            .returning(|_| Ok(()));
        Arc::new(endpoint)
    }

    fn endpoint_err(err: DeliveryError) -> Arc<MockDeliveryEndpoint> {
        let mut endpoint = MockDeliveryEndpoint::new();
        endpoint
            .expect_deliver()
            .times(1)
            .returning(move |_| Err(err.clone()));
        Arc::new(endpoint)
    }

    fn sink() -> NotificationCenter {
        NotificationCenter::new(Duration::from_secs(60), Duration::from_secs(60))
    }

    mod success {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_scenario_a_full_cycle() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();
            let mut notifications = sink();

            assert_eq!(controller.state(), SubmissionState::Idle);
            let outcome = controller.submit(store.snapshot());
            assert_eq!(outcome, SubmitOutcome::Started);
            assert_eq!(controller.state(), SubmissionState::Submitting);

            let state = controller
                .process_next_event(&mut store, &mut notifications)
                .await;
            assert_eq!(state, SubmissionState::Submitted);
            assert_eq!(notifications.len(), 1);
            let toast = notifications.visible().next().unwrap();
            assert_eq!(toast.notification.severity, Severity::Success);
            assert_eq!(toast.notification.title, SENT_TITLE);
            // Not cleared yet
            assert_eq!(store.get(ContactField::Name), "Jane");

            let state = controller
                .process_next_event(&mut store, &mut notifications)
                .await;
            assert_eq!(state, SubmissionState::Idle);
            assert!(store.snapshot().is_empty());
            assert_eq!(notifications.len(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_fields_survive_until_delay_elapses() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();
            let mut notifications = sink();

            controller.submit(store.snapshot());
            controller
                .process_next_event(&mut store, &mut notifications)
                .await;

            let early = timeout(DELAY - Duration::from_millis(1), controller.next_event()).await;
            assert!(early.is_err());
            assert_eq!(store.snapshot(), &jane());
            assert_eq!(controller.state(), SubmissionState::Submitted);

            let event = controller.next_event().await;
            assert_eq!(event, SubmissionEvent::ResetElapsed { generation: 1 });
        }

        #[tokio::test(start_paused = true)]
        async fn test_payload_is_field_snapshot() {
            let mut endpoint = MockDeliveryEndpoint::new();
            endpoint
                .expect_deliver()
                .withf(|payload| payload == &jane())
                .times(1)
                .returning(|_| Ok(()));
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(controller.state(), SubmissionState::Submitted);
        }

        #[tokio::test(start_paused = true)]
        async fn test_exactly_one_success_notification() {
            let mut notifier = MockNotificationSink::new();
            notifier
                .expect_notify()
                .withf(|n| n.severity == Severity::Success)
                .times(1)
                .return_const(());
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut notifier).await;
            controller.process_next_event(&mut store, &mut notifier).await;
            assert_eq!(controller.state(), SubmissionState::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_machine_is_reusable() {
            let mut controller = SubmissionController::new(endpoint_ok(2), DELAY);
            let mut notifications = sink();

            for _ in 0..2 {
                let mut store = filled_store();
                assert_eq!(controller.submit(store.snapshot()), SubmitOutcome::Started);
                controller
                    .process_next_event(&mut store, &mut notifications)
                    .await;
                controller
                    .process_next_event(&mut store, &mut notifications)
                    .await;
                assert_eq!(controller.state(), SubmissionState::Idle);
            }
            assert_eq!(notifications.len(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_progress_while_submitted() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();
            assert!(controller.reset_progress().is_none());

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(controller.reset_progress(), Some(0.0));

            tokio::time::advance(Duration::from_millis(1500)).await;
            let progress = controller.reset_progress().unwrap();
            assert!((progress - 0.5).abs() < 1e-6);
        }
    }

    mod failure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_scenario_b_rejected() {
            let endpoint = endpoint_err(DeliveryError::Rejected("nope".to_string()));
            let mut controller = SubmissionController::new(endpoint, DELAY);
            let mut store = filled_store();
            let mut notifications = sink();
            let revision = store.revision();

            controller.submit(store.snapshot());
            assert_eq!(controller.state(), SubmissionState::Submitting);

            let state = controller
                .process_next_event(&mut store, &mut notifications)
                .await;
            assert_eq!(state, SubmissionState::Idle);
            assert_eq!(store.get(ContactField::Name), "Jane");
            assert_eq!(store.revision(), revision);
            assert_eq!(notifications.len(), 1);
            let toast = notifications.visible().next().unwrap();
            assert_eq!(toast.notification.severity, Severity::Error);
            assert_eq!(toast.notification.title, FAILED_TITLE);
        }

        #[tokio::test]
        async fn test_transport_failure_handled_the_same() {
            let endpoint = endpoint_err(DeliveryError::Transport("connection reset".to_string()));
            let mut controller = SubmissionController::new(endpoint, DELAY);
            let mut store = filled_store();

            let mut notifier = MockNotificationSink::new();
            notifier
                .expect_notify()
                .withf(|n| n.severity == Severity::Error)
                .times(1)
                .return_const(());

            controller.submit(store.snapshot());
            let state = controller.process_next_event(&mut store, &mut notifier).await;
            assert_eq!(state, SubmissionState::Idle);
            assert_eq!(store.snapshot(), &jane());
            assert!(controller.reset_progress().is_none());
        }

        #[tokio::test(start_paused = true)]
        async fn test_no_reset_timer_after_failure() {
            let endpoint = endpoint_err(DeliveryError::Rejected("nope".to_string()));
            let mut controller = SubmissionController::new(endpoint, DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;

            let later = timeout(DELAY * 2, controller.next_event()).await;
            assert!(later.is_err());
            assert_eq!(store.snapshot(), &jane());
        }

        #[tokio::test]
        async fn test_retry_after_failure() {
            let mut endpoint = MockDeliveryEndpoint::new();
            let mut seq = mockall::Sequence::new();
            endpoint
                .expect_deliver()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(DeliveryError::Transport("offline".to_string())));
            endpoint
                .expect_deliver()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);
            let mut store = filled_store();
            let mut notifications = sink();

            controller.submit(store.snapshot());
            controller
                .process_next_event(&mut store, &mut notifications)
                .await;
            assert_eq!(controller.state(), SubmissionState::Idle);

            assert_eq!(controller.submit(store.snapshot()), SubmitOutcome::Started);
            controller
                .process_next_event(&mut store, &mut notifications)
                .await;
            assert_eq!(controller.state(), SubmissionState::Submitted);
            assert_eq!(notifications.len(), 2);
        }
    }

    mod guards {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_resubmit_while_submitting_is_noop() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            assert_eq!(controller.submit(store.snapshot()), SubmitOutcome::Started);
            assert_eq!(
                controller.submit(store.snapshot()),
                SubmitOutcome::Ignored(SubmissionState::Submitting)
            );
            assert!(!controller.can_submit());
            assert_eq!(controller.state(), SubmissionState::Submitting);

            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(controller.state(), SubmissionState::Submitted);
        }

        #[tokio::test(start_paused = true)]
        async fn test_submit_while_submitted_is_noop() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(
                controller.submit(store.snapshot()),
                SubmitOutcome::Ignored(SubmissionState::Submitted)
            );
        }

        #[tokio::test]
        async fn test_scenario_c_missing_message_never_sends() {
            let mut endpoint = MockDeliveryEndpoint::new();
            endpoint.expect_deliver().never();
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);

            let mut fields = jane();
            fields.message.clear();

            assert_eq!(
                controller.submit(&fields),
                SubmitOutcome::Incomplete(vec![ContactField::Message])
            );
            assert_eq!(controller.state(), SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_empty_company_is_accepted() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();
            assert_eq!(store.get(ContactField::Company), "");

            assert_eq!(controller.submit(store.snapshot()), SubmitOutcome::Started);
            controller.process_next_event(&mut store, &mut sink()).await;
        }

        #[tokio::test]
        async fn test_whitespace_only_name_is_present() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = FieldStore::new();
            let fields = ContactFields {
                name: " ".to_string(),
                email: "a@b".to_string(),
                company: String::new(),
                message: "hi".to_string(),
            };

            assert_eq!(controller.submit(&fields), SubmitOutcome::Started);
            assert_eq!(controller.state(), SubmissionState::Submitting);
            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(controller.state(), SubmissionState::Submitted);
        }

        #[tokio::test]
        async fn test_stray_settled_event_in_idle_is_ignored() {
            let mut endpoint = MockDeliveryEndpoint::new();
            endpoint.expect_deliver().never();
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);
            let mut store = filled_store();

            let mut notifier = MockNotificationSink::new();
            notifier.expect_notify().never();

            let state = controller.handle_event(
                SubmissionEvent::Settled(Ok(())),
                &mut store,
                &mut notifier,
            );
            assert_eq!(state, SubmissionState::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stale_reset_generation_is_ignored() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;

            let revision = store.revision();
            let state = controller.handle_event(
                SubmissionEvent::ResetElapsed { generation: 99 },
                &mut store,
                &mut sink(),
            );
            assert_eq!(state, SubmissionState::Submitted);
            assert_eq!(store.revision(), revision);
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_fires_only_once() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;
            controller.process_next_event(&mut store, &mut sink()).await;
            let revision = store.revision();

            controller.handle_event(
                SubmissionEvent::ResetElapsed { generation: 1 },
                &mut store,
                &mut sink(),
            );
            assert_eq!(store.revision(), revision);
            assert_eq!(controller.state(), SubmissionState::Idle);
        }
    }

    mod teardown {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_scenario_d_no_write_after_teardown() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            controller.submit(store.snapshot());
            controller.process_next_event(&mut store, &mut sink()).await;
            assert_eq!(controller.state(), SubmissionState::Submitted);
            let revision = store.revision();

            controller.teardown();
            tokio::time::advance(DELAY * 2).await;

            let late = timeout(Duration::from_millis(10), controller.next_event()).await;
            assert!(late.is_err());

            controller.handle_event(
                SubmissionEvent::ResetElapsed { generation: 1 },
                &mut store,
                &mut sink(),
            );
            assert_eq!(store.revision(), revision);
            assert_eq!(store.snapshot(), &jane());
        }

        #[tokio::test]
        async fn test_submit_after_teardown_is_ignored() {
            let mut endpoint = MockDeliveryEndpoint::new();
            endpoint.expect_deliver().never();
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);

            controller.teardown();
            assert!(controller.is_torn_down());
            assert!(!controller.can_submit());
            assert_eq!(
                controller.submit(&jane()),
                SubmitOutcome::Ignored(SubmissionState::Idle)
            );
        }

        #[tokio::test]
        async fn test_late_delivery_after_teardown_is_ignored() {
            let mut controller = SubmissionController::new(endpoint_ok(1), DELAY);
            let mut store = filled_store();

            let mut notifier = MockNotificationSink::new();
            notifier.expect_notify().never();

            controller.submit(store.snapshot());
            controller.teardown();
            let state = controller.process_next_event(&mut store, &mut notifier).await;

            assert_eq!(state, SubmissionState::Submitting);
            assert_eq!(store.snapshot(), &jane());
        }

        #[tokio::test]
        async fn test_teardown_is_idempotent() {
            let mut endpoint = MockDeliveryEndpoint::new();
            endpoint.expect_deliver().never();
            let mut controller = SubmissionController::new(Arc::new(endpoint), DELAY);
            controller.teardown();
            controller.teardown();
            assert!(controller.is_torn_down());
        }
    }
}
