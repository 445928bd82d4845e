//! End-to-end tests for the submission controller against in-memory fakes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadform_core::fakes::{MemorySender, RecordingNotifier};
use leadform_core::{
    FailureReason, FieldName, LeadSender, LeadSubmission, NotificationKind,
    NotificationTemplates, RawFieldSet, SendResult, SubmissionController, SubmissionState,
    SubmitOutcome, ValidationReason, INTERRUPTED_REASON,
};

fn abel() -> RawFieldSet {
    RawFieldSet::new()
        .with(FieldName::FirstName, "Abel")
        .with(FieldName::LastName, "T")
        .with(FieldName::Email, "abel@example.com")
        .with(FieldName::Company, "Acme")
        .with(FieldName::SelectedSolution, "crm-solution")
}

fn controller(
    sender: Arc<MemorySender>,
    notifier: Arc<RecordingNotifier>,
) -> Arc<SubmissionController> {
    Arc::new(SubmissionController::new(sender, notifier))
}

async fn wait_for_calls(sender: &MemorySender, n: usize) {
    while sender.calls() < n {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_success_goes_idle_submitting_succeeded_and_clears_fields() {
    let (sender, release) = MemorySender::held();
    let sender = Arc::new(sender);
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    assert_eq!(controller.state(), SubmissionState::Idle);

    let task = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit(abel()).await }
    });

    wait_for_calls(&sender, 1).await;
    assert_eq!(controller.state(), SubmissionState::Submitting);
    assert!(controller.is_submitting());
    assert_eq!(controller.fields(), abel());

    release.add_permits(1);
    assert_eq!(task.await.unwrap(), SubmitOutcome::Succeeded);

    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert!(!controller.is_submitting());
    assert!(controller.fields().is_empty());

    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);

    let received = sender.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].first_name(), "Abel");
    assert_eq!(received[0].submission_type(), "contact_info");
}

#[tokio::test]
async fn test_backend_failure_keeps_fields_for_retry() {
    let sender = Arc::new(MemorySender::failing_with("network error"));
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    let outcome = controller.submit(abel()).await;

    assert_eq!(outcome, SubmitOutcome::Failed("network error".to_string()));
    assert_eq!(
        controller.state(),
        SubmissionState::Failed(FailureReason::Backend("network error".to_string()))
    );
    assert_eq!(controller.fields(), abel());

    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    // Raw reason is not whitelisted, so the generic message is shown.
    assert_eq!(
        notifications[0].description,
        NotificationTemplates::default().failure_description
    );
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let sender = Arc::new(MemorySender::failing_with("network error"));
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    controller.submit(abel()).await;
    let outcome = controller.submit_current().await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(sender.calls(), 2);

    let kinds: Vec<_> = notifier.notifications().iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Error, NotificationKind::Success]);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let (sender, release) = MemorySender::held();
    let sender = Arc::new(sender);
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit(abel()).await }
    });
    wait_for_calls(&sender, 1).await;

    let other = RawFieldSet::new().with(FieldName::FirstName, "Someone else");
    assert_eq!(controller.submit(other).await, SubmitOutcome::Ignored);

    assert_eq!(sender.calls(), 1);
    assert_eq!(controller.state(), SubmissionState::Submitting);
    assert_eq!(controller.fields(), abel());
    assert!(notifier.notifications().is_empty());

    release.add_permits(1);
    assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
    assert_eq!(sender.calls(), 1);
    assert_eq!(notifier.notifications().len(), 1);
}

#[tokio::test]
async fn test_validation_failure_never_calls_backend() {
    let sender = Arc::new(MemorySender::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    let fields = RawFieldSet::new()
        .with(FieldName::FirstName, "Abel")
        .with(FieldName::Email, "not-an-email")
        .with(FieldName::SelectedSolution, "crm-solution");

    let SubmitOutcome::Rejected(errors) = controller.submit(fields.clone()).await else {
        panic!("expected validation rejection");
    };

    let flagged: Vec<_> = errors.iter().map(|e| (e.field, e.reason)).collect();
    assert_eq!(
        flagged,
        vec![
            (FieldName::LastName, ValidationReason::Required),
            (FieldName::Email, ValidationReason::Format),
            (FieldName::Company, ValidationReason::Required),
        ]
    );
    assert_eq!(
        controller.state(),
        SubmissionState::Failed(FailureReason::Validation(errors))
    );
    assert_eq!(sender.calls(), 0);
    assert!(notifier.notifications().is_empty());
    assert_eq!(controller.fields(), fields);
}

#[tokio::test]
async fn test_corrected_fields_after_validation_failure() {
    let sender = Arc::new(MemorySender::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    let mut fields = abel();
    fields.set(FieldName::SelectedSolution, "erp");
    assert!(matches!(
        controller.submit(fields).await,
        SubmitOutcome::Rejected(_)
    ));

    controller.set_field(FieldName::SelectedSolution, "not-sure");
    assert_eq!(controller.submit_current().await, SubmitOutcome::Succeeded);
    assert_eq!(sender.calls(), 1);
}

#[tokio::test]
async fn test_controller_is_reusable_after_success() {
    let sender = Arc::new(MemorySender::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    for _ in 0..3 {
        assert_eq!(controller.submit(abel()).await, SubmitOutcome::Succeeded);
    }
    assert_eq!(sender.calls(), 3);
    assert_eq!(notifier.notifications().len(), 3);

    let received = sender.received();
    assert!(received
        .windows(2)
        .all(|w| w[0].timestamp() <= w[1].timestamp()));
}

#[tokio::test]
async fn test_whitelisted_backend_reason_is_shown() {
    let sender = Arc::new(MemorySender::failing_with("request timed out"));
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = SubmissionController::new(sender, notifier.clone())
        .with_templates(NotificationTemplates::default().with_shown_reason("request timed out"));

    controller.submit(abel()).await;

    assert_eq!(notifier.notifications()[0].description, "request timed out");
}

fn interrupted() -> SubmissionState {
    SubmissionState::Failed(FailureReason::Backend(INTERRUPTED_REASON.to_string()))
}

#[tokio::test]
async fn test_dropped_submit_does_not_wedge_controller() {
    let (sender, release) = MemorySender::held();
    let sender = Arc::new(sender);
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = controller(sender.clone(), notifier.clone());

    let timed_out = tokio::time::timeout(Duration::from_millis(50), controller.submit(abel())).await;
    assert!(timed_out.is_err());
    assert_eq!(sender.calls(), 1);

    assert_eq!(controller.state(), interrupted());
    assert!(!controller.is_submitting());
    assert_eq!(controller.fields(), abel());
    assert!(notifier.notifications().is_empty());

    release.add_permits(1);
    assert_eq!(controller.submit_current().await, SubmitOutcome::Succeeded);
    assert_eq!(sender.calls(), 2);
    assert_eq!(controller.state(), SubmissionState::Succeeded);
}

#[tokio::test]
async fn test_aborted_submit_task_does_not_wedge_controller() {
    let (sender, release) = MemorySender::held();
    let sender = Arc::new(sender);
    let controller = controller(sender.clone(), Arc::new(RecordingNotifier::new()));

    let task = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit(abel()).await }
    });
    wait_for_calls(&sender, 1).await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(controller.state(), interrupted());

    release.add_permits(1);
    assert_ne!(controller.submit(abel()).await, SubmitOutcome::Ignored);
}

struct PanickingSender;

#[async_trait]
impl LeadSender for PanickingSender {
    async fn submit_lead(&self, _record: &LeadSubmission) -> SendResult {
        panic!("sender blew up");
    }
}

#[tokio::test]
async fn test_panicking_sender_leaves_controller_failed() {
    let controller = Arc::new(SubmissionController::new(
        Arc::new(PanickingSender),
        Arc::new(RecordingNotifier::new()),
    ));

    let task = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit(abel()).await }
    });
    assert!(task.await.unwrap_err().is_panic());

    assert_eq!(controller.state(), interrupted());
    assert!(!controller.is_submitting());
    assert_eq!(controller.fields(), abel());
}
