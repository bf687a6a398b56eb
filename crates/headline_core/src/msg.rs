use chrono::NaiveDateTime;

use crate::{
    AnimationHandle, AutomationRun, AutomationStatus, ClipboardPurpose, GenerationResult,
    HealthReport, NotificationId, RemoteFailure, RequestId, Timer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished its initial draw.
    PageReady,
    /// User edited the topic input.
    TopicChanged(String),
    /// User picked one of the example topics.
    TopicChipSelected(String),
    /// User pressed the generate control (or Enter in the input).
    GenerateClicked,
    /// Generation call finished; 2xx outcomes arrive after the settle delay.
    GenerationCompleted {
        request_id: RequestId,
        outcome: Result<GenerationResult, RemoteFailure>,
        completed_at: NaiveDateTime,
    },
    /// Repeating tick of the progress animation.
    AnimationTick(AnimationHandle),
    CheckStatusClicked,
    StatusLoaded(Result<AutomationStatus, RemoteFailure>),
    /// Manual automation run, with an optional topic override.
    RunAutomationClicked { topic: Option<String> },
    AutomationCompleted {
        request_id: RequestId,
        outcome: Result<AutomationRun, RemoteFailure>,
        completed_at: NaiveDateTime,
    },
    CopyClicked(String),
    ShareClicked { headline: String, topic: String },
    ClipboardDone {
        purpose: ClipboardPurpose,
        result: Result<(), String>,
    },
    TestConnectionClicked,
    HealthChecked(Result<HealthReport, RemoteFailure>),
    ShowInfo,
    HideInfo,
    ShowCredits,
    /// User acknowledged the blocking alert.
    AlertAcknowledged,
    NotificationDismissed(NotificationId),
    TimerFired(Timer),
    /// Fallback for placeholder wiring.
    NoOp,
}
