use std::time::Duration;

use crate::{AnimationHandle, NotificationId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the topic to the generation endpoint.
    Generate { request_id: RequestId, topic: String },
    /// POST to the automation trigger; `None` lets the server pick a topic.
    TriggerAutomation {
        request_id: RequestId,
        topic: Option<String>,
    },
    FetchAutomationStatus,
    CheckHealth,
    /// Start the repeating animation tick, replacing any running one.
    StartTicker {
        handle: AnimationHandle,
        period: Duration,
    },
    StopTicker { handle: AnimationHandle },
    /// Fire `Msg::TimerFired(timer)` once after `after`.
    Schedule { timer: Timer, after: Duration },
    CopyToClipboard {
        purpose: ClipboardPurpose,
        text: String,
    },
    ScrollResultsIntoView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    InitialStatusCheck,
    NotificationExpiry(NotificationId),
    CopyFeedbackReset(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardPurpose {
    Copy,
    Share,
}
