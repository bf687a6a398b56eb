use std::time::Duration;

use crate::view_model::{
    AppViewModel, AutomationBadge, ProgressView, ResultsView, StepView, TriggerView,
};
use crate::{
    AnimationHandle, NotificationCenter, ProgressAnimator, ResultsBody, StatusPanel,
};

pub type RequestId = u64;

const DEFAULT_SPREADSHEET_ID: &str = "1Ol0Fi9OE-DX78E_187x3BGggQm2LeRTbawmJm3tgF5o";

/// Tunables the host reads from its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSettings {
    /// Labels of the agent-step indicators; their count is the step count.
    pub agent_steps: Vec<String>,
    pub example_topics: Vec<String>,
    pub tick_interval: Duration,
    pub notification_ttl: Duration,
    pub max_notifications: usize,
    pub initial_status_delay: Duration,
    pub copy_feedback: Duration,
    pub spreadsheet_id: String,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            agent_steps: [
                "Researching topic",
                "Verifying sources",
                "Writing headline",
                "Saving to Google Sheets",
                "Sending to Slack",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            example_topics: [
                "Artificial Intelligence",
                "Renewable Energy",
                "Space Exploration",
                "Electric Vehicles",
                "Cybersecurity",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            tick_interval: Duration::from_millis(1500),
            notification_ttl: Duration::from_secs(5),
            max_notifications: 20,
            initial_status_delay: Duration::from_secs(1),
            copy_feedback: Duration::from_secs(2),
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerLabel {
    #[default]
    Generate,
    Generating,
    RunningAutomation,
}

impl TriggerLabel {
    pub fn text(self) -> &'static str {
        match self {
            TriggerLabel::Generate => "Generate Headline",
            TriggerLabel::Generating => "Generating...",
            TriggerLabel::RunningAutomation => "Running Automation...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TriggerControl {
    pub(crate) disabled: bool,
    pub(crate) label: TriggerLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InFlight {
    Generation {
        request_id: RequestId,
        topic: String,
        animation: AnimationHandle,
    },
    Automation {
        request_id: RequestId,
    },
}

/// The results region: an optional status panel in front of the body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ResultsRegion {
    pub(crate) status_panel: Option<StatusPanel>,
    pub(crate) body: ResultsBody,
}

impl ResultsRegion {
    /// Full-result writes replace the whole region, status panel included.
    pub(crate) fn replace(&mut self, body: ResultsBody) {
        self.status_panel = None;
        self.body = body;
    }

    /// Status writes only touch the panel.
    pub(crate) fn upsert_status_panel(&mut self, panel: StatusPanel) {
        self.status_panel = Some(panel);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) settings: CoreSettings,
    pub(crate) topic_input: String,
    pub(crate) trigger: TriggerControl,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) animator: ProgressAnimator,
    pub(crate) progress_visible: bool,
    pub(crate) results: ResultsRegion,
    pub(crate) automation_badge: AutomationBadge,
    pub(crate) next_run: Option<String>,
    pub(crate) notifications: NotificationCenter,
    pub(crate) info_overlay_visible: bool,
    pub(crate) alert: Option<String>,
    pub(crate) copy_feedback: Option<u64>,
    next_request_id: RequestId,
    next_feedback_id: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(CoreSettings::default())
    }

    pub fn with_settings(settings: CoreSettings) -> Self {
        Self {
            animator: ProgressAnimator::new(settings.agent_steps.len()),
            notifications: NotificationCenter::with_cap(settings.max_notifications),
            settings,
            ..Self::default()
        }
    }

    /// True while a generation or automation request is outstanding.
    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn animator(&self) -> &ProgressAnimator {
        &self.animator
    }

    pub fn view(&self) -> AppViewModel {
        let step_states = self.animator.step_states();
        let progress = self.progress_visible.then(|| ProgressView {
            steps: self
                .settings
                .agent_steps
                .iter()
                .zip(step_states)
                .map(|(label, state)| StepView {
                    label: label.clone(),
                    state,
                })
                .collect(),
        });

        AppViewModel {
            topic_input: self.topic_input.clone(),
            example_topics: self.settings.example_topics.clone(),
            trigger: TriggerView {
                enabled: !self.trigger.disabled,
                label: self.trigger.label.text(),
            },
            progress,
            automation_badge: self.automation_badge,
            next_run: self.next_run.clone(),
            results: ResultsView {
                status_panel: self.results.status_panel.clone(),
                body: self.results.body.clone(),
            },
            notifications: self.notifications.entries().cloned().collect(),
            info_overlay_visible: self.info_overlay_visible,
            alert: self.alert.clone(),
            copy_label: if self.copy_feedback.is_some() {
                "Copied!"
            } else {
                "Copy Headline"
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn next_feedback_id(&mut self) -> u64 {
        self.next_feedback_id += 1;
        self.next_feedback_id
    }

    pub(crate) fn lock_trigger(&mut self, label: TriggerLabel) {
        self.trigger = TriggerControl {
            disabled: true,
            label,
        };
    }

    pub(crate) fn release_trigger(&mut self) {
        self.trigger = TriggerControl::default();
    }
}
