use crate::{NotificationEntry, ResultsBody, StatusPanel, StepState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutomationBadge {
    #[default]
    Unknown,
    Checking,
    Active,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub label: String,
    pub state: StepState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub steps: Vec<StepView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub status_panel: Option<StatusPanel>,
    pub body: ResultsBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub topic_input: String,
    pub example_topics: Vec<String>,
    pub trigger: TriggerView,
    /// Present while the progress surface is open.
    pub progress: Option<ProgressView>,
    pub automation_badge: AutomationBadge,
    pub next_run: Option<String>,
    pub results: ResultsView,
    pub notifications: Vec<NotificationEntry>,
    pub info_overlay_visible: bool,
    /// Blocking message the user must acknowledge.
    pub alert: Option<String>,
    pub copy_label: &'static str,
    pub dirty: bool,
}
