//! Headline core: pure UI state machine, result rendering and view-model helpers.
mod animator;
mod effect;
mod msg;
mod notify;
mod render;
mod state;
mod status;
mod types;
mod update;
mod view_model;

pub use animator::{AnimationHandle, ProgressAnimator, StepState};
pub use effect::{ClipboardPurpose, Effect, Timer};
pub use msg::Msg;
pub use notify::{NotificationCenter, NotificationEntry, NotificationId, NotificationKind};
pub use render::{
    normalize_headline, render_failure, render_result, share_text, slack_delivered, Badge,
    BadgeTone, ErrorView, Metadata, RenderContext, ResultsBody, SuccessView, SystemStatusRow,
    FALLBACK_AGENT_COUNT, FALLBACK_ERROR, FALLBACK_HEADLINE, SHEETS_URL_PREFIX,
    TROUBLESHOOTING_TIPS,
};
pub use state::{AppState, CoreSettings, RequestId, TriggerLabel};
pub use status::{success_rate, StatusPanel, DEFAULT_NEXT_RUN};
pub use types::{
    AutomationRun, AutomationStatus, ExecutionStats, GenerationResult, HealthReport,
    RemoteFailure, Schedule,
};
pub use update::{update, CREDITS_TEXT, EMPTY_TOPIC_MESSAGE};
pub use view_model::{
    AppViewModel, AutomationBadge, ProgressView, ResultsView, StepView, TriggerView,
};
