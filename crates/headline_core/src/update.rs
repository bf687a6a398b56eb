use chrono::{DateTime, NaiveDateTime};

use crate::state::InFlight;
use crate::view_model::AutomationBadge;
use crate::{
    render_failure, render_result, share_text, AppState, AutomationRun, AutomationStatus,
    ClipboardPurpose, Effect, GenerationResult, HealthReport, Msg, NotificationKind,
    RemoteFailure, RenderContext, RequestId, ResultsBody, StatusPanel, Timer, TriggerLabel,
};

pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic";

const MISSING_AUTOMATION_RESULT: &str = "server reported success without a result";

pub const CREDITS_TEXT: &str = "Built with:\n\
    - CrewAI Framework\n\
    - Google Gemini AI\n\
    - Groq AI\n\
    - Serper API\n\
    - Slack API\n\
    - Google Sheets API\n\n\
    Daily Automation via scheduled cron jobs";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::PageReady => {
            effects.push(Effect::Schedule {
                timer: Timer::InitialStatusCheck,
                after: state.settings.initial_status_delay,
            });
        }
        Msg::TopicChanged(text) | Msg::TopicChipSelected(text) => {
            if state.topic_input != text {
                state.topic_input = text;
                state.mark_dirty();
            }
        }
        Msg::GenerateClicked => submit_topic(&mut state, &mut effects),
        Msg::GenerationCompleted {
            request_id,
            outcome,
            completed_at,
        } => finish_generation(&mut state, &mut effects, request_id, outcome, completed_at),
        Msg::AnimationTick(handle) => {
            if state.animator.tick(handle) {
                state.mark_dirty();
            }
        }
        Msg::CheckStatusClicked | Msg::TimerFired(Timer::InitialStatusCheck) => {
            state.automation_badge = AutomationBadge::Checking;
            state.mark_dirty();
            effects.push(Effect::FetchAutomationStatus);
        }
        Msg::StatusLoaded(outcome) => apply_status(&mut state, outcome),
        Msg::RunAutomationClicked { topic } => run_automation(&mut state, &mut effects, topic),
        Msg::AutomationCompleted {
            request_id,
            outcome,
            completed_at,
        } => finish_automation(&mut state, &mut effects, request_id, outcome, completed_at),
        Msg::CopyClicked(text) => effects.push(Effect::CopyToClipboard {
            purpose: ClipboardPurpose::Copy,
            text,
        }),
        Msg::ShareClicked { headline, topic } => effects.push(Effect::CopyToClipboard {
            purpose: ClipboardPurpose::Share,
            text: share_text(&headline, &topic),
        }),
        Msg::ClipboardDone { purpose, result } => match (purpose, result) {
            (ClipboardPurpose::Copy, Ok(())) => {
                let feedback = state.next_feedback_id();
                state.copy_feedback = Some(feedback);
                state.mark_dirty();
                effects.push(Effect::Schedule {
                    timer: Timer::CopyFeedbackReset(feedback),
                    after: state.settings.copy_feedback,
                });
            }
            (ClipboardPurpose::Share, Ok(())) => notify(
                &mut state,
                &mut effects,
                "Headline copied to clipboard! Share it anywhere.",
                NotificationKind::Success,
            ),
            (_, Err(reason)) => notify(
                &mut state,
                &mut effects,
                format!("Failed to copy: {reason}"),
                NotificationKind::Error,
            ),
        },
        Msg::TestConnectionClicked => effects.push(Effect::CheckHealth),
        Msg::HealthChecked(outcome) => {
            let message = match outcome {
                Ok(report) => health_message(&report),
                Err(failure) => format!("Connection failed: {failure}"),
            };
            show_alert(&mut state, message);
        }
        Msg::ShowInfo => set_info_overlay(&mut state, true),
        Msg::HideInfo => set_info_overlay(&mut state, false),
        Msg::ShowCredits => show_alert(&mut state, CREDITS_TEXT.to_string()),
        Msg::AlertAcknowledged => {
            if state.alert.take().is_some() {
                state.mark_dirty();
            }
        }
        Msg::NotificationDismissed(id) | Msg::TimerFired(Timer::NotificationExpiry(id)) => {
            if state.notifications.dismiss(id) {
                state.mark_dirty();
            }
        }
        Msg::TimerFired(Timer::CopyFeedbackReset(feedback)) => {
            if state.copy_feedback == Some(feedback) {
                state.copy_feedback = None;
                state.mark_dirty();
            }
        }
        Msg::NoOp => {}
    }

    (state, effects)
}

fn submit_topic(state: &mut AppState, effects: &mut Vec<Effect>) {
    if state.trigger.disabled {
        return;
    }
    let topic = state.topic_input.trim().to_string();
    if topic.is_empty() {
        state
            .results
            .replace(ResultsBody::Message(EMPTY_TOPIC_MESSAGE.to_string()));
        state.mark_dirty();
        return;
    }

    let request_id = state.next_request_id();
    state.lock_trigger(TriggerLabel::Generating);
    if let Some(previous) = state.animator.active() {
        state.animator.stop(previous);
        effects.push(Effect::StopTicker { handle: previous });
    }
    let animation = state.animator.start();
    state.progress_visible = true;
    state.in_flight = Some(InFlight::Generation {
        request_id,
        topic: topic.clone(),
        animation,
    });
    state.mark_dirty();

    effects.push(Effect::StartTicker {
        handle: animation,
        period: state.settings.tick_interval,
    });
    effects.push(Effect::Generate { request_id, topic });
}

fn finish_generation(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    request_id: RequestId,
    outcome: Result<GenerationResult, RemoteFailure>,
    completed_at: NaiveDateTime,
) {
    let (topic, animation) = match &state.in_flight {
        Some(InFlight::Generation {
            request_id: live,
            topic,
            animation,
        }) if *live == request_id => (topic.clone(), *animation),
        _ => return,
    };

    if state.animator.stop(animation) {
        effects.push(Effect::StopTicker { handle: animation });
    }
    state.progress_visible = false;

    let body = match outcome {
        Ok(result) => render_result(&result, &topic, &render_context(state, completed_at)),
        Err(failure) => render_failure(&failure),
    };
    state.results.replace(body);
    state.in_flight = None;
    state.release_trigger();
    state.mark_dirty();
    effects.push(Effect::ScrollResultsIntoView);
}

fn run_automation(state: &mut AppState, effects: &mut Vec<Effect>, topic: Option<String>) {
    if state.trigger.disabled || state.in_flight.is_some() {
        return;
    }
    let topic = topic
        .map(|topic| topic.trim().to_string())
        .filter(|topic| !topic.is_empty());

    let request_id = state.next_request_id();
    state.lock_trigger(TriggerLabel::RunningAutomation);
    state.in_flight = Some(InFlight::Automation { request_id });
    state.mark_dirty();
    effects.push(Effect::TriggerAutomation { request_id, topic });
}

fn finish_automation(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    request_id: RequestId,
    outcome: Result<AutomationRun, RemoteFailure>,
    completed_at: NaiveDateTime,
) {
    match &state.in_flight {
        Some(InFlight::Automation { request_id: live }) if *live == request_id => {}
        _ => return,
    }
    state.in_flight = None;
    state.release_trigger();
    state.mark_dirty();

    match outcome {
        Ok(AutomationRun {
            success: true,
            result: Some(result),
            topic,
            ..
        }) => {
            let topic = topic.unwrap_or_default();
            let body = render_result(&result, &topic, &render_context(state, completed_at));
            state.results.replace(body);
            effects.push(Effect::ScrollResultsIntoView);
            notify(
                state,
                effects,
                "Automation completed successfully!",
                NotificationKind::Success,
            );
        }
        Ok(AutomationRun {
            success: true,
            result: None,
            ..
        }) => notify(
            state,
            effects,
            format!("Failed to trigger automation: {MISSING_AUTOMATION_RESULT}"),
            NotificationKind::Error,
        ),
        Ok(run) => {
            let error = run.error.unwrap_or_else(|| "Unknown error".to_string());
            notify(
                state,
                effects,
                format!("Error: {error}"),
                NotificationKind::Error,
            );
        }
        Err(failure) => notify(
            state,
            effects,
            format!("Failed to trigger automation: {failure}"),
            NotificationKind::Error,
        ),
    }
}

fn apply_status(state: &mut AppState, outcome: Result<AutomationStatus, RemoteFailure>) {
    match outcome {
        Ok(status) => {
            let panel = StatusPanel::from_status(&status);
            state.automation_badge = AutomationBadge::Active;
            state.next_run = Some(panel.next_run.clone());
            state.results.upsert_status_panel(panel);
        }
        Err(_) => state.automation_badge = AutomationBadge::Error,
    }
    state.mark_dirty();
}

fn notify(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    message: impl Into<String>,
    kind: NotificationKind,
) {
    let id = state.notifications.push(message, kind);
    state.mark_dirty();
    effects.push(Effect::Schedule {
        timer: Timer::NotificationExpiry(id),
        after: state.settings.notification_ttl,
    });
}

/// An alert that is still open keeps its text; later ones queue below it.
fn show_alert(state: &mut AppState, message: String) {
    state.alert = Some(match state.alert.take() {
        Some(pending) => format!("{pending}\n\n{message}"),
        None => message,
    });
    state.mark_dirty();
}

fn set_info_overlay(state: &mut AppState, visible: bool) {
    if state.info_overlay_visible != visible {
        state.info_overlay_visible = visible;
        state.mark_dirty();
    }
}

fn render_context(state: &AppState, rendered_at: NaiveDateTime) -> RenderContext {
    RenderContext {
        rendered_at,
        spreadsheet_id: state.settings.spreadsheet_id.clone(),
    }
}

fn health_message(report: &HealthReport) -> String {
    let time = DateTime::parse_from_rfc3339(&report.timestamp)
        .map(|stamp| stamp.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(&report.timestamp, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|stamp| stamp.format("%I:%M:%S %p").to_string())
        .unwrap_or_else(|_| report.timestamp.clone());
    format!(
        "Connection successful!\n\nStatus: {}\nVersion: {}\nTime: {}",
        report.status, report.version, time
    )
}
