use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use app_logging::{app_debug, app_info, app_warn};
use chrono::{Local, NaiveDateTime};
use headline_core::{
    AnimationHandle, AutomationRun, AutomationStatus, ClipboardPurpose, Effect, ExecutionStats,
    GenerationResult, HealthReport, Msg, RemoteFailure, Schedule, Timer,
};
use headline_engine::{
    ApiError, EngineEvent, EngineEvents, EngineHandle, FailureKind, GenerateResponse,
    HealthResponse, StatusResponse, TriggerResponse,
};

use super::app::HostEvent;

type Pending<T> = Arc<Mutex<HashMap<u64, T>>>;

/// Runs core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    timers: Pending<Timer>,
    clipboard: Pending<ClipboardPurpose>,
    next_token: u64,
    scroll_requested: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, host_tx: mpsc::Sender<HostEvent>) -> Self {
        let runner = Self {
            engine,
            timers: Arc::default(),
            clipboard: Arc::default(),
            next_token: 0,
            scroll_requested: false,
        };
        runner.spawn_event_pump(events, host_tx);
        runner
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            app_debug!("Running effect {:?}", effect);
            match effect {
                Effect::Generate { request_id, topic } => {
                    app_info!("Generate request_id={} topic={:?}", request_id, topic);
                    self.engine.generate(request_id, topic);
                }
                Effect::TriggerAutomation { request_id, topic } => {
                    app_info!("Trigger automation request_id={} topic={:?}", request_id, topic);
                    self.engine.trigger_automation(request_id, topic);
                }
                Effect::FetchAutomationStatus => self.engine.fetch_status(),
                Effect::CheckHealth => self.engine.check_health(),
                Effect::StartTicker { handle, period } => self.engine.start_ticker(handle.0, period),
                Effect::StopTicker { handle } => self.engine.stop_ticker(handle.0),
                Effect::Schedule { timer, after } => {
                    let token = self.next_token();
                    lock(&self.timers).insert(token, timer);
                    self.engine.schedule(token, after);
                }
                Effect::CopyToClipboard { purpose, text } => {
                    let token = self.next_token();
                    lock(&self.clipboard).insert(token, purpose);
                    self.engine.copy_text(token, text);
                }
                Effect::ScrollResultsIntoView => self.scroll_requested = true,
            }
        }
    }

    /// True once after a `ScrollResultsIntoView` effect.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn spawn_event_pump(&self, events: EngineEvents, host_tx: mpsc::Sender<HostEvent>) {
        let timers = self.timers.clone();
        let clipboard = self.clipboard.clone();
        thread::spawn(move || {
            while let Some(event) = events.recv() {
                let Some(msg) = translate(event, &timers, &clipboard, now()) else {
                    continue;
                };
                if host_tx.send(HostEvent::Core(msg)).is_err() {
                    break;
                }
            }
            app_debug!("Engine event pump stopped");
        });
    }
}

fn translate(
    event: EngineEvent,
    timers: &Mutex<HashMap<u64, Timer>>,
    clipboard: &Mutex<HashMap<u64, ClipboardPurpose>>,
    completed_at: NaiveDateTime,
) -> Option<Msg> {
    let msg = match event {
        EngineEvent::GenerationCompleted { request_id, result } => Msg::GenerationCompleted {
            request_id,
            outcome: result.map(generation_result).map_err(remote_failure),
            completed_at,
        },
        EngineEvent::AutomationCompleted { request_id, result } => Msg::AutomationCompleted {
            request_id,
            outcome: result.map(automation_run).map_err(remote_failure),
            completed_at,
        },
        EngineEvent::StatusFetched(result) => {
            if let Err(err) = &result {
                app_warn!("Automation status check failed: {}", err);
            }
            Msg::StatusLoaded(result.map(automation_status).map_err(remote_failure))
        }
        EngineEvent::HealthChecked(result) => {
            if let Err(err) = &result {
                app_warn!("Health check failed: {}", err);
            }
            Msg::HealthChecked(result.map(health_report).map_err(remote_failure))
        }
        EngineEvent::Tick { ticker_id } => Msg::AnimationTick(AnimationHandle(ticker_id)),
        EngineEvent::TimerElapsed { token } => match lock(timers).remove(&token) {
            Some(timer) => Msg::TimerFired(timer),
            None => {
                app_warn!("Timer token {} has no pending timer", token);
                return None;
            }
        },
        EngineEvent::ClipboardCompleted { token, result } => {
            let Some(purpose) = lock(clipboard).remove(&token) else {
                app_warn!("Clipboard token {} has no pending write", token);
                return None;
            };
            if let Err(reason) = &result {
                app_warn!("Clipboard write failed: {}", reason);
            }
            Msg::ClipboardDone { purpose, result }
        }
    };
    Some(msg)
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Non-2xx maps to a protocol failure; everything else failed in transport.
fn remote_failure(err: ApiError) -> RemoteFailure {
    match err.kind {
        FailureKind::HttpStatus(status) => RemoteFailure::Protocol { status },
        _ => RemoteFailure::Transport(err.message),
    }
}

fn generation_result(response: GenerateResponse) -> GenerationResult {
    GenerationResult {
        success: response.success,
        headline: response.headline,
        key_points: response.key_points,
        agents_used: response.agents_used,
        slack_status: response.slack_status,
        spreadsheet_link: response.spreadsheet_link,
        error: response.error,
    }
}

fn automation_run(response: TriggerResponse) -> AutomationRun {
    AutomationRun {
        success: response.success,
        result: response.result.map(generation_result),
        topic: response.topic,
        error: response.error,
    }
}

fn automation_status(response: StatusResponse) -> AutomationStatus {
    AutomationStatus {
        schedule: Schedule {
            human_readable: response.schedule.human_readable,
            in_words: response.schedule.in_words,
        },
        statistics: ExecutionStats {
            total_executions: response.statistics.total_executions,
            successful: response.statistics.successful,
        },
    }
}

fn health_report(response: HealthResponse) -> HealthReport {
    HealthReport {
        status: response.status,
        version: response.version,
        timestamp: response.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use headline_core::NotificationId;
    use headline_engine::EngineConfig;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .and_then(|date| date.and_hms_opt(16, 7, 3))
            .expect("valid timestamp")
    }

    fn pending<T>() -> Mutex<HashMap<u64, T>> {
        Mutex::new(HashMap::new())
    }

    #[test]
    fn http_status_becomes_protocol_failure() {
        let failure = remote_failure(ApiError::new(FailureKind::HttpStatus(502), "502 Bad Gateway"));
        assert_eq!(failure, RemoteFailure::Protocol { status: 502 });
        assert_eq!(failure.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn other_failures_keep_their_message() {
        let failure = remote_failure(ApiError::new(FailureKind::Timeout, "operation timed out"));
        assert_eq!(
            failure,
            RemoteFailure::Transport("operation timed out".to_string())
        );
    }

    #[test]
    fn generation_completion_carries_payload_and_time() {
        let event = EngineEvent::GenerationCompleted {
            request_id: 4,
            result: Ok(GenerateResponse {
                success: true,
                headline: Some("Solar Surge".to_string()),
                ..GenerateResponse::default()
            }),
        };

        let msg = translate(event, &pending(), &pending(), at());

        assert_eq!(
            msg,
            Some(Msg::GenerationCompleted {
                request_id: 4,
                outcome: Ok(GenerationResult {
                    success: true,
                    headline: Some("Solar Surge".to_string()),
                    ..GenerationResult::default()
                }),
                completed_at: at(),
            })
        );
    }

    #[test]
    fn automation_result_is_nested() {
        let event = EngineEvent::AutomationCompleted {
            request_id: 9,
            result: Ok(TriggerResponse {
                success: true,
                topic: Some("Space".to_string()),
                result: Some(GenerateResponse {
                    headline: Some("Orbit".to_string()),
                    ..GenerateResponse::default()
                }),
                error: None,
            }),
        };

        let Some(Msg::AutomationCompleted { outcome, .. }) =
            translate(event, &pending(), &pending(), at())
        else {
            panic!("expected automation completion");
        };
        let run = outcome.expect("ok");
        assert_eq!(run.topic.as_deref(), Some("Space"));
        assert_eq!(
            run.result.and_then(|result| result.headline).as_deref(),
            Some("Orbit")
        );
    }

    #[test]
    fn ticks_map_to_animation_handles() {
        let msg = translate(EngineEvent::Tick { ticker_id: 3 }, &pending(), &pending(), at());
        assert_eq!(msg, Some(Msg::AnimationTick(AnimationHandle(3))));
    }

    #[test]
    fn timer_tokens_resolve_once() {
        let timers = pending();
        lock(&timers).insert(1, Timer::NotificationExpiry(NotificationId(7)));

        let first = translate(EngineEvent::TimerElapsed { token: 1 }, &timers, &pending(), at());
        let second = translate(EngineEvent::TimerElapsed { token: 1 }, &timers, &pending(), at());

        assert_eq!(
            first,
            Some(Msg::TimerFired(Timer::NotificationExpiry(NotificationId(7))))
        );
        assert_eq!(second, None);
    }

    #[test]
    fn clipboard_tokens_resolve_to_purpose() {
        let clipboard = pending();
        lock(&clipboard).insert(2, ClipboardPurpose::Share);

        let msg = translate(
            EngineEvent::ClipboardCompleted {
                token: 2,
                result: Err("no display".to_string()),
            },
            &pending(),
            &clipboard,
            at(),
        );

        assert_eq!(
            msg,
            Some(Msg::ClipboardDone {
                purpose: ClipboardPurpose::Share,
                result: Err("no display".to_string()),
            })
        );
    }

    #[test]
    fn status_failure_maps_to_status_loaded_error() {
        let msg = translate(
            EngineEvent::StatusFetched(Err(ApiError::new(FailureKind::Network, "refused"))),
            &pending(),
            &pending(),
            at(),
        );
        assert_eq!(
            msg,
            Some(Msg::StatusLoaded(Err(RemoteFailure::Transport(
                "refused".to_string()
            ))))
        );
    }

    #[test]
    fn scheduled_timer_comes_back_as_message() {
        let (engine, events) = EngineHandle::new(EngineConfig::default()).expect("engine");
        let (host_tx, host_rx) = mpsc::channel();
        let mut runner = EffectRunner::new(engine, events, host_tx);

        runner.enqueue(vec![
            Effect::Schedule {
                timer: Timer::InitialStatusCheck,
                after: Duration::from_millis(10),
            },
            Effect::ScrollResultsIntoView,
        ]);

        match host_rx.recv_timeout(Duration::from_secs(2)) {
            Ok(HostEvent::Core(msg)) => {
                assert_eq!(msg, Msg::TimerFired(Timer::InitialStatusCheck));
            }
            _ => panic!("expected timer message"),
        }
        assert!(runner.take_scroll_request());
        assert!(!runner.take_scroll_request());
        runner.shutdown();
    }
}
