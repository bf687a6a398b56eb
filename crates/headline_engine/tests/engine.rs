use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use headline_engine::{
    ApiError, ClipboardAccess, ClipboardError, EngineEvent, EngineHandle, ExecutionStats,
    FailureKind, GenerateResponse, HeadlineApi, HealthResponse, StatusResponse, TriggerResponse,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(2);

#[derive(Default)]
struct ScriptedApi {
    fail_health: bool,
}

#[async_trait]
impl HeadlineApi for ScriptedApi {
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, ApiError> {
        Ok(GenerateResponse {
            success: true,
            headline: Some(format!("About {topic}")),
            ..GenerateResponse::default()
        })
    }

    async fn automation_status(&self) -> Result<StatusResponse, ApiError> {
        Ok(StatusResponse {
            statistics: ExecutionStats {
                total_executions: 4,
                successful: 3,
            },
            ..StatusResponse::default()
        })
    }

    async fn trigger_automation(&self, topic: Option<&str>) -> Result<TriggerResponse, ApiError> {
        Ok(TriggerResponse {
            success: true,
            topic: Some(topic.unwrap_or("daily").to_string()),
            ..TriggerResponse::default()
        })
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        if self.fail_health {
            return Err(ApiError::new(FailureKind::HttpStatus(503), "503"));
        }
        Ok(HealthResponse {
            status: "healthy".to_string(),
            ..HealthResponse::default()
        })
    }
}

#[derive(Default)]
struct RecordingClipboard {
    written: Mutex<Vec<String>>,
    broken: bool,
}

impl ClipboardAccess for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written
            .lock()
            .expect("clipboard lock")
            .push(text.to_string());
        Ok(())
    }
}

fn engine_with(
    api: ScriptedApi,
    clipboard: Arc<RecordingClipboard>,
) -> (EngineHandle, headline_engine::EngineEvents) {
    EngineHandle::with_backends(Arc::new(api), clipboard, Duration::from_millis(20))
}

#[test]
fn generation_reports_completion_with_request_id() {
    let (engine, events) = engine_with(ScriptedApi::default(), Arc::default());

    engine.generate(7, "tides");

    match events.recv_timeout(WAIT) {
        Some(EngineEvent::GenerationCompleted { request_id, result }) => {
            assert_eq!(request_id, 7);
            assert_eq!(
                result.expect("ok").headline.as_deref(),
                Some("About tides")
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }
    engine.shutdown();
}

#[test]
fn automation_status_and_health_are_forwarded() {
    let api = ScriptedApi { fail_health: true };
    let (engine, events) = engine_with(api, Arc::default());

    engine.trigger_automation(3, None);
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::AutomationCompleted { request_id, result }) => {
            assert_eq!(request_id, 3);
            assert_eq!(result.expect("ok").topic.as_deref(), Some("daily"));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    engine.fetch_status();
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::StatusFetched(Ok(status))) => {
            assert_eq!(status.statistics.successful, 3);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    engine.check_health();
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::HealthChecked(Err(err))) => {
            assert_eq!(err.kind, FailureKind::HttpStatus(503));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    engine.shutdown();
}

#[test]
fn ticker_ticks_until_stopped() {
    let (engine, events) = engine_with(ScriptedApi::default(), Arc::default());

    engine.start_ticker(1, Duration::from_millis(10));
    for _ in 0..3 {
        assert_eq!(
            events.recv_timeout(WAIT),
            Some(EngineEvent::Tick { ticker_id: 1 })
        );
    }

    engine.stop_ticker(1);
    // Drain ticks already queued before the stop landed.
    while events.recv_timeout(Duration::from_millis(50)).is_some() {}
    assert_eq!(events.recv_timeout(Duration::from_millis(100)), None);
    engine.shutdown();
}

#[test]
fn starting_a_ticker_replaces_the_previous_one() {
    let (engine, events) = engine_with(ScriptedApi::default(), Arc::default());

    engine.start_ticker(1, Duration::from_millis(10));
    engine.start_ticker(2, Duration::from_millis(10));
    // A stale stop must not touch the live ticker.
    engine.stop_ticker(1);

    let mut seen_two = 0;
    while seen_two < 3 {
        match events.recv_timeout(WAIT) {
            Some(EngineEvent::Tick { ticker_id: 2 }) => seen_two += 1,
            Some(EngineEvent::Tick { ticker_id: 1 }) => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
    engine.stop_ticker(2);
    engine.shutdown();
}

#[test]
fn scheduled_timer_fires_once() {
    let (engine, events) = engine_with(ScriptedApi::default(), Arc::default());

    engine.schedule(42, Duration::from_millis(10));

    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { token: 42 })
    );
    assert_eq!(events.recv_timeout(Duration::from_millis(100)), None);
    engine.shutdown();
}

#[test]
fn clipboard_writes_go_through_the_backend() {
    let clipboard = Arc::new(RecordingClipboard::default());
    let (engine, events) = engine_with(ScriptedApi::default(), clipboard.clone());

    engine.copy_text(5, "Solar Surge");

    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::ClipboardCompleted {
            token: 5,
            result: Ok(())
        })
    );
    assert_eq!(
        *clipboard.written.lock().expect("clipboard lock"),
        vec!["Solar Surge".to_string()]
    );
    engine.shutdown();
}

#[test]
fn clipboard_failure_is_reported_as_text() {
    let clipboard = Arc::new(RecordingClipboard {
        broken: true,
        ..RecordingClipboard::default()
    });
    let (engine, events) = engine_with(ScriptedApi::default(), clipboard);

    engine.copy_text(9, "x");

    match events.recv_timeout(WAIT) {
        Some(EngineEvent::ClipboardCompleted { token, result }) => {
            assert_eq!(token, 9);
            assert!(result.unwrap_err().contains("no display"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    engine.shutdown();
}

#[test]
fn shutdown_drops_pending_work() {
    let (engine, events) = engine_with(ScriptedApi::default(), Arc::default());

    engine.schedule(1, Duration::from_millis(200));
    engine.shutdown();

    assert_eq!(events.recv_timeout(Duration::from_millis(400)), None);
}
