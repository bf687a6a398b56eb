use std::future::Future;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use app_logging::{app_debug, app_error, app_warn};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::client::{generate_with_floor, ClientSettings, HeadlineApi, ReqwestHeadlineApi};
use crate::clipboard::{ArboardClipboard, ClipboardAccess};
use crate::{ApiError, ClipboardToken, EngineEvent, RequestId, TickerId, TimerToken};

const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    /// Minimum time between issuing a generation call and reporting a
    /// successful response.
    pub settle_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            client: ClientSettings::default(),
            settle_delay: Duration::from_secs(5),
        }
    }
}

enum EngineCommand {
    Generate {
        request_id: RequestId,
        topic: String,
    },
    TriggerAutomation {
        request_id: RequestId,
        topic: Option<String>,
    },
    FetchStatus,
    CheckHealth,
    StartTicker {
        ticker_id: TickerId,
        period: Duration,
    },
    StopTicker {
        ticker_id: TickerId,
    },
    Schedule {
        token: TimerToken,
        after: Duration,
    },
    CopyText {
        token: ClipboardToken,
        text: String,
    },
    Shutdown,
}

/// Command side of the engine. Every call returns immediately; outcomes
/// arrive on the paired [`EngineEvents`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    cancel: CancellationToken,
}

/// Event side of the engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<(Self, EngineEvents), ApiError> {
        let api = Arc::new(ReqwestHeadlineApi::new(&config.client)?);
        Ok(Self::with_backends(
            api,
            Arc::new(ArboardClipboard),
            config.settle_delay,
        ))
    }

    pub fn with_backends(
        api: Arc<dyn HeadlineApi>,
        clipboard: Arc<dyn ClipboardAccess>,
        settle_delay: Duration,
    ) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();

        let worker = Worker {
            api,
            clipboard,
            settle_delay,
            event_tx,
            cancel: cancel.clone(),
            ticker: None,
        };
        thread::spawn(move || worker.run(cmd_rx));

        (Self { cmd_tx, cancel }, EngineEvents { event_rx })
    }

    pub fn generate(&self, request_id: RequestId, topic: impl Into<String>) {
        self.send(EngineCommand::Generate {
            request_id,
            topic: topic.into(),
        });
    }

    pub fn trigger_automation(&self, request_id: RequestId, topic: Option<String>) {
        self.send(EngineCommand::TriggerAutomation { request_id, topic });
    }

    pub fn fetch_status(&self) {
        self.send(EngineCommand::FetchStatus);
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    /// Starts a repeating tick, replacing any ticker still running.
    pub fn start_ticker(&self, ticker_id: TickerId, period: Duration) {
        self.send(EngineCommand::StartTicker { ticker_id, period });
    }

    /// Stops the ticker if `ticker_id` is the live one.
    pub fn stop_ticker(&self, ticker_id: TickerId) {
        self.send(EngineCommand::StopTicker { ticker_id });
    }

    pub fn schedule(&self, token: TimerToken, after: Duration) {
        self.send(EngineCommand::Schedule { token, after });
    }

    pub fn copy_text(&self, token: ClipboardToken, text: impl Into<String>) {
        self.send(EngineCommand::CopyText {
            token,
            text: text.into(),
        });
    }

    /// Cancels every outstanding call, ticker and timer. Their events are
    /// never delivered.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.send(EngineCommand::Shutdown);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            app_warn!("engine worker is gone; command dropped");
        }
    }
}

struct Worker {
    api: Arc<dyn HeadlineApi>,
    clipboard: Arc<dyn ClipboardAccess>,
    settle_delay: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    cancel: CancellationToken,
    ticker: Option<(TickerId, JoinHandle<()>)>,
}

impl Worker {
    fn run(mut self, cmd_rx: mpsc::Receiver<EngineCommand>) {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                app_error!("Failed to start engine runtime: {}", err);
                return;
            }
        };

        while let Ok(command) = cmd_rx.recv() {
            if matches!(command, EngineCommand::Shutdown) {
                break;
            }
            self.handle_command(&runtime, command);
        }

        self.cancel.cancel();
        if let Some((_, task)) = self.ticker.take() {
            task.abort();
        }
        app_debug!("Engine worker stopped");
    }

    fn handle_command(&mut self, runtime: &Runtime, command: EngineCommand) {
        match command {
            EngineCommand::Generate { request_id, topic } => {
                let api = self.api.clone();
                let floor = self.settle_delay;
                self.spawn_reported(runtime, async move {
                    let result = generate_with_floor(api.as_ref(), &topic, floor).await;
                    if let Err(err) = &result {
                        app_warn!("Generation request {} failed: {}", request_id, err);
                    }
                    EngineEvent::GenerationCompleted { request_id, result }
                });
            }
            EngineCommand::TriggerAutomation { request_id, topic } => {
                let api = self.api.clone();
                self.spawn_reported(runtime, async move {
                    let result = api.trigger_automation(topic.as_deref()).await;
                    if let Err(err) = &result {
                        app_warn!("Automation trigger {} failed: {}", request_id, err);
                    }
                    EngineEvent::AutomationCompleted { request_id, result }
                });
            }
            EngineCommand::FetchStatus => {
                let api = self.api.clone();
                self.spawn_reported(runtime, async move {
                    EngineEvent::StatusFetched(api.automation_status().await)
                });
            }
            EngineCommand::CheckHealth => {
                let api = self.api.clone();
                self.spawn_reported(runtime, async move {
                    EngineEvent::HealthChecked(api.health().await)
                });
            }
            EngineCommand::StartTicker { ticker_id, period } => {
                if let Some((previous, task)) = self.ticker.take() {
                    app_debug!("Ticker {} replaced by {}", previous, ticker_id);
                    task.abort();
                }
                let task = runtime.spawn(run_ticker(
                    ticker_id,
                    period.max(MIN_TICK_PERIOD),
                    self.event_tx.clone(),
                    self.cancel.clone(),
                ));
                self.ticker = Some((ticker_id, task));
            }
            EngineCommand::StopTicker { ticker_id } => match self.ticker.take() {
                Some((live, task)) if live == ticker_id => task.abort(),
                other => self.ticker = other,
            },
            EngineCommand::Schedule { token, after } => {
                self.spawn_reported(runtime, async move {
                    sleep(after).await;
                    EngineEvent::TimerElapsed { token }
                });
            }
            EngineCommand::CopyText { token, text } => {
                let clipboard = self.clipboard.clone();
                self.spawn_reported(runtime, async move {
                    let result = match tokio::task::spawn_blocking(move || clipboard.set_text(&text))
                        .await
                    {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(err)) => Err(err.to_string()),
                        Err(err) => Err(err.to_string()),
                    };
                    EngineEvent::ClipboardCompleted { token, result }
                });
            }
            EngineCommand::Shutdown => {}
        }
    }

    /// Runs `task` and forwards its event unless the engine shuts down first.
    fn spawn_reported<F>(&self, runtime: &Runtime, task: F)
    where
        F: Future<Output = EngineEvent> + Send + 'static,
    {
        let event_tx = self.event_tx.clone();
        let cancel = self.cancel.clone();
        runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                event = task => {
                    let _ = event_tx.send(event);
                }
            }
        });
    }
}

async fn run_ticker(
    ticker_id: TickerId,
    period: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    cancel: CancellationToken,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if event_tx.send(EngineEvent::Tick { ticker_id }).is_err() {
                    break;
                }
            }
        }
    }
}
