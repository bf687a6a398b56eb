use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;
pub type TickerId = u64;
pub type TimerToken = u64;
pub type ClipboardToken = u64;

/// `POST /api/generate` response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub key_points: Option<Vec<String>>,
    #[serde(default)]
    pub agents_used: Option<Vec<String>>,
    #[serde(default)]
    pub slack_status: Option<String>,
    #[serde(default)]
    pub spreadsheet_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ScheduleInfo {
    #[serde(default)]
    pub human_readable: String,
    #[serde(default)]
    pub in_words: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ExecutionStats {
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful: u64,
}

/// `GET /api/cron/status` response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub schedule: ScheduleInfo,
    #[serde(default)]
    pub statistics: ExecutionStats,
}

/// `POST /api/automation/trigger` response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<GenerateResponse>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/health` response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub(crate) topic: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TriggerRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) topic: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<GenerateResponse, ApiError>,
    },
    AutomationCompleted {
        request_id: RequestId,
        result: Result<TriggerResponse, ApiError>,
    },
    StatusFetched(Result<StatusResponse, ApiError>),
    HealthChecked(Result<HealthResponse, ApiError>),
    Tick { ticker_id: TickerId },
    TimerElapsed { token: TimerToken },
    ClipboardCompleted {
        token: ClipboardToken,
        result: Result<(), String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
