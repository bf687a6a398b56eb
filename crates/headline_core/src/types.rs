use std::fmt;

/// Payload of a generation call. Every optional field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationResult {
    pub success: bool,
    pub headline: Option<String>,
    pub key_points: Option<Vec<String>>,
    pub agents_used: Option<Vec<String>>,
    pub slack_status: Option<String>,
    pub spreadsheet_link: Option<String>,
    pub error: Option<String>,
}

/// Payload of a manual automation trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutomationRun {
    pub success: bool,
    pub result: Option<GenerationResult>,
    pub topic: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub human_readable: String,
    pub in_words: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionStats {
    pub total_executions: u64,
    pub successful: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutomationStatus {
    pub schedule: Schedule,
    pub statistics: ExecutionStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Why a remote call produced no usable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Connection, timeout or undecodable body.
    Transport(String),
    /// Non-2xx response, regardless of its body.
    Protocol { status: u16 },
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFailure::Transport(reason) => write!(f, "{reason}"),
            RemoteFailure::Protocol { status } => write!(f, "HTTP error! status: {status}"),
        }
    }
}
