//! Headline engine: remote calls, timers and clipboard access for the host.
mod client;
mod clipboard;
mod engine;
mod types;

pub use client::{generate_with_floor, ClientSettings, HeadlineApi, ReqwestHeadlineApi};
pub use clipboard::{ArboardClipboard, ClipboardAccess, ClipboardError};
pub use engine::{EngineConfig, EngineEvents, EngineHandle};
pub use types::{
    ApiError, ClipboardToken, EngineEvent, ExecutionStats, FailureKind, GenerateResponse,
    HealthResponse, RequestId, ScheduleInfo, StatusResponse, TickerId, TimerToken,
    TriggerResponse,
};
