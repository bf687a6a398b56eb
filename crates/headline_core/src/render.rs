//! Result renderer: maps a generation payload and its topic to a display
//! structure. Everything here is pure; the wall-clock time comes in through
//! [`RenderContext`] so repeated renders of one payload compare equal.

use chrono::NaiveDateTime;

use crate::{GenerationResult, RemoteFailure};

pub const FALLBACK_HEADLINE: &str = "No headline generated";
pub const FALLBACK_ERROR: &str = "Unknown error occurred. Please check your API keys.";
pub const FALLBACK_AGENT_COUNT: &str = "2";
pub const SHEETS_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

pub const TROUBLESHOOTING_TIPS: &[&str] = &[
    "Check that all API keys are properly set in your environment variables",
    "Ensure the Google Sheet is shared with your service account",
    "Verify internet connectivity and API rate limits",
    "Try a different topic or check the log for detailed errors",
];

const HEADLINE_LABEL: &str = "HEADLINE:";
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];
const LINE_BREAK_MARKERS: &[&str] = &["\r\n", "\\n", "<br />", "<br/>", "<br>", "<BR>"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub rendered_at: NaiveDateTime,
    pub spreadsheet_id: String,
}

/// Content of the results region below the status panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsBody {
    #[default]
    Empty,
    /// Short inline message, used for input validation.
    Message(String),
    Success(SuccessView),
    Error(ErrorView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub date: String,
    pub time: String,
    pub words: usize,
    pub agents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatusRow {
    pub label: &'static str,
    pub value: &'static str,
    pub tone: BadgeTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessView {
    pub topic: String,
    /// Normalized headline; line breaks are kept as `\n`.
    pub headline: String,
    pub key_points: Vec<String>,
    pub sent_to_slack: bool,
    pub badges: Vec<Badge>,
    pub metadata: Metadata,
    pub spreadsheet_url: String,
    pub system_status: Vec<SystemStatusRow>,
}

impl SuccessView {
    pub fn headline_lines(&self) -> impl Iterator<Item = &str> {
        self.headline.lines()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub title: &'static str,
    pub message: String,
    pub tips: &'static [&'static str],
}

/// Renders a payload. Branches only on `result.success`.
pub fn render_result(result: &GenerationResult, topic: &str, ctx: &RenderContext) -> ResultsBody {
    if result.success {
        ResultsBody::Success(success_view(result, topic, ctx))
    } else {
        let message = result
            .error
            .as_deref()
            .map(str::trim)
            .filter(|error| !error.is_empty())
            .unwrap_or(FALLBACK_ERROR);
        ResultsBody::Error(error_view(message.to_string()))
    }
}

/// Renders a call that never produced a payload.
pub fn render_failure(failure: &RemoteFailure) -> ResultsBody {
    ResultsBody::Error(error_view(format!(
        "Error: {failure}. Check the log for details."
    )))
}

/// Strips the `HEADLINE:` label and wrapping quotes, and turns line-break
/// markers into `\n`. May return an empty string.
pub fn normalize_headline(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(prefix) = text.get(..HEADLINE_LABEL.len()) {
        if prefix.eq_ignore_ascii_case(HEADLINE_LABEL) {
            text = text[HEADLINE_LABEL.len()..].trim_start();
        }
    }
    let text = strip_wrapping_quotes(text.trim());

    let mut unified = text.to_string();
    for marker in LINE_BREAK_MARKERS {
        unified = unified.replace(marker, "\n");
    }
    unified
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when the status is exactly "Sent" or mentions "success" in any case.
pub fn slack_delivered(status: Option<&str>) -> bool {
    match status {
        Some(status) => status == "Sent" || status.to_lowercase().contains("success"),
        None => false,
    }
}

pub fn share_text(headline: &str, topic: &str) -> String {
    format!(
        "Check out this AI-generated headline about {topic}: \"{headline}\"\n\nGenerated by AI Headline Generator"
    )
}

fn strip_wrapping_quotes(mut text: &str) -> &str {
    loop {
        let mut chars = text.chars();
        let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
            return text;
        };
        let wrapped = QUOTE_PAIRS
            .iter()
            .any(|(open, close)| first == *open && last == *close);
        if !wrapped {
            return text;
        }
        text = text[first.len_utf8()..text.len() - last.len_utf8()].trim();
    }
}

fn success_view(result: &GenerationResult, topic: &str, ctx: &RenderContext) -> SuccessView {
    let normalized = result
        .headline
        .as_deref()
        .map(normalize_headline)
        .unwrap_or_default();
    let headline = if normalized.is_empty() {
        FALLBACK_HEADLINE.to_string()
    } else {
        normalized
    };

    let sent_to_slack = slack_delivered(result.slack_status.as_deref());
    let agents = match &result.agents_used {
        Some(agents) => agents.join(", "),
        None => FALLBACK_AGENT_COUNT.to_string(),
    };

    SuccessView {
        topic: topic.to_string(),
        metadata: Metadata {
            date: ctx.rendered_at.format("%A, %B %-d, %Y").to_string(),
            time: ctx.rendered_at.format("%I:%M:%S %p").to_string(),
            words: headline.split_whitespace().count(),
            agents,
        },
        headline,
        key_points: result.key_points.clone().unwrap_or_default(),
        sent_to_slack,
        badges: vec![
            Badge {
                label: "Generated",
                tone: BadgeTone::Success,
            },
            if sent_to_slack {
                Badge {
                    label: "Sent to Slack",
                    tone: BadgeTone::Success,
                }
            } else {
                Badge {
                    label: "Slack Pending",
                    tone: BadgeTone::Info,
                }
            },
            Badge {
                label: "Saved to Sheets",
                tone: BadgeTone::Info,
            },
        ],
        spreadsheet_url: spreadsheet_url(result.spreadsheet_link.as_deref(), &ctx.spreadsheet_id),
        system_status: system_status(sent_to_slack),
    }
}

fn error_view(message: String) -> ErrorView {
    ErrorView {
        title: "Generation Failed",
        message,
        tips: TROUBLESHOOTING_TIPS,
    }
}

fn spreadsheet_url(link: Option<&str>, default_id: &str) -> String {
    match link.map(str::trim).filter(|link| !link.is_empty()) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_string(),
        Some(id) => format!("{SHEETS_URL_PREFIX}{id}"),
        None => format!("{SHEETS_URL_PREFIX}{default_id}"),
    }
}

fn system_status(sent_to_slack: bool) -> Vec<SystemStatusRow> {
    vec![
        SystemStatusRow {
            label: "Research Agent",
            value: "Complete",
            tone: BadgeTone::Success,
        },
        if sent_to_slack {
            SystemStatusRow {
                label: "Slack Integration",
                value: "Message Sent",
                tone: BadgeTone::Success,
            }
        } else {
            SystemStatusRow {
                label: "Slack Integration",
                value: "Check Configuration",
                tone: BadgeTone::Warning,
            }
        },
        SystemStatusRow {
            label: "Google Sheets",
            value: "Data Saved",
            tone: BadgeTone::Success,
        },
        SystemStatusRow {
            label: "API Connection",
            value: "Active",
            tone: BadgeTone::Success,
        },
    ]
}
