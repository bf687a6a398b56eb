use std::fmt::{self, Write};

use headline_core::{
    AppViewModel, AutomationBadge, BadgeTone, ErrorView, NotificationKind, ProgressView,
    ResultsBody, StatusPanel, StepState, SuccessView,
};

use super::constants::{
    ALERT_HINT, EMPTY_HINT, EMPTY_TIP, EMPTY_TITLE, INFO_TEXT, RULE_WIDTH, TITLE,
};

/// Renders the whole view as one text frame.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &AppViewModel) -> fmt::Result {
    rule(out, TITLE)?;
    write_automation(out, view)?;
    writeln!(out)?;
    write_input(out, view)?;

    if let Some(progress) = &view.progress {
        writeln!(out)?;
        write_progress(out, progress)?;
    }

    writeln!(out)?;
    rule(out, "Results")?;
    if let Some(panel) = &view.results.status_panel {
        write_status_panel(out, panel)?;
        writeln!(out)?;
    }
    match &view.results.body {
        ResultsBody::Empty => write_empty(out)?,
        ResultsBody::Message(message) => writeln!(out, "  {message}")?,
        ResultsBody::Success(success) => write_success(out, success, view.copy_label)?,
        ResultsBody::Error(error) => write_error(out, error)?,
    }

    if view.info_overlay_visible {
        writeln!(out)?;
        rule(out, "API Info")?;
        for line in INFO_TEXT.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    if !view.notifications.is_empty() {
        writeln!(out)?;
        rule(out, "Notifications")?;
        for entry in &view.notifications {
            writeln!(
                out,
                "  #{} {} {}",
                entry.id.0,
                notification_marker(entry.kind),
                entry.message
            )?;
        }
    }

    if let Some(alert) = &view.alert {
        writeln!(out)?;
        rule(out, "Alert")?;
        for line in alert.lines() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "  {ALERT_HINT}")?;
    }
    rule(out, "")
}

fn write_automation(out: &mut String, view: &AppViewModel) -> fmt::Result {
    write!(out, "Automation: {}", automation_label(view.automation_badge))?;
    if let Some(next_run) = &view.next_run {
        write!(out, "  |  Next run: {next_run}")?;
    }
    writeln!(out)
}

fn write_input(out: &mut String, view: &AppViewModel) -> fmt::Result {
    writeln!(out, "Topic: {}", view.topic_input)?;
    if !view.example_topics.is_empty() {
        let chips: Vec<String> = view
            .example_topics
            .iter()
            .enumerate()
            .map(|(index, topic)| format!("{}) {}", index + 1, topic))
            .collect();
        writeln!(out, "Examples: {}", chips.join("  "))?;
    }
    let state = if view.trigger.enabled { "" } else { " (busy)" };
    writeln!(out, "[{}]{}", view.trigger.label, state)
}

fn write_progress(out: &mut String, progress: &ProgressView) -> fmt::Result {
    writeln!(out, "Agents at work:")?;
    for step in &progress.steps {
        let marker = match step.state {
            StepState::Done => "[x]",
            StepState::Current => "[>]",
            StepState::Pending => "[ ]",
        };
        writeln!(out, "  {marker} {}", step.label)?;
    }
    Ok(())
}

fn write_status_panel(out: &mut String, panel: &StatusPanel) -> fmt::Result {
    writeln!(out, "  Automation Status")?;
    writeln!(out, "    Schedule:     {}", panel.schedule)?;
    writeln!(out, "    Next Run:     {}", panel.next_run)?;
    writeln!(out, "    Total Runs:   {}", panel.total_runs)?;
    writeln!(out, "    Success Rate: {}%", panel.success_rate)
}

fn write_empty(out: &mut String) -> fmt::Result {
    writeln!(out, "  {EMPTY_TITLE}")?;
    writeln!(out, "  {EMPTY_HINT}")?;
    writeln!(out, "  {EMPTY_TIP}")
}

fn write_success(out: &mut String, success: &SuccessView, copy_label: &str) -> fmt::Result {
    let badges: Vec<String> = success
        .badges
        .iter()
        .map(|badge| format!("[{} {}]", tone_marker(badge.tone), badge.label))
        .collect();
    writeln!(out, "  {}", badges.join(" "))?;
    writeln!(out, "  Topic: {}", success.topic)?;
    writeln!(out)?;
    for line in success.headline_lines() {
        writeln!(out, "    {line}")?;
    }

    if !success.key_points.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Key Points:")?;
        for (index, point) in success.key_points.iter().enumerate() {
            writeln!(out, "    {}. {}", index + 1, point)?;
        }
    }

    let meta = &success.metadata;
    writeln!(out)?;
    writeln!(out, "  Date:   {}", meta.date)?;
    writeln!(out, "  Time:   {}", meta.time)?;
    writeln!(out, "  Words:  {}", meta.words)?;
    writeln!(out, "  Agents: {}", meta.agents)?;
    writeln!(out, "  Sheet:  {}", success.spreadsheet_url)?;

    writeln!(out)?;
    writeln!(out, "  System Status")?;
    for row in &success.system_status {
        writeln!(
            out,
            "    {} {:<18} {}",
            tone_marker(row.tone),
            row.label,
            row.value
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  /copy: {copy_label}   /share: Share")
}

fn write_error(out: &mut String, error: &ErrorView) -> fmt::Result {
    writeln!(out, "  [!] {}", error.title)?;
    writeln!(out, "  {}", error.message)?;
    writeln!(out)?;
    writeln!(out, "  Troubleshooting Tips:")?;
    for tip in error.tips {
        writeln!(out, "    - {tip}")?;
    }
    Ok(())
}

fn rule(out: &mut String, label: &str) -> fmt::Result {
    if label.is_empty() {
        return writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    }
    let head = format!("== {label} ");
    let fill = RULE_WIDTH.saturating_sub(head.chars().count());
    writeln!(out, "{head}{}", "=".repeat(fill))
}

fn automation_label(badge: AutomationBadge) -> &'static str {
    match badge {
        AutomationBadge::Unknown => "Unknown",
        AutomationBadge::Checking => "Checking...",
        AutomationBadge::Active => "Active",
        AutomationBadge::Error => "Error",
    }
}

fn tone_marker(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Success => "ok",
        BadgeTone::Info => "i",
        BadgeTone::Warning => "!",
        BadgeTone::Error => "x",
    }
}

fn notification_marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "[ok]",
        NotificationKind::Error => "[error]",
        NotificationKind::Info => "[info]",
    }
}
