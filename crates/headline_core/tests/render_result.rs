use chrono::NaiveDate;
use headline_core::{
    normalize_headline, render_result, BadgeTone, GenerationResult, RenderContext, ResultsBody,
    SuccessView, FALLBACK_AGENT_COUNT, FALLBACK_HEADLINE, SHEETS_URL_PREFIX,
};
use pretty_assertions::assert_eq;

fn ctx() -> RenderContext {
    RenderContext {
        rendered_at: NaiveDate::from_ymd_opt(2026, 10, 15)
            .and_then(|date| date.and_hms_opt(16, 7, 3))
            .unwrap(),
        spreadsheet_id: "sheet-id".to_string(),
    }
}

fn success(result: &GenerationResult) -> SuccessView {
    match render_result(result, "renewable energy", &ctx()) {
        ResultsBody::Success(view) => view,
        other => panic!("expected success view, got {other:?}"),
    }
}

#[test]
fn headline_normalization_examples() {
    assert_eq!(
        normalize_headline("HEADLINE: Cats Take Over City"),
        "Cats Take Over City"
    );
    assert_eq!(normalize_headline("\"Quoted Headline\""), "Quoted Headline");
}

#[test]
fn metadata_uses_render_time_and_fallback_agents() {
    let view = success(&GenerationResult {
        success: true,
        headline: Some("Wind Power Hits Record Output".to_string()),
        ..GenerationResult::default()
    });

    assert_eq!(view.metadata.date, "Thursday, October 15, 2026");
    assert_eq!(view.metadata.time, "04:07:03 PM");
    assert_eq!(view.metadata.words, 5);
    assert_eq!(view.metadata.agents, FALLBACK_AGENT_COUNT);
    assert_eq!(view.spreadsheet_url, format!("{SHEETS_URL_PREFIX}sheet-id"));
    assert!(view.key_points.is_empty());
}

#[test]
fn agents_are_listed_in_order() {
    let view = success(&GenerationResult {
        success: true,
        headline: Some("x".to_string()),
        agents_used: Some(vec![
            "Researcher".to_string(),
            "Slack Distributor".to_string(),
        ]),
        ..GenerationResult::default()
    });
    assert_eq!(view.metadata.agents, "Researcher, Slack Distributor");
}

#[test]
fn empty_headline_falls_back() {
    for headline in [None, Some(""), Some("HEADLINE:   "), Some("\"\"")] {
        let view = success(&GenerationResult {
            success: true,
            headline: headline.map(str::to_string),
            ..GenerationResult::default()
        });
        assert_eq!(view.headline, FALLBACK_HEADLINE);
    }
}

#[test]
fn slack_badge_follows_status() {
    let sent = success(&GenerationResult {
        success: true,
        slack_status: Some("Sent".to_string()),
        ..GenerationResult::default()
    });
    assert!(sent.sent_to_slack);
    assert_eq!(sent.badges[1].label, "Sent to Slack");
    assert_eq!(sent.system_status[1].value, "Message Sent");

    let pending = success(&GenerationResult {
        success: true,
        slack_status: Some("Pending".to_string()),
        ..GenerationResult::default()
    });
    assert!(!pending.sent_to_slack);
    assert_eq!(pending.badges[1].label, "Slack Pending");
    assert_eq!(pending.system_status[1].tone, BadgeTone::Warning);
}

#[test]
fn multi_line_headline_counts_words_across_lines() {
    let view = success(&GenerationResult {
        success: true,
        headline: Some("HEADLINE: Solar Surge\\nGrid Strains".to_string()),
        ..GenerationResult::default()
    });
    assert_eq!(
        view.headline_lines().collect::<Vec<_>>(),
        vec!["Solar Surge", "Grid Strains"]
    );
    assert_eq!(view.metadata.words, 4);
}

#[test]
fn rendering_is_idempotent() {
    let result = GenerationResult {
        success: true,
        headline: Some("HEADLINE: Solar Surge".to_string()),
        key_points: Some(vec!["a".to_string(), "b".to_string()]),
        ..GenerationResult::default()
    };
    assert_eq!(
        render_result(&result, "renewable energy", &ctx()),
        render_result(&result, "renewable energy", &ctx())
    );
}
