pub const TITLE: &str = "AI Headline Generator";
pub const RULE_WIDTH: usize = 64;
pub const PROMPT: &str = "> ";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub const EMPTY_TITLE: &str = "No Headlines Yet";
pub const EMPTY_HINT: &str = "Enter a topic above to generate your first headline!";
pub const EMPTY_TIP: &str = "Try /automate to run the daily topic now.";
pub const ALERT_HINT: &str = "(press Enter to continue)";

pub const INFO_TEXT: &str = "API endpoints:\n\
    POST /api/generate            generate a headline for {topic}\n\
    GET  /api/cron/status         daily automation schedule and statistics\n\
    POST /api/automation/trigger  run the automation now, optional {topic}\n\
    GET  /api/health              service status and version\n\
    Type /close to hide this panel.";
