//! Slash-command table for the terminal host.
//!
//! A line starting with `/` is looked up in [`COMMANDS`]; any other line,
//! blank included, becomes the topic and is submitted, like pressing Enter in
//! the input.

use headline_core::{AppViewModel, Msg, NotificationId, ResultsBody, SuccessView};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command /{0}; type /help for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no headline to {0} yet")]
    NoHeadline(&'static str),
}

type Build = fn(&str, &AppViewModel) -> Result<Parsed, CommandError>;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    build: Build,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "generate",
        usage: "/generate [topic]",
        summary: "Generate a headline for the given or current topic",
        build: generate,
    },
    CommandSpec {
        name: "topic",
        usage: "/topic <text>",
        summary: "Set the topic without generating",
        build: |args, _| Ok(dispatch(Msg::TopicChanged(args.to_string()))),
    },
    CommandSpec {
        name: "chip",
        usage: "/chip <n>",
        summary: "Use example topic n",
        build: chip,
    },
    CommandSpec {
        name: "automate",
        usage: "/automate [topic]",
        summary: "Run the daily automation now",
        build: |args, _| {
            let topic = (!args.is_empty()).then(|| args.to_string());
            Ok(dispatch(Msg::RunAutomationClicked { topic }))
        },
    },
    CommandSpec {
        name: "status",
        usage: "/status",
        summary: "Check the automation schedule",
        build: |_, _| Ok(dispatch(Msg::CheckStatusClicked)),
    },
    CommandSpec {
        name: "copy",
        usage: "/copy [text]",
        summary: "Copy the text, or the current headline, to the clipboard",
        build: copy,
    },
    CommandSpec {
        name: "share",
        usage: "/share",
        summary: "Copy a shareable message for the current headline",
        build: share,
    },
    CommandSpec {
        name: "info",
        usage: "/info",
        summary: "Show API information",
        build: |_, _| Ok(dispatch(Msg::ShowInfo)),
    },
    CommandSpec {
        name: "close",
        usage: "/close",
        summary: "Hide API information",
        build: |_, _| Ok(dispatch(Msg::HideInfo)),
    },
    CommandSpec {
        name: "credits",
        usage: "/credits",
        summary: "Show credits",
        build: |_, _| Ok(dispatch(Msg::ShowCredits)),
    },
    CommandSpec {
        name: "test",
        usage: "/test",
        summary: "Test the connection to the server",
        build: |_, _| Ok(dispatch(Msg::TestConnectionClicked)),
    },
    CommandSpec {
        name: "dismiss",
        usage: "/dismiss <id>",
        summary: "Dismiss a notification",
        build: dismiss,
    },
    CommandSpec {
        name: "help",
        usage: "/help",
        summary: "List commands",
        build: |_, _| Ok(Parsed::Help),
    },
    CommandSpec {
        name: "quit",
        usage: "/quit",
        summary: "Exit",
        build: |_, _| Ok(Parsed::Quit),
    },
];

pub fn parse_line(line: &str, view: &AppViewModel) -> Result<Parsed, CommandError> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Parsed::Dispatch(vec![
            Msg::TopicChanged(line.to_string()),
            Msg::GenerateClicked,
        ]));
    };

    let (name, args) = match command.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (command, ""),
    };
    let spec = COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CommandError::Unknown(name.to_string()))?;
    (spec.build)(args, view)
}

pub fn help_text() -> String {
    let width = COMMANDS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    let mut text = String::from("Commands (any other text generates a headline for it):\n");
    for spec in COMMANDS {
        text.push_str(&format!("  {:width$}  {}\n", spec.usage, spec.summary));
    }
    text
}

fn dispatch(msg: Msg) -> Parsed {
    Parsed::Dispatch(vec![msg])
}

fn generate(args: &str, _view: &AppViewModel) -> Result<Parsed, CommandError> {
    if args.is_empty() {
        return Ok(dispatch(Msg::GenerateClicked));
    }
    Ok(Parsed::Dispatch(vec![
        Msg::TopicChanged(args.to_string()),
        Msg::GenerateClicked,
    ]))
}

fn chip(args: &str, view: &AppViewModel) -> Result<Parsed, CommandError> {
    const USAGE: &str = "/chip <n>";
    let index: usize = args.parse().map_err(|_| CommandError::Usage(USAGE))?;
    let topic = index
        .checked_sub(1)
        .and_then(|index| view.example_topics.get(index))
        .ok_or(CommandError::Usage(USAGE))?;
    Ok(dispatch(Msg::TopicChipSelected(topic.clone())))
}

fn copy(args: &str, view: &AppViewModel) -> Result<Parsed, CommandError> {
    if !args.is_empty() {
        return Ok(dispatch(Msg::CopyClicked(args.to_string())));
    }
    let success = current_success(view).ok_or(CommandError::NoHeadline("copy"))?;
    Ok(dispatch(Msg::CopyClicked(success.headline.clone())))
}

fn share(_args: &str, view: &AppViewModel) -> Result<Parsed, CommandError> {
    let success = current_success(view).ok_or(CommandError::NoHeadline("share"))?;
    Ok(dispatch(Msg::ShareClicked {
        headline: success.headline.clone(),
        topic: success.topic.clone(),
    }))
}

fn dismiss(args: &str, _view: &AppViewModel) -> Result<Parsed, CommandError> {
    let id = args
        .parse()
        .map_err(|_| CommandError::Usage("/dismiss <id>"))?;
    Ok(dispatch(Msg::NotificationDismissed(NotificationId(id))))
}

fn current_success(view: &AppViewModel) -> Option<&SuccessView> {
    match &view.results.body {
        ResultsBody::Success(success) => Some(success),
        _ => None,
    }
}
