use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use app_logging::{app_debug, app_info, app_warn};
use headline_core::{update, AppState, Msg};
use headline_engine::EngineHandle;

use super::commands::{self, Parsed};
use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::ui;
use super::ui::constants::{CLEAR_SCREEN, PROMPT};

/// Everything the dispatch loop reacts to.
pub enum HostEvent {
    Core(Msg),
    Input(String),
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path(std::env::args().skip(1));
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    app_logging::initialize(
        config.log_destination(),
        app_logging::level_from_env(config.log_level()),
    );
    app_info!("headline_app starting against {}", config.base_url);

    let (engine, events) = EngineHandle::new(config.engine_config())
        .with_context(|| format!("connecting to {}", config.base_url))?;
    let (host_tx, host_rx) = mpsc::channel();
    let runner = EffectRunner::new(engine, events, host_tx.clone());
    spawn_input_reader(host_tx);

    let mut host = Host {
        state: AppState::with_settings(config.core_settings()),
        runner,
        out: io::stdout(),
    };
    host.draw(false)?;
    host.dispatch([Msg::PageReady])?;

    while let Ok(event) = host_rx.recv() {
        match event {
            HostEvent::Core(msg) => host.dispatch([msg])?,
            HostEvent::Input(line) => {
                if host.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            HostEvent::InputClosed => break,
        }
    }

    host.runner.shutdown();
    app_info!("headline_app stopped");
    Ok(())
}

struct Host {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl Host {
    /// Applies `msgs` in order and redraws once if anything changed.
    fn dispatch(&mut self, msgs: impl IntoIterator<Item = Msg>) -> io::Result<()> {
        let mut was_dirty = false;
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            was_dirty |= state.consume_dirty();
            self.state = state;
            self.runner.enqueue(effects);
        }

        let scroll = self.runner.take_scroll_request();
        if was_dirty || scroll {
            self.draw(scroll)?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let view = self.state.view();
        // An open alert swallows the next line as its acknowledgment.
        if view.alert.is_some() {
            self.dispatch([Msg::AlertAcknowledged])?;
            return Ok(Flow::Continue);
        }

        match commands::parse_line(line, &view) {
            Ok(Parsed::Dispatch(msgs)) => self.dispatch(msgs)?,
            Ok(Parsed::Help) => self.print(&commands::help_text())?,
            Ok(Parsed::Quit) => return Ok(Flow::Quit),
            Err(err) => {
                app_debug!("Rejected input {:?}: {}", line, err);
                self.print(&format!("{err}\n"))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self, clear: bool) -> io::Result<()> {
        let frame = ui::render::render(&self.state.view());
        let mut out = self.out.lock();
        if clear {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        out.write_all(frame.as_bytes())?;
        out.write_all(PROMPT.as_bytes())?;
        out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        out.write_all(PROMPT.as_bytes())?;
        out.flush()
    }
}

fn spawn_input_reader(host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if host_tx.send(HostEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    app_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = host_tx.send(HostEvent::InputClosed);
    });
}
