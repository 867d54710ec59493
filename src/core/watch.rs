//! Live stopwatch: a single-threaded loop fed by stdin lines and tick
//! messages. Only this loop mutates the session.

use crate::core::list::print_events;
use crate::core::session::SessionController;
use crate::core::ticker::{TickHandle, spawn_ticker};
use crate::errors::AppResult;
use crate::models::{EventKind, ObservationLabel, Transition};
use crate::ui::messages::{clock_line, info, warning};
use crate::utils::format_elapsed;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// One operator command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Toggle,
    Reset,
    Log(ObservationLabel),
    List,
    Help,
    Quit,
    Unknown(String),
}

impl WatchCommand {
    pub fn parse(line: &str) -> Self {
        let cmd = line.trim();
        match cmd.to_ascii_lowercase().as_str() {
            "" | "s" | "space" | "toggle" => Self::Toggle,
            "r" | "reset" => Self::Reset,
            "l" | "list" => Self::List,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => ObservationLabel::parse_input(cmd)
                .map(Self::Log)
                .unwrap_or_else(|| Self::Unknown(cmd.to_string())),
        }
    }
}

enum Input {
    Tick(u64),
    Line(String),
    Eof,
}

pub struct WatchLoop {
    ctl: SessionController,
    period: Duration,
    separator: String,
    tx: Sender<Input>,
    rx: Receiver<Input>,
    ticker: Option<TickHandle>,
    generation: u64,
}

impl WatchLoop {
    pub fn new(ctl: SessionController, period: Duration, separator: &str) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            ctl,
            period,
            separator: separator.to_string(),
            tx,
            rx,
            ticker: None,
            generation: 0,
        }
    }

    /// Run until `q` or end of input. The tick task is torn down on exit.
    pub fn run(mut self) -> AppResult<()> {
        spawn_stdin_reader(self.tx.clone());
        print_help();

        if self.ctl.state().running {
            self.start_ticking();
        }
        self.render();

        while let Ok(input) = self.rx.recv() {
            match input {
                Input::Tick(generation) => self.on_tick(generation),
                Input::Line(line) => {
                    if !self.on_command(WatchCommand::parse(&line)) {
                        break;
                    }
                }
                Input::Eof => break,
            }
        }

        self.stop_ticking();
        println!();
        Ok(())
    }

    fn on_tick(&mut self, generation: u64) {
        let current = self.ticker.as_ref().map(TickHandle::generation);
        if current != Some(generation) {
            log::trace!("dropping stale tick from task {generation}");
            return;
        }
        self.ctl.tick();
        self.render();
    }

    /// Returns `false` when the loop should end.
    fn on_command(&mut self, cmd: WatchCommand) -> bool {
        println!();
        match cmd {
            WatchCommand::Toggle => {
                if self.ctl.state().running {
                    // No tick may land after the stop below.
                    self.stop_ticking();
                    if let Transition::Stopped { at } = self.ctl.toggle() {
                        info(format!("Stopped at {}", format_elapsed(at)));
                    }
                } else {
                    self.ctl.toggle();
                    self.start_ticking();
                }
            }
            WatchCommand::Reset => {
                self.stop_ticking();
                self.ctl.reset();
                info("Session reset.");
            }
            WatchCommand::Log(label) => {
                if let Transition::Logged(ev) = self.ctl.log_event(EventKind::Label(label)) {
                    info(format!("{} - {}", format_elapsed(ev.time), ev.kind));
                }
            }
            WatchCommand::List => print_events(&self.ctl.state().events, &self.separator),
            WatchCommand::Help => print_help(),
            WatchCommand::Quit => return false,
            WatchCommand::Unknown(s) => warning(format!("Unknown command '{s}' (h for help)")),
        }
        self.render();
        true
    }

    fn start_ticking(&mut self) {
        self.stop_ticking();
        self.generation += 1;
        let tx = self.tx.clone();
        let generation = self.generation;
        self.ticker = Some(spawn_ticker(self.period, generation, move || {
            tx.send(Input::Tick(generation)).is_ok()
        }));
    }

    fn stop_ticking(&mut self) {
        if let Some(mut handle) = self.ticker.take() {
            handle.cancel();
        }
    }

    fn render(&self) {
        let state = self.ctl.state();
        clock_line(&format_elapsed(state.elapsed_ms), state.running);
    }
}

fn spawn_stdin_reader(tx: Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(Input::Line(l)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
        tx.send(Input::Eof).ok();
    });
}

fn print_help() {
    let labels: Vec<String> = ObservationLabel::ALL
        .iter()
        .map(|l| format!("{}={}", l.button_index(), l))
        .collect();
    info("Enter/s: start-stop   r: reset   l: list   q: quit");
    info(format!("Events: {}", labels.join("  ")));
}
