use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{EventKind, ObservationLabel, Transition};
use crate::ui::messages::{info, success};
use crate::utils::format_elapsed;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Event { label } = &cli.command {
        // Validate before touching the store.
        let label: ObservationLabel = label.parse()?;
        let mut ctl = open_session(cli, cfg);

        if let Transition::Logged(ev) = ctl.log_event(EventKind::Label(label)) {
            success(format!("{} - {}", format_elapsed(ev.time), ev.kind));
        }
        if !ctl.state().running {
            info("Clock is not running; event logged at the frozen time.");
        }
    }
    Ok(())
}
