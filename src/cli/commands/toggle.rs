use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Transition;
use crate::ui::messages::success;
use crate::utils::format_elapsed;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut ctl = open_session(cli, cfg);

    match ctl.toggle() {
        Transition::Started { resumed_from: 0 } => success("Started"),
        Transition::Started { resumed_from } => {
            success(format!("Resumed from {}", format_elapsed(resumed_from)))
        }
        Transition::Stopped { at } => success(format!("Stopped at {}", format_elapsed(at))),
        _ => {}
    }

    Ok(())
}
