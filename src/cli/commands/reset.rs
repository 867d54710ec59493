use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut ctl = open_session(cli, cfg);
    let cleared = ctl.state().events.len();
    ctl.reset();
    success(format!("Session reset ({cleared} events cleared)"));
    Ok(())
}
