use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::list::print_events;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctl = open_session(cli, cfg);
    print_events(&ctl.state().events, &cfg.separator_char);
    Ok(())
}
