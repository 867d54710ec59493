use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::watch::WatchLoop;
use crate::errors::AppResult;
use std::time::Duration;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctl = open_session(cli, cfg);
    let period = Duration::from_millis(cfg.tick_interval_ms);
    WatchLoop::new(ctl, period, &cfg.separator_char).run()
}
