pub mod config;
pub mod event;
pub mod export;
pub mod init;
pub mod journal;
pub mod labels;
pub mod list;
pub mod reset;
pub mod status;
pub mod toggle;
pub mod watch;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::{SessionController, open_store};
use crate::db::SessionStore;
use crate::utils::SystemClock;

/// Load the session for this invocation: rehydrate, then tick once.
pub(crate) fn open_session(cli: &Cli, cfg: &Config) -> SessionController {
    let store = SessionStore::new(open_store(cfg, cli.memory));
    SessionController::open(store, Box::new(SystemClock), cfg.stop_policy)
}
