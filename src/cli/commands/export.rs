use crate::cli::commands::open_session;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = &cli.command
    {
        let ctl = open_session(cli, cfg);
        let events = &ctl.state().events;
        let path = ExportLogic::export(events, *format, file, *force)?;

        ctl.journal(
            "export",
            format.as_str(),
            &format!("{} events to {}", events.len(), path.display()),
        );
    }
    Ok(())
}
