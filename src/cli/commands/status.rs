use crate::cli::commands::open_session;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::StopPolicy;
use crate::ui::messages::warning;
use crate::utils::format_elapsed;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctl = open_session(cli, cfg);
    let state = ctl.state();

    let policy = match ctl.policy() {
        StopPolicy::Reset => "reset",
        StopPolicy::Pause => "pause",
    };

    println!("⏱️  {}", format_elapsed(state.elapsed_ms));
    println!("State    : {}", if state.running { "running" } else { "stopped" });
    println!(
        "Events   : {} ({} segments)",
        state.events.len(),
        state.segment_count()
    );
    println!("On stop  : {policy}");
    report_quarantine(ctl.quarantined());

    Ok(())
}

/// Shown when some stored entries could not be loaded.
pub(crate) fn report_quarantine(count: usize) {
    if count > 0 {
        warning(format!("{count} malformed stored events were set aside."));
    }
}
