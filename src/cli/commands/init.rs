use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite session store
///  - all pending schema migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing obslogger…");

    // DbPool::new runs the migrations.
    let pool = DbPool::new(&db_path)?;

    success(format!("Session store initialized at {db_path}"));

    ttlog_quiet(
        &pool.conn,
        "init",
        "Session store initialized",
        &format!("Session store initialized at {db_path}"),
    );

    Ok(())
}
