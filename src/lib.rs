//! obslogger library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Toggle => cli::commands::toggle::handle(cli, cfg),
        Commands::Event { .. } => cli::commands::event::handle(cli, cfg),
        Commands::Reset => cli::commands::reset::handle(cli, cfg),
        Commands::Status => cli::commands::status::handle(cli, cfg),
        Commands::List => cli::commands::list::handle(cli, cfg),
        Commands::Labels => cli::commands::labels::handle(),
        Commands::Watch => cli::commands::watch::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Journal { .. } => cli::commands::journal::handle(&cli.command, cfg),
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` still wins.
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::{Builder, Env};
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .ok();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ logging
    init_logging(cli.verbose, cli.quiet);
    log::debug!("obslogger v{}", env!("CARGO_PKG_VERSION"));

    // 3️⃣ load config once
    let mut cfg = Config::load();

    // 4️⃣ command-line override of the store path
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 5️⃣ dispatch
    dispatch(&cli, &cfg)
}
