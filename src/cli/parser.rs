use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for obslogger
/// CLI stopwatch and behavioural-event logger backed by SQLite
#[derive(Parser, Debug)]
#[command(
    name = "obslogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A stopwatch and behavioural-event logger: time segments, tap labelled events, export the log",
    long_about = None
)]
pub struct Cli {
    /// Override session store path (useful for tests or separate studies)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Keep the session in memory only; nothing survives the process
    #[arg(global = true, long = "memory", conflicts_with = "db")]
    pub memory: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(global = true, short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostics except errors
    #[arg(global = true, short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the session store and configuration
    Init,

    /// Start the clock, or stop it and close the current segment
    Toggle,

    /// Log an observation at the current elapsed time
    Event {
        /// Label name (e.g. Sniff, tail-wag) or button number 1-9
        label: String,
    },

    /// Clear the clock and the whole event log
    Reset,

    /// Show the clock and session summary
    Status,

    /// List logged events, newest first
    List,

    /// Show the available event labels
    Labels,

    /// Live stopwatch with keyboard-driven event logging
    Watch,

    /// Export the event log
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal operation journal
    Journal {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_event_with_global_db() {
        let cli = Cli::try_parse_from(["obslogger", "event", "sniff", "--db", "/tmp/x.sqlite"])
            .unwrap();
        assert_eq!(cli.db.as_deref(), Some("/tmp/x.sqlite"));
        assert!(matches!(cli.command, Commands::Event { ref label } if label == "sniff"));
    }

    #[test]
    fn memory_conflicts_with_db() {
        assert!(Cli::try_parse_from(["obslogger", "--memory", "--db", "x", "status"]).is_err());
    }
}
