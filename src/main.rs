//! obslogger main entrypoint.

use obslogger::run;
use obslogger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
