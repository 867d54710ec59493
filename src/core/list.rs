//! Reverse-chronological rendering of the event log.

use crate::models::Event;
use crate::ui::messages::separator;
use crate::utils::format_elapsed;

const SEPARATOR_WIDTH: usize = 24;

/// One display row, or `None` for a segment boundary.
pub fn event_row(ev: &Event) -> Option<String> {
    if ev.kind.is_end_set() {
        None
    } else {
        Some(format!("{} - {}", format_elapsed(ev.time), ev.kind))
    }
}

/// Print in stored order (newest first); END_SET becomes a separator line.
pub fn print_events(events: &[Event], separator_char: &str) {
    if events.is_empty() {
        println!("No events logged.");
        return;
    }

    for ev in events {
        match event_row(ev) {
            Some(row) => println!("{row}"),
            None => separator(separator_char, SEPARATOR_WIDTH),
        }
    }
}
