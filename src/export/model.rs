// src/export/model.rs

use crate::models::Event;
use serde::Serialize;

/// Flat export row. Fields follow `Event` declaration order.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EventExport {
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&Event> for EventExport {
    fn from(ev: &Event) -> Self {
        Self {
            time: ev.time,
            kind: ev.kind.as_str().to_string(),
        }
    }
}

/// Header for CSV / XLSX
pub(crate) fn get_headers() -> [&'static str; 2] {
    ["time", "type"]
}

/// Rows in displayed (stored) order, END_SET markers included.
pub(crate) fn events_to_rows(events: &[Event]) -> Vec<EventExport> {
    events.iter().map(EventExport::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, ObservationLabel};

    #[test]
    fn keeps_order_and_markers() {
        let events = vec![
            Event::new(900, ObservationLabel::Sit.into()),
            Event::new(800, EventKind::EndSet),
            Event::new(100, ObservationLabel::Scratch.into()),
        ];
        let rows = events_to_rows(&events);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, "Sit");
        assert_eq!(rows[1], EventExport { time: 800, kind: "END_SET".into() });
        assert_eq!(rows[2].time, 100);
    }
}
