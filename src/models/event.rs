use serde::{Deserialize, Serialize};
use std::fmt;

use super::label::ObservationLabel;

/// Wire name of the segment-boundary marker.
pub const END_SET: &str = "END_SET";

/// What an event records: an observation, or the end of a timed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventKind {
    Label(ObservationLabel),
    EndSet,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Label(l) => l.as_str(),
            EventKind::EndSet => END_SET,
        }
    }

    pub fn is_end_set(&self) -> bool {
        matches!(self, EventKind::EndSet)
    }
}

impl TryFrom<String> for EventKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == END_SET {
            return Ok(EventKind::EndSet);
        }
        ObservationLabel::from_wire(&s)
            .map(EventKind::Label)
            .ok_or_else(|| format!("unknown event type '{s}'"))
    }
}

impl From<EventKind> for String {
    fn from(k: EventKind) -> Self {
        k.as_str().to_string()
    }
}

impl From<ObservationLabel> for EventKind {
    fn from(l: ObservationLabel) -> Self {
        EventKind::Label(l)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged event. `time` is elapsed milliseconds, not a wall-clock instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: i64, kind: EventKind) -> Self {
        Self { time, kind }
    }
}
