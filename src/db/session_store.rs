//! Maps `SessionState` onto the four persisted keys.

use crate::db::kv::{self, KvStore};
use crate::errors::AppResult;
use crate::models::{Event, SessionState};
use serde_json::Value;

pub const KEY_START_TIME: &str = "startTime";
pub const KEY_RUNNING: &str = "running";
pub const KEY_ELAPSED_TIME: &str = "elapsedTime";
pub const KEY_EVENTS: &str = "events";
/// Raw entries that failed validation on load.
pub const KEY_QUARANTINE: &str = "events.quarantine";

pub struct SessionStore {
    store: Box<dyn KvStore>,
}

impl SessionStore {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &dyn KvStore {
        self.store.as_ref()
    }

    /// Rehydrate the session. Absent or broken values fall back to defaults,
    /// invalid events are set aside instead of failing the whole log.
    pub fn load(&mut self) -> SessionState {
        let start_epoch = kv::get(self.store.as_ref(), KEY_START_TIME, None::<i64>);
        let running = kv::get(self.store.as_ref(), KEY_RUNNING, false);
        let elapsed_ms = kv::get(self.store.as_ref(), KEY_ELAPSED_TIME, 0_i64).max(0);
        let (raw_events, mut rejected) = self.read_event_entries();

        let (events, invalid) = validate_events(raw_events);
        rejected.extend(invalid);
        if !rejected.is_empty() {
            log::warn!("quarantined {} malformed event entries", rejected.len());
            self.quarantine(&events, rejected);
        }

        SessionState {
            start_epoch,
            running,
            elapsed_ms,
            events,
        }
    }

    /// Persist all four keys in one write. Best effort: failures are logged.
    pub fn save(&mut self, state: &SessionState) {
        if let Err(e) = self.try_save(state) {
            log::warn!("failed to persist session via {}: {e}", self.store.describe());
        }
    }

    pub fn try_save(&mut self, state: &SessionState) -> AppResult<()> {
        let entries = [
            (KEY_START_TIME, serde_json::to_string(&state.start_epoch)?),
            (KEY_RUNNING, serde_json::to_string(&state.running)?),
            (KEY_ELAPSED_TIME, serde_json::to_string(&state.elapsed_ms)?),
            (KEY_EVENTS, serde_json::to_string(&state.events)?),
        ];
        self.store.write_all(&entries)
    }

    /// Ticks only move the elapsed time.
    pub fn save_elapsed(&mut self, elapsed_ms: i64) {
        if let Err(e) = kv::set(self.store.as_mut(), KEY_ELAPSED_TIME, &elapsed_ms) {
            log::warn!("failed to persist elapsed time: {e}");
        }
    }

    pub fn quarantined(&self) -> Vec<Value> {
        kv::get(self.store.as_ref(), KEY_QUARANTINE, Vec::new())
    }

    pub fn journal(&self, operation: &str, target: &str, message: &str) {
        self.store.journal(operation, target, message);
    }

    /// Stored event entries. A value that is not a JSON array at all is
    /// returned whole as a rejected entry so it can be set aside.
    fn read_event_entries(&self) -> (Vec<Value>, Vec<Value>) {
        let raw = match self.store.read(KEY_EVENTS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), Vec::new()),
            Err(e) => {
                log::warn!("read of '{KEY_EVENTS}' failed, using default: {e}");
                return (Vec::new(), Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => (entries, Vec::new()),
            Err(e) => {
                log::warn!("stored '{KEY_EVENTS}' is not an event list: {e}");
                (Vec::new(), vec![Value::String(raw)])
            }
        }
    }

    fn quarantine(&mut self, valid: &[Event], rejected: Vec<Value>) {
        if let Err(e) = self.try_quarantine(valid, rejected) {
            log::warn!("failed to write quarantine: {e}");
        }
    }

    fn try_quarantine(&mut self, valid: &[Event], rejected: Vec<Value>) -> AppResult<()> {
        let mut held = self.quarantined();
        held.extend(rejected);

        let entries = [
            (KEY_QUARANTINE, serde_json::to_string(&held)?),
            (KEY_EVENTS, serde_json::to_string(valid)?),
        ];
        self.store.write_all(&entries)
    }
}

/// Split persisted entries into well-formed events and everything else,
/// keeping the stored order of the valid ones.
pub fn validate_events(raw: Vec<Value>) -> (Vec<Event>, Vec<Value>) {
    let mut valid = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for entry in raw {
        match serde_json::from_value::<Event>(entry.clone()) {
            Ok(ev) => valid.push(ev),
            Err(e) => {
                log::debug!("rejecting event entry {entry}: {e}");
                rejected.push(entry);
            }
        }
    }

    (valid, rejected)
}
