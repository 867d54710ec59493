//! Session controller: owns the state, the clock source and the store.
//!
//! Every operation follows the same path: transition in memory, persist all
//! tracked keys, journal the outcome.

use crate::config::Config;
use crate::db::{KvStore, MemoryStore, NullStore, SessionStore, SqliteStore};
use crate::models::{EventKind, SessionState, StopPolicy, Transition};
use crate::ui::messages::warning;
use crate::utils::{Clock, format_elapsed};

pub struct SessionController {
    store: SessionStore,
    state: SessionState,
    clock: Box<dyn Clock>,
    policy: StopPolicy,
}

impl SessionController {
    /// Rehydrate from `store` and bring elapsed time up to date.
    pub fn open(mut store: SessionStore, clock: Box<dyn Clock>, policy: StopPolicy) -> Self {
        let state = store.load();
        log::debug!(
            "loaded session from {}: running={} elapsed={} events={}",
            store.backend().describe(),
            state.running,
            state.elapsed_ms,
            state.events.len()
        );

        let mut ctl = Self {
            store,
            state,
            clock,
            policy,
        };
        ctl.tick();
        ctl
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn policy(&self) -> StopPolicy {
        self.policy
    }

    pub fn tick(&mut self) -> Transition {
        let t = self.state.tick(self.clock.now_ms());
        if let Transition::Ticked { elapsed } = t {
            self.store.save_elapsed(elapsed);
        }
        t
    }

    pub fn toggle(&mut self) -> Transition {
        let t = self.state.start_stop(self.clock.now_ms(), self.policy);
        self.store.save(&self.state);

        match t {
            Transition::Started { resumed_from: 0 } => {
                log::info!("clock started");
                self.store.journal("start", "", "Clock started");
            }
            Transition::Started { resumed_from } => {
                let at = format_elapsed(resumed_from);
                log::info!("clock resumed from {at}");
                self.store
                    .journal("start", "", &format!("Clock resumed from {at}"));
            }
            Transition::Stopped { at } => {
                let at = format_elapsed(at);
                log::info!("segment ended at {at}");
                self.store
                    .journal("stop", "END_SET", &format!("Segment ended at {at}"));
            }
            _ => {}
        }
        t
    }

    pub fn log_event(&mut self, kind: EventKind) -> Transition {
        let t = self.state.log_event(kind);
        self.store.save(&self.state);

        if let Transition::Logged(ev) = t {
            let at = format_elapsed(ev.time);
            log::info!("logged {} at {at}", ev.kind);
            self.store
                .journal("event", ev.kind.as_str(), &format!("Logged at {at}"));
        }
        t
    }

    pub fn reset(&mut self) -> Transition {
        let dropped = self.state.events.len();
        let t = self.state.reset();
        self.store.save(&self.state);

        log::info!("session reset, {dropped} events cleared");
        self.store
            .journal("reset", "", &format!("Session cleared ({dropped} events)"));
        t
    }

    /// Stored entries that failed validation and were set aside.
    pub fn quarantined(&self) -> usize {
        self.store.quarantined().len()
    }

    pub fn journal(&self, operation: &str, target: &str, message: &str) {
        self.store.journal(operation, target, message);
    }
}

/// Pick the storage medium for this invocation. An unusable database is not
/// fatal: the session runs without persistence.
pub fn open_store(cfg: &Config, memory: bool) -> Box<dyn KvStore> {
    if memory {
        return Box::new(MemoryStore::new());
    }

    match SqliteStore::open(&cfg.database) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::error!("cannot open session store {}: {e}", cfg.database);
            warning(format!(
                "Session store unavailable ({e}); changes will not be saved."
            ));
            Box::new(NullStore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, ObservationLabel};
    use crate::utils::ManualClock;

    fn controller(clock: &ManualClock, store: Box<dyn KvStore>) -> SessionController {
        SessionController::open(
            SessionStore::new(store),
            Box::new(clock.clone()),
            StopPolicy::Reset,
        )
    }

    #[test]
    fn start_then_elapsed_follows_wall_time() {
        let clock = ManualClock::new(1_000_000);
        let mut ctl = controller(&clock, Box::new(MemoryStore::new()));

        ctl.toggle();
        ctl.tick();
        assert_eq!(ctl.state().elapsed_ms, 0);

        clock.advance(2_000);
        ctl.tick();
        assert_eq!(ctl.state().elapsed_ms, 2_000);
    }

    #[test]
    fn stop_records_boundary_and_zeroes() {
        let clock = ManualClock::new(0);
        let mut ctl = controller(&clock, Box::new(MemoryStore::new()));
        ctl.toggle();
        clock.set(1234);
        ctl.tick();

        assert_eq!(ctl.toggle(), Transition::Stopped { at: 1234 });
        assert_eq!(ctl.state().events[0], Event::new(1234, EventKind::EndSet));
        assert_eq!(ctl.state().elapsed_ms, 0);
    }

    #[test]
    fn reload_continues_running_clock() {
        let clock = ManualClock::new(50_000);
        let store = SqliteStore::in_memory().unwrap();
        let mut session = SessionStore::new(Box::new(store));

        let mut state = SessionState::new();
        state.start_stop(40_000, StopPolicy::Reset);
        state.log_event(ObservationLabel::Door.into());
        session.save(&state);

        let ctl = SessionController::open(session, Box::new(clock), StopPolicy::Reset);
        assert!(ctl.state().running);
        assert_eq!(ctl.state().elapsed_ms, 10_000);
        assert_eq!(ctl.state().events.len(), 1);
    }

    #[test]
    fn out_of_range_start_time_opens_at_zero() {
        let mut mem = MemoryStore::new();
        mem.write("running", "true".into()).unwrap();
        mem.write("startTime", i64::MIN.to_string()).unwrap();

        let clock = ManualClock::new(1_700_000_000_000);
        let ctl = controller(&clock, Box::new(mem));
        assert!(ctl.state().running);
        assert_eq!(ctl.state().elapsed_ms, 0);
    }

    #[test]
    fn operations_are_journaled_in_sqlite() {
        let mut path = std::env::temp_dir();
        path.push("obslogger_controller_journal_unit.sqlite");
        std::fs::remove_file(&path).ok();
        let p = path.to_string_lossy().to_string();

        let clock = ManualClock::new(0);
        {
            let mut ctl = controller(&clock, Box::new(SqliteStore::open(&p).unwrap()));
            ctl.toggle();
            ctl.log_event(ObservationLabel::Sniff.into());
            ctl.toggle();
            ctl.reset();
            assert_eq!(ctl.state(), &SessionState::default());
        }

        let pool = crate::db::pool::DbPool::new(&p).unwrap();
        let ops: Vec<String> = crate::db::log::load_journal(&pool.conn)
            .unwrap()
            .into_iter()
            .map(|r| r.operation)
            .collect();
        assert_eq!(ops, vec!["start", "event", "stop", "reset"]);

        drop(pool);
        std::fs::remove_file(&path).ok();
    }
}
