//! Stopwatch + event log state machine.
//!
//! All four tracked values live in one `SessionState`, mutated only through
//! the transition methods below. Callers supply `now` so every transition is
//! deterministic under test.

use serde::{Deserialize, Serialize};

use super::event::{Event, EventKind};

/// What `start_stop` does when the clock is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopPolicy {
    /// Stop ends the segment: elapsed goes back to zero.
    #[default]
    Reset,
    /// Stop freezes elapsed; the next start resumes from it.
    Pause,
}

/// Outcome of one transition, used for reporting and the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started { resumed_from: i64 },
    Stopped { at: i64 },
    Logged(Event),
    Reset,
    Ticked { elapsed: i64 },
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub start_epoch: Option<i64>,
    pub running: bool,
    pub elapsed_ms: i64,
    /// Newest first.
    pub events: Vec<Event>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) when idle, stop when running.
    pub fn start_stop(&mut self, now: i64, policy: StopPolicy) -> Transition {
        if !self.running {
            self.running = true;
            self.start_epoch = Some(now.saturating_sub(self.elapsed_ms));
            return Transition::Started {
                resumed_from: self.elapsed_ms,
            };
        }

        // Capture before zeroing: the END_SET carries the measured segment.
        let at = self.elapsed_ms;
        self.running = false;
        if policy == StopPolicy::Reset {
            self.elapsed_ms = 0;
        }
        self.events.insert(0, Event::new(at, EventKind::EndSet));
        Transition::Stopped { at }
    }

    /// Prepend an event at the current elapsed time. Valid while stopped.
    pub fn log_event(&mut self, kind: EventKind) -> Transition {
        let ev = Event::new(self.elapsed_ms, kind);
        self.events.insert(0, ev);
        Transition::Logged(ev)
    }

    pub fn reset(&mut self) -> Transition {
        self.start_epoch = None;
        self.running = false;
        self.elapsed_ms = 0;
        self.clear_events();
        Transition::Reset
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Recompute elapsed while running. A missing start epoch skips the
    /// computation instead of measuring from the epoch origin; an epoch too
    /// far from `now` to subtract reads as zero.
    pub fn tick(&mut self, now: i64) -> Transition {
        match (self.running, self.start_epoch) {
            (true, Some(start)) => {
                let elapsed = now.checked_sub(start).unwrap_or_else(|| {
                    log::warn!("start epoch {start} is out of range, elapsed reads as zero");
                    0
                });
                self.elapsed_ms = elapsed.max(0);
                Transition::Ticked {
                    elapsed: self.elapsed_ms,
                }
            }
            _ => Transition::Idle,
        }
    }

    /// Number of END_SET markers, i.e. completed segments.
    pub fn segment_count(&self) -> usize {
        self.events.iter().filter(|e| e.kind.is_end_set()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::ObservationLabel;

    fn kinds(s: &SessionState) -> Vec<EventKind> {
        s.events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn reset_is_idempotent_from_any_state() {
        let mut s = SessionState::new();
        s.start_stop(1_000, StopPolicy::Reset);
        s.tick(1_500);
        s.log_event(ObservationLabel::Sit.into());

        for _ in 0..3 {
            s.reset();
            assert_eq!(s, SessionState::default());
        }
    }

    #[test]
    fn start_from_idle_reads_zero_then_tracks_wall_time() {
        let mut s = SessionState::new();
        assert_eq!(
            s.start_stop(10_000, StopPolicy::Reset),
            Transition::Started { resumed_from: 0 }
        );
        assert_eq!(s.start_epoch, Some(10_000));

        s.tick(10_000);
        assert_eq!(s.elapsed_ms, 0);

        s.tick(12_345);
        assert_eq!(s.elapsed_ms, 2_345);
    }

    #[test]
    fn stop_logs_end_set_at_pre_reset_elapsed() {
        let mut s = SessionState::new();
        s.start_stop(0, StopPolicy::Reset);
        s.tick(1234);

        assert_eq!(s.start_stop(1300, StopPolicy::Reset), Transition::Stopped { at: 1234 });
        assert_eq!(s.events[0], Event::new(1234, EventKind::EndSet));
        assert_eq!(s.elapsed_ms, 0);
        assert!(!s.running);
    }

    #[test]
    fn pause_policy_resumes_from_frozen_elapsed() {
        let mut s = SessionState::new();
        s.start_stop(0, StopPolicy::Pause);
        s.tick(800);
        s.start_stop(900, StopPolicy::Pause);
        assert_eq!(s.elapsed_ms, 800);
        assert_eq!(s.events[0], Event::new(800, EventKind::EndSet));

        // Wall time passing while paused does not count.
        s.tick(5_000);
        assert_eq!(s.elapsed_ms, 800);

        assert_eq!(
            s.start_stop(5_000, StopPolicy::Pause),
            Transition::Started { resumed_from: 800 }
        );
        assert_eq!(s.start_epoch, Some(4_200));
        s.tick(5_200);
        assert_eq!(s.elapsed_ms, 1_000);
    }

    #[test]
    fn events_are_newest_first() {
        let mut s = SessionState::new();
        s.log_event(ObservationLabel::Scratch.into());
        s.log_event(ObservationLabel::Sniff.into());
        s.log_event(ObservationLabel::Door.into());

        assert_eq!(
            kinds(&s),
            vec![
                EventKind::Label(ObservationLabel::Door),
                EventKind::Label(ObservationLabel::Sniff),
                EventKind::Label(ObservationLabel::Scratch),
            ]
        );
    }

    #[test]
    fn log_while_stopped_uses_frozen_time() {
        let mut s = SessionState::new();
        s.log_event(ObservationLabel::Down.into());
        assert_eq!(s.events[0].time, 0);
    }

    #[test]
    fn tick_without_start_epoch_is_skipped() {
        let mut s = SessionState {
            start_epoch: None,
            running: true,
            elapsed_ms: 42,
            events: vec![],
        };
        assert_eq!(s.tick(1_700_000_000_000), Transition::Idle);
        assert_eq!(s.elapsed_ms, 42);
    }

    #[test]
    fn tick_clamps_backwards_clock() {
        let mut s = SessionState::new();
        s.start_stop(1_000, StopPolicy::Reset);
        s.tick(900);
        assert_eq!(s.elapsed_ms, 0);
    }

    #[test]
    fn tick_with_out_of_range_epoch_reads_zero() {
        let mut s = SessionState {
            start_epoch: Some(i64::MIN),
            running: true,
            elapsed_ms: 0,
            events: vec![],
        };
        assert_eq!(s.tick(1_700_000_000_000), Transition::Ticked { elapsed: 0 });
        assert_eq!(s.elapsed_ms, 0);
    }

    #[test]
    fn start_near_epoch_floor_does_not_overflow() {
        let mut s = SessionState {
            start_epoch: None,
            running: false,
            elapsed_ms: 500,
            events: vec![],
        };
        s.start_stop(i64::MIN + 10, StopPolicy::Pause);
        assert_eq!(s.start_epoch, Some(i64::MIN));
    }

    #[test]
    fn counts_segments() {
        let mut s = SessionState::new();
        s.start_stop(0, StopPolicy::Reset);
        s.start_stop(10, StopPolicy::Reset);
        s.log_event(ObservationLabel::Other.into());
        s.start_stop(20, StopPolicy::Reset);
        s.start_stop(30, StopPolicy::Reset);
        assert_eq!(s.segment_count(), 2);
    }
}
