//! Cancellable repeating tick task.
//!
//! The task never touches session state itself: it only calls `on_tick`,
//! which in the watch loop posts a message into the single command queue.
//! Each task carries a generation so ticks queued before a cancel can be
//! recognised and ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub struct TickHandle {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Stop the schedule and wait for the task to exit. After this returns,
    /// `on_tick` is never called again.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log::error!("tick task {} panicked", self.generation);
            }
            log::trace!("tick task {} cancelled", self.generation);
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Call `on_tick` every `period` until cancelled or until it returns `false`.
pub fn spawn_ticker<F>(period: Duration, generation: u64, mut on_tick: F) -> TickHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    let thread = thread::spawn(move || {
        let mut next = Instant::now() + period;
        loop {
            // park_timeout can wake early; sleep out the rest of the period.
            loop {
                if flag.load(Ordering::SeqCst) {
                    return;
                }
                let now = Instant::now();
                if now >= next {
                    break;
                }
                thread::park_timeout(next - now);
            }

            if !on_tick() {
                return;
            }
            next += period;
            let now = Instant::now();
            if next < now {
                // Fell behind; do not burst to catch up.
                next = now + period;
            }
        }
    });

    log::trace!("tick task {generation} started, period {period:?}");
    TickHandle {
        generation,
        cancelled,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn ticks_repeatedly_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let mut handle = spawn_ticker(Duration::from_millis(5), 1, move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });

        thread::sleep(Duration::from_millis(100));
        handle.cancel();
        let after_cancel = count.load(Ordering::SeqCst);
        assert!(after_cancel >= 2, "only {after_cancel} ticks");

        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handle = spawn_ticker(Duration::from_millis(5), 7, move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });
        assert_eq!(handle.generation(), 7);
        drop(handle);

        let frozen = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(count.load(Ordering::SeqCst), frozen);
    }

    #[test]
    fn stops_when_callback_declines() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let _handle = spawn_ticker(Duration::from_millis(2), 3, move || {
            c.fetch_add(1, Ordering::SeqCst) < 2
        });

        thread::sleep(Duration::from_millis(60));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
