//! Periodic autosave scheduling.
//!
//! A background thread wakes on a fixed interval and fires the save path,
//! unless a save is already running. The [`SaveGuard`] is shared between the
//! scheduler and manual saves, so at most one save proceeds at a time; a tick
//! that loses the race is skipped, never queued. `stop()` shuts the thread
//! down cleanly with no tick left pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Mutual exclusion flag for the save path. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct SaveGuard {
    in_progress: Arc<AtomicBool>,
}

/// Held while a save runs; releases the guard on drop.
pub struct SaveInProgress {
    guard: SaveGuard,
}

impl SaveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, or `None` if a save is already in progress.
    pub fn try_begin(&self) -> Option<SaveInProgress> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SaveInProgress {
                guard: self.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

impl Drop for SaveInProgress {
    fn drop(&mut self) {
        self.guard.in_progress.store(false, Ordering::Release);
    }
}

/// Handle to the autosave thread.
pub struct Autosave {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Autosave {
    /// Spawns the scheduler. `tick` runs on the autosave thread with the
    /// guard held; it should perform the same save as a manual save.
    pub fn start<F>(interval: Duration, guard: SaveGuard, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => match guard.try_begin() {
                    Some(_running) => tick(),
                    None => debug!("autosave tick skipped: save in progress"),
                },
                // Explicit stop, or the handle was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self { stop_tx, handle }
    }

    /// Stops the scheduler and waits for the thread to exit. No tick fires
    /// after this returns.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn guard_admits_one_save_at_a_time() {
        let guard = SaveGuard::new();
        let running = guard.try_begin().unwrap();
        assert!(guard.try_begin().is_none());
        assert!(guard.is_busy());
        drop(running);
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn ticks_fire_on_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let autosave = Autosave::start(Duration::from_millis(10), SaveGuard::new(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(100));
        autosave.stop();
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn ticks_during_manual_save_are_skipped_not_queued() {
        let guard = SaveGuard::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let autosave = Autosave::start(Duration::from_millis(10), guard.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Hold the guard across several tick intervals, as a manual save would.
        let manual = guard.try_begin().unwrap();
        thread::sleep(Duration::from_millis(60));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        drop(manual);

        thread::sleep(Duration::from_millis(40));
        autosave.stop();
        assert!(count.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn stop_leaves_no_dangling_tick() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let autosave = Autosave::start(Duration::from_millis(10), SaveGuard::new(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(35));
        autosave.stop();
        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }
}
