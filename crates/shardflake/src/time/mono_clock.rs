use core::time::Duration;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::Instant,
};

use crate::time::{SystemClock, TimeSource};

/// Shared ticker state, advanced once per millisecond by a background thread.
#[derive(Debug)]
struct SharedTicker {
    elapsed: AtomicU64,
}

/// A time source that never moves backwards.
///
/// The wall clock is read once, at construction. From then on the reported
/// time is that anchor plus the time elapsed on a monotonic [`Instant`],
/// published by a background thread that ticks every millisecond. NTP steps
/// and other adjustments of the system clock after construction are not
/// observed, which closes the duplicate-ID window a backward step would
/// otherwise open for a running generator. It does not help across process
/// restarts.
///
/// Clones share one ticker. The thread exits once the last clone is dropped.
///
/// # Example
///
/// ```
/// use shardflake::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let first = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(3));
/// assert!(clock.current_millis() >= first);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTicker>,
    anchor: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time.
    pub fn new() -> Self {
        Self::with_anchor(SystemClock.current_millis())
    }

    /// Starts the clock at `anchor` milliseconds since the UNIX epoch instead
    /// of the current wall-clock time.
    pub fn with_anchor(anchor: u64) -> Self {
        let start = Instant::now();
        let inner = Arc::new(SharedTicker {
            elapsed: AtomicU64::new(0),
        });

        let weak_inner = Arc::downgrade(&inner);
        thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = start.elapsed().as_millis() as u64;
                inner_ref.elapsed.store(now_ms, Ordering::Relaxed);

                tick = now_ms + 1;
            }
        });

        Self { inner, anchor }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor
            .saturating_add(self.inner.elapsed.load(Ordering::Relaxed))
    }
}
