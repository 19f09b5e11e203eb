use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, PackedId, Result,
    generator::{GeneratorState, IdGenerator, Mutex, millis_since_epoch},
    time::TimeSource,
};

/// A lock-based generator suitable for multi-threaded environments.
///
/// The state sits behind a [`Mutex`] (from `std`, or `parking_lot` with the
/// `parking-lot` feature). The clock read, the sequence step and the
/// write-back all happen while the lock is held, so concurrent calls are
/// linearizable: no two of them can observe the same state. The critical
/// section is a handful of integer operations.
///
/// Clones are handles to the same generator and share its state.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Any [`BitLayout`]
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicIdGenerator`]
/// - [`AtomicIdGenerator`]
///
/// [`BasicIdGenerator`]: crate::BasicIdGenerator
/// [`AtomicIdGenerator`]: crate::AtomicIdGenerator
#[derive(Debug)]
pub struct LockIdGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<GeneratorState>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<GeneratorState>>,
    layout: BitLayout,
    time: T,
}

/// The generator most callers want.
pub type Generator<T = crate::SystemClock> = LockIdGenerator<T>;

impl<T> LockIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for `layout` that reads time from `time`.
    ///
    /// The state starts unset: the first ID is sequence 0 whatever the
    /// current millisecond.
    ///
    /// # Example
    /// ```
    /// use shardflake::{GeneratorConfig, LockIdGenerator, SystemClock, make_partition};
    ///
    /// let layout = GeneratorConfig::default().build().unwrap();
    /// let generator = LockIdGenerator::new(layout, SystemClock);
    ///
    /// let partition = u64::from(make_partition("alice"));
    /// let id = generator.generate(partition).unwrap();
    ///
    /// assert!(id.has_valid_checksum());
    /// assert_eq!(layout.extract_partition(id.to_raw()), partition & layout.max_partition());
    /// ```
    pub fn new(layout: BitLayout, time: T) -> Self {
        let state = Mutex::new(GeneratorState::UNSET);
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(state),
            layout,
            time,
        }
    }

    pub const fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// Generates the next ID tagged with `partition`.
    ///
    /// See [`IdGenerator::generate`] for truncation and error behaviour.
    ///
    /// # Errors
    ///
    /// - `SequenceOverflow` when this millisecond is exhausted
    /// - `ClockBeforeEpoch` / `TimestampOverflow` for an unencodable clock
    /// - `LockPoisoned` if another thread panicked while holding the lock
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, partition: u64) -> Result<PackedId> {
        let issued = {
            #[cfg(feature = "parking-lot")]
            let mut state = self.state.lock();
            #[cfg(not(feature = "parking-lot"))]
            let mut state = self.state.lock()?;

            let ms = millis_since_epoch(&self.layout, self.time.current_millis())?;
            *state = state.advance(ms, &self.layout)?;
            *state
        };

        Ok(PackedId::from_raw(issued.to_id(&self.layout, partition)))
    }

    /// Convenience wrapper around [`IdGenerator::generate_with`].
    ///
    /// # Errors
    ///
    /// Any error from [`Self::generate`] except overflow.
    pub fn generate_with(&self, partition: u64, backoff: impl FnMut()) -> Result<PackedId> {
        IdGenerator::generate_with(self, partition, backoff)
    }
}

impl<T> Clone for LockIdGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            layout: self.layout,
            time: self.time.clone(),
        }
    }
}

impl<T> IdGenerator for LockIdGenerator<T>
where
    T: TimeSource,
{
    fn layout(&self) -> &BitLayout {
        self.layout()
    }

    fn generate(&self, partition: u64) -> Result<PackedId> {
        self.generate(partition)
    }
}
