use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, PackedId, Result,
    generator::{GeneratorState, IdGenerator, millis_since_epoch},
    time::TimeSource,
};

/// A non-concurrent generator suitable for single-threaded environments.
///
/// The state lives in a [`Cell`], which makes this type `!Sync`: the compiler
/// refuses to share it between threads, so no locking is needed.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Any [`BitLayout`]
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockIdGenerator`]
/// - [`AtomicIdGenerator`]
///
/// [`LockIdGenerator`]: crate::LockIdGenerator
/// [`AtomicIdGenerator`]: crate::AtomicIdGenerator
#[derive(Debug)]
pub struct BasicIdGenerator<T>
where
    T: TimeSource,
{
    state: Cell<GeneratorState>,
    layout: BitLayout,
    time: T,
}

impl<T> BasicIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for `layout` that reads time from `time`.
    ///
    /// # Example
    /// ```
    /// use shardflake::{BasicIdGenerator, BitLayout, MonotonicClock};
    ///
    /// let generator = BasicIdGenerator::new(BitLayout::default(), MonotonicClock::new());
    /// let first = generator.generate(1).unwrap();
    /// let second = generator.generate_with(1, std::thread::yield_now).unwrap();
    /// assert!(first < second);
    /// ```
    pub const fn new(layout: BitLayout, time: T) -> Self {
        Self {
            state: Cell::new(GeneratorState::UNSET),
            layout,
            time,
        }
    }

    pub const fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// Generates the next ID tagged with `partition`.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, partition: u64) -> Result<PackedId> {
        let ms = millis_since_epoch(&self.layout, self.time.current_millis())?;
        let issued = self.state.get().advance(ms, &self.layout)?;
        self.state.set(issued);
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

impl<T> IdGenerator for BasicIdGenerator<T>
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
