use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, PackedId, Result,
    generator::{GeneratorState, IdGenerator, millis_since_epoch},
    time::TimeSource,
};

/// A lock-free generator suitable for multi-threaded environments.
///
/// The state is packed into a single [`AtomicU64`] (millisecond above the
/// sequence bits) and advanced with a compare-exchange loop. A call takes
/// effect at its successful exchange; a lost race simply re-reads the state
/// and the clock and tries again, so concurrent calls never share a state.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free
/// - ✅ Any [`BitLayout`]
///
/// ## Recommended When
/// - You're in a high-concurrency environment
/// - You want lock-free generation
///
/// ## See Also
/// - [`BasicIdGenerator`]
/// - [`LockIdGenerator`]
///
/// [`BasicIdGenerator`]: crate::BasicIdGenerator
/// [`LockIdGenerator`]: crate::LockIdGenerator
#[derive(Debug)]
pub struct AtomicIdGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    layout: BitLayout,
    time: T,
}

impl<T> AtomicIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for `layout` that reads time from `time`.
    ///
    /// # Example
    /// ```
    /// use shardflake::{AtomicIdGenerator, BitLayout, SystemClock};
    ///
    /// let generator = AtomicIdGenerator::new(BitLayout::default(), SystemClock);
    /// let id = generator.generate_with(3, core::hint::spin_loop).unwrap();
    /// assert_eq!(generator.layout().extract_partition(id.to_raw()), 3);
    /// ```
    pub fn new(layout: BitLayout, time: T) -> Self {
        let initial = AtomicU64::new(GeneratorState::UNSET.to_word(&layout));
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(initial),
            #[cfg(not(feature = "cache-padded"))]
            state: initial,
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
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            // Read the clock after the state so a winning exchange never
            // pairs a state with an older reading.
            let ms = millis_since_epoch(&self.layout, self.time.current_millis())?;
            let issued = GeneratorState::from_word(current, &self.layout).advance(ms, &self.layout)?;

            match self.state.compare_exchange_weak(
                current,
                issued.to_word(&self.layout),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(PackedId::from_raw(issued.to_id(&self.layout, partition))),
                Err(actual) => {
                    current = actual;
                    core::hint::spin_loop();
                }
            }
        }
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

impl<T> IdGenerator for AtomicIdGenerator<T>
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
