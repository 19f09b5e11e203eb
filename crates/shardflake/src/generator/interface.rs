use crate::{BitLayout, Error, PackedId, Result};

/// Mints IDs for one [`BitLayout`].
///
/// Implementations own their `(millisecond, sequence)` state outright; it is
/// never shared with another generator instance. Two independently
/// constructed generators give no uniqueness guarantee relative to each other
/// beyond what distinct partition values provide.
pub trait IdGenerator {
    /// The layout every generated ID is packed with.
    fn layout(&self) -> &BitLayout;

    /// Generates the next ID tagged with `partition`.
    ///
    /// Only the low `partition_bits` of `partition` are kept; wider values are
    /// truncated, not rejected.
    ///
    /// # Errors
    ///
    /// - [`Error::SequenceOverflow`] when the current millisecond has used up
    ///   its sequence space. Nothing is issued and the state is unchanged.
    /// - [`Error::ClockBeforeEpoch`] or [`Error::TimestampOverflow`] when the
    ///   clock falls outside what the time field can encode.
    /// - `Error::LockPoisoned` for lock-based generators whose mutex was
    ///   poisoned.
    fn generate(&self, partition: u64) -> Result<PackedId>;

    /// Like [`IdGenerator::generate`], but retries on
    /// [`Error::SequenceOverflow`], calling `backoff` before each retry.
    ///
    /// Other errors are returned immediately. The loop only ends once the
    /// clock reaches the next millisecond, so `backoff` decides how that wait
    /// is spent: spinning, yielding or sleeping.
    ///
    /// # Errors
    ///
    /// Any error from [`IdGenerator::generate`] except overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use shardflake::{BitLayout, IdGenerator, LockIdGenerator, SystemClock};
    ///
    /// let generator = LockIdGenerator::new(BitLayout::default(), SystemClock);
    /// let id = generator.generate_with(7, std::thread::yield_now).unwrap();
    /// assert_eq!(generator.layout().extract_partition(id.to_raw()), 7);
    /// ```
    fn generate_with(&self, partition: u64, mut backoff: impl FnMut()) -> Result<PackedId>
    where
        Self: Sized,
    {
        loop {
            match self.generate(partition) {
                Err(Error::SequenceOverflow { .. }) => backoff(),
                other => return other,
            }
        }
    }
}
