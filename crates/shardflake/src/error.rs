/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Identifies one of the packed bit fields of an ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Time,
    Sequence,
    Partition,
    Checksum,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Time => "time",
            Self::Sequence => "sequence",
            Self::Partition => "partition",
            Self::Checksum => "checksum",
        };
        f.write_str(name)
    }
}

/// Rejection of a requested bit layout.
///
/// Produced only while validating a [`GeneratorConfig`]; a layout that fails
/// validation is never partially applied.
///
/// [`GeneratorConfig`]: crate::GeneratorConfig
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A field was given more bits than it may hold.
    #[error("{field} field is {bits} bits wide, the maximum is {max}")]
    FieldTooWide { field: Field, bits: u8, max: u8 },

    /// An explicit time width of zero leaves no room for the timestamp.
    #[error("time field must be at least 1 bit wide")]
    EmptyTimeField,

    /// The checksum field only supports a single nibble or nothing.
    #[error("checksum field must be 0 or 4 bits wide, got {bits}")]
    InvalidChecksumWidth { bits: u8 },

    /// The fields plus the reserved sign bit do not fit in 64 bits.
    #[error("layout needs {used} bits but only {capacity} are available")]
    CapacityExceeded { used: u32, capacity: u32 },
}

/// All errors that generation can surface.
///
/// Decoding and checksum verification are infallible and never produce one of
/// these.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The layout was rejected at construction.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// More IDs were requested within one millisecond than the sequence field
    /// can number.
    ///
    /// The generator state is untouched; retrying once the clock has moved to
    /// the next millisecond succeeds.
    #[error("sequence exhausted for millisecond {millis}")]
    SequenceOverflow { millis: u64 },

    /// The clock reported a time earlier than the configured epoch.
    #[error("clock reads {now} ms which is before the epoch {epoch} ms")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    /// The time since the epoch no longer fits the time field.
    #[error("{millis} ms since epoch exceeds the time field maximum of {max}")]
    TimestampOverflow { millis: u64, max: u64 },

    /// The generator lock was poisoned by a panicking thread.
    ///
    /// `parking_lot` mutexes do not poison, so this variant does not exist
    /// with the `parking-lot` feature.
    #[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
    #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` for errors that clear up on their own once the clock
    /// advances.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SequenceOverflow { .. })
    }
}

#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
