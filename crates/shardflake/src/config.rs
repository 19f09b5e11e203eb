use crate::{BitLayout, ConfigError, DEFAULT_EPOCH_MILLIS};

/// Requested split of a 64-bit ID among its fields.
///
/// This is the unvalidated option set. Turn it into a [`BitLayout`] with
/// [`GeneratorConfig::build`] (or `BitLayout::try_from`), which is the only
/// place the combination is checked. Every generator works from a
/// [`BitLayout`], so an invalid combination can never reach one.
///
/// With the `serde` feature, missing keys fall back to the defaults below,
/// which makes a partial document such as `{"partition_bits": 10}` valid.
///
/// | option | default |
/// |---|---|
/// | `epoch` | `946684800000` (2000-01-01 UTC) |
/// | `sequence_bits` | `6` |
/// | `partition_bits` | `6` |
/// | `checksum_bits` | `4` |
/// | `time_bits` | `None`, meaning every remaining bit |
///
/// # Example
///
/// ```
/// use shardflake::GeneratorConfig;
///
/// let layout = GeneratorConfig::default()
///     .with_sequence_bits(8)
///     .with_partition_bits(8)
///     .with_checksum_bits(0)
///     .build()
///     .unwrap();
///
/// assert_eq!(layout.partition().shift(), 0);
/// assert_eq!(layout.sequence().shift(), 8);
/// assert_eq!(layout.time().shift(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GeneratorConfig {
    /// Milliseconds since the UNIX epoch that encode as time zero.
    pub epoch: u64,
    /// Width of the per-millisecond counter.
    pub sequence_bits: u8,
    /// Width of the shard tag.
    pub partition_bits: u8,
    /// Width of the check nibble, either 0 or 4.
    pub checksum_bits: u8,
    /// Width of the timestamp. `None` gives it everything the other fields
    /// and the reserved top bit leave over.
    pub time_bits: Option<u8>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GeneratorConfig {
    pub const DEFAULT: Self = Self {
        epoch: DEFAULT_EPOCH_MILLIS,
        sequence_bits: 6,
        partition_bits: 6,
        checksum_bits: 4,
        time_bits: None,
    };

    #[must_use]
    pub const fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub const fn with_sequence_bits(mut self, bits: u8) -> Self {
        self.sequence_bits = bits;
        self
    }

    #[must_use]
    pub const fn with_partition_bits(mut self, bits: u8) -> Self {
        self.partition_bits = bits;
        self
    }

    #[must_use]
    pub const fn with_checksum_bits(mut self, bits: u8) -> Self {
        self.checksum_bits = bits;
        self
    }

    /// Pins the timestamp width, producing IDs narrower than 64 bits.
    #[must_use]
    pub const fn with_time_bits(mut self, bits: u8) -> Self {
        self.time_bits = Some(bits);
        self
    }

    /// Validates the options and derives the field masks and shifts.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a width is 15 or more, when
    /// `checksum_bits` is neither 0 nor 4, when an explicit `time_bits` is 0,
    /// or when the fields plus the reserved top bit exceed 64 bits.
    pub fn build(self) -> Result<BitLayout, ConfigError> {
        BitLayout::try_from(self)
    }
}
