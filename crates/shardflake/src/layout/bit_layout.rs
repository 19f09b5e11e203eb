#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    checksum::checksum,
    config::GeneratorConfig,
    error::{ConfigError, Field},
    layout::BitField,
};

/// Widest sequence, partition or checksum field allowed.
pub const MAX_FIELD_BITS: u8 = 14;

/// Width of the checksum field when enabled.
pub const CHECKSUM_BITS: u8 = 4;

/// Bits available to the fields. The top bit of a `u64` is reserved and
/// always zero so IDs stay non-negative when stored as `i64`.
const CAPACITY: u32 = u64::BITS;

/// A validated bit layout.
///
/// Fields are packed most to least significant as
/// `[reserved 0][time][sequence][partition][checksum]`:
///
/// ```text
///  63  62 ........ t  ........ s  ........ p  ......... 0
/// | 0 |    time     |  sequence  | partition |  checksum |
/// ```
///
/// A `BitLayout` can only be obtained through validation, so every value of
/// this type describes non-overlapping fields that fit in 64 bits. It is
/// `Copy` and shared freely between generators and decoders; nothing about it
/// changes after construction.
///
/// # Example
///
/// ```
/// use shardflake::{BitLayout, GeneratorConfig};
///
/// let layout = BitLayout::default();
/// assert_eq!(layout.checksum().bits(), 4);
/// assert_eq!(layout.partition().shift(), 4);
/// assert_eq!(layout.sequence().shift(), 10);
/// assert_eq!(layout.time().shift(), 16);
/// assert_eq!(layout.width(), 64);
///
/// assert!(GeneratorConfig::default().with_checksum_bits(3).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitLayout {
    epoch: u64,
    time: BitField,
    sequence: BitField,
    partition: BitField,
    checksum: BitField,
}

impl BitLayout {
    /// The layout of [`GeneratorConfig::DEFAULT`]: 47 time bits, 6 sequence,
    /// 6 partition and a 4 bit checksum, counted from 2000-01-01 UTC.
    pub const DEFAULT: Self = match Self::new(GeneratorConfig::DEFAULT) {
        Ok(layout) => layout,
        Err(_) => panic!("default generator config is invalid"),
    };

    /// Validates `config` and derives masks and shifts.
    ///
    /// Shifts are assigned from the bottom up: checksum at 0, partition above
    /// it, then sequence, then time.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::build`].
    pub const fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let GeneratorConfig {
            epoch,
            sequence_bits,
            partition_bits,
            checksum_bits,
            time_bits,
        } = config;

        if sequence_bits > MAX_FIELD_BITS {
            return Err(too_wide(Field::Sequence, sequence_bits));
        }
        if partition_bits > MAX_FIELD_BITS {
            return Err(too_wide(Field::Partition, partition_bits));
        }
        if checksum_bits > MAX_FIELD_BITS {
            return Err(too_wide(Field::Checksum, checksum_bits));
        }
        if checksum_bits != 0 && checksum_bits != CHECKSUM_BITS {
            return Err(ConfigError::InvalidChecksumWidth {
                bits: checksum_bits,
            });
        }

        let low_bits = sequence_bits + partition_bits + checksum_bits;
        let time_bits = match time_bits {
            Some(0) => return Err(ConfigError::EmptyTimeField),
            Some(bits) => bits,
            None => (CAPACITY - 1) as u8 - low_bits,
        };

        let used = 1 + time_bits as u32 + low_bits as u32;
        if used > CAPACITY {
            return Err(ConfigError::CapacityExceeded {
                used,
                capacity: CAPACITY,
            });
        }

        let partition_shift = checksum_bits;
        let sequence_shift = partition_shift + partition_bits;
        let time_shift = sequence_shift + sequence_bits;

        Ok(Self {
            epoch,
            time: BitField::new(time_bits, time_shift),
            sequence: BitField::new(sequence_bits, sequence_shift),
            partition: BitField::new(partition_bits, partition_shift),
            checksum: BitField::new(checksum_bits, 0),
        })
    }

    /// Milliseconds since the UNIX epoch that encode as time zero.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub const fn time(&self) -> BitField {
        self.time
    }

    pub const fn sequence(&self) -> BitField {
        self.sequence
    }

    pub const fn partition(&self) -> BitField {
        self.partition
    }

    pub const fn checksum(&self) -> BitField {
        self.checksum
    }

    /// Whether IDs carry a Luhn mod-16 check nibble.
    pub const fn has_checksum(&self) -> bool {
        self.checksum.bits() == CHECKSUM_BITS
    }

    /// Number of low bits of a `u64` actually in use, including the reserved
    /// top bit.
    pub const fn width(&self) -> u32 {
        1 + self.time.bits() as u32
            + self.sequence.bits() as u32
            + self.partition.bits() as u32
            + self.checksum.bits() as u32
    }

    /// Largest epoch-relative millisecond the time field can hold.
    pub const fn max_raw_millis(&self) -> u64 {
        self.time.max()
    }

    /// Largest sequence value; one millisecond yields `max_sequence() + 1`
    /// IDs.
    pub const fn max_sequence(&self) -> u64 {
        self.sequence.max()
    }

    pub const fn max_partition(&self) -> u64 {
        self.partition.max()
    }

    /// Packs the given fields into an ID.
    ///
    /// Each value keeps only the low bits its field can hold; in particular a
    /// partition wider than `partition_bits` is truncated rather than
    /// rejected. When the layout carries a checksum, the low nibble is
    /// finalized with [`checksum`](crate::checksum()).
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
    /// assert_eq!(layout.pack(1, 2, 0xBBD3), 0x01_02_D3);
    /// ```
    #[must_use]
    pub const fn pack(&self, raw_millis: u64, sequence: u64, partition: u64) -> u64 {
        let value = self.time.place(raw_millis)
            | self.sequence.place(sequence)
            | self.partition.place(partition);
        if self.has_checksum() {
            checksum(value)
        } else {
            value
        }
    }
}

const fn too_wide(field: Field, bits: u8) -> ConfigError {
    ConfigError::FieldTooWide {
        field,
        bits,
        max: MAX_FIELD_BITS,
    }
}

impl Default for BitLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<GeneratorConfig> for BitLayout {
    type Error = ConfigError;

    #[cfg_attr(feature = "tracing", instrument(level = "debug"))]
    fn try_from(config: GeneratorConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl From<BitLayout> for GeneratorConfig {
    fn from(layout: BitLayout) -> Self {
        Self {
            epoch: layout.epoch,
            sequence_bits: layout.sequence.bits(),
            partition_bits: layout.partition.bits(),
            checksum_bits: layout.checksum.bits(),
            time_bits: Some(layout.time.bits()),
        }
    }
}
