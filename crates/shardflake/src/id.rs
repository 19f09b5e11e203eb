use core::fmt;

use crate::{BitLayout, IdComponents, checksum::verify_checksum};

/// A generated ID.
///
/// Nothing more than the packed `u64`: it carries no reference to the layout
/// that produced it, so decoding needs that [`BitLayout`] again. Ordering
/// follows the integer, which sorts by time first, then sequence, then
/// partition.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct PackedId(u64);

impl PackedId {
    pub const ZERO: Self = Self(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(&self) -> u64 {
        self.0
    }

    /// The ID reinterpreted as a signed integer, for storage in `BIGINT`-style
    /// columns. Never negative for IDs from a generator, since the top bit is
    /// reserved.
    pub const fn to_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Runs [`verify_checksum`] over the ID.
    ///
    /// Only meaningful when the producing layout carries a checksum.
    pub const fn has_valid_checksum(&self) -> bool {
        verify_checksum(self.0)
    }

    /// Splits the ID into its fields using `layout`.
    pub const fn decode(&self, layout: &BitLayout) -> IdComponents {
        layout.decode(self.0)
    }
}

impl From<u64> for PackedId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<PackedId> for u64 {
    fn from(id: PackedId) -> Self {
        id.0
    }
}

impl fmt::Display for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedId({:#018x})", self.0)
    }
}

impl fmt::LowerHex for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for PackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
