/// Width, mask and offset of one field within a packed ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitField {
    bits: u8,
    shift: u8,
    mask: u64,
}

impl BitField {
    pub(crate) const fn new(bits: u8, shift: u8) -> Self {
        Self {
            bits,
            shift,
            mask: mask(bits),
        }
    }

    /// Width of the field in bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Offset of the field's lowest bit.
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// `(1 << bits) - 1`, or 0 for an empty field.
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Largest value the field can hold. Same as [`Self::mask`].
    pub const fn max(&self) -> u64 {
        self.mask
    }

    /// Keeps the low `bits` of `value` and moves them into position.
    pub const fn place(&self, value: u64) -> u64 {
        (value & self.mask) << self.shift
    }

    /// Reads the field back out of a packed value.
    pub const fn extract(&self, packed: u64) -> u64 {
        (packed >> self.shift) & self.mask
    }
}

/// `(1 << bits) - 1` without overflowing for the full width.
pub(crate) const fn mask(bits: u8) -> u64 {
    match bits {
        0 => 0,
        64.. => u64::MAX,
        n => (1 << n) - 1,
    }
}
