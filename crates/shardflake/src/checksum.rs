//! Luhn mod-16 check nibble.
//!
//! The check value lives in the low 4 bits of a `u64`. Digits are the sixteen
//! nibbles of the integer, read from least to most significant. Every weighted
//! digit folds to the quotient plus the remainder of a division by `0xF`, and
//! sums are reduced modulo `0xF`, so a check nibble is always in `0x0..=0xE`.

const NIBBLES: u32 = u64::BITS / 4;
const FOLD: u64 = 0xF;
const NIBBLE_MASK: u64 = 0xF;

/// Weighted digit sum over nibbles `first..NIBBLES`, doubling `first` and
/// every other nibble above it when `double_first` is set.
const fn weighted_sum(input: u64, first: u32, double_first: bool) -> u64 {
    let mut sum = 0;
    let mut double = double_first;
    let mut i = first;
    while i < NIBBLES {
        let digit = (input >> (i * 4)) & NIBBLE_MASK;
        let addend = if double { digit * 2 } else { digit };
        sum += addend / FOLD + addend % FOLD;
        double = !double;
        i += 1;
    }
    sum
}

/// Replaces the low nibble of `input` with its Luhn mod-16 check value.
///
/// The 15 nibbles above the low nibble form the payload. Whatever the low
/// nibble held before is ignored.
///
/// # Example
///
/// ```
/// use shardflake::{checksum, verify_checksum};
///
/// assert_eq!(checksum(0x7FFF_FFF0), 0x7FFF_FFF7);
/// assert!(verify_checksum(checksum(0x1234_5670)));
/// ```
#[must_use]
pub const fn checksum(input: u64) -> u64 {
    // The check nibble is unknown here, so doubling starts one nibble up.
    let sum = weighted_sum(input, 1, true);
    let check = (FOLD - sum % FOLD) % FOLD;
    (input & !NIBBLE_MASK) | check
}

/// Returns `true` if the low nibble of `input` is the Luhn mod-16 check value
/// of the nibbles above it.
///
/// Only meaningful for IDs from a layout with a 4 bit checksum field. A
/// mismatch is an expected outcome (a mistyped ID, say), not an error.
#[must_use]
pub const fn verify_checksum(input: u64) -> bool {
    // The check nibble itself is undoubled, its neighbour doubled.
    weighted_sum(input, 0, false) % FOLD == 0
}
