use sha1::{Digest, Sha1};

/// Derives a 16-bit partition tag from an arbitrary key.
///
/// The tag is the last two bytes of the key's SHA-1 digest, read big-endian.
/// It is always 16 bits wide regardless of the layout's partition width;
/// generators keep only the low `partition_bits` of it.
///
/// # Example
///
/// ```
/// use shardflake::make_partition;
///
/// assert_eq!(make_partition("test"), 0xBBD3);
/// ```
#[must_use]
pub fn make_partition(key: impl AsRef<[u8]>) -> u16 {
    let digest = Sha1::digest(key.as_ref());
    u16::from_be_bytes([digest[18], digest[19]])
}
