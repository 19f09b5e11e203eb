use crate::layout::BitLayout;

/// The fields of a packed ID, decoded through a [`BitLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdComponents {
    /// Absolute milliseconds since the UNIX epoch.
    pub millis: u64,
    /// Milliseconds since the layout's epoch, as stored.
    pub raw_millis: u64,
    pub sequence: u64,
    pub partition: u64,
    /// The check nibble, or `None` for layouts without one.
    pub checksum: Option<u64>,
}

/// Decoding.
///
/// Every operation here is total: any `u64` decodes to something. Nothing
/// checks that `value` came from a generator with this layout, so decoding
/// foreign or corrupted values yields meaningless fields rather than an
/// error. Use [`verify_checksum`](crate::verify_checksum) first when the
/// input is untrusted and the layout carries a checksum.
impl BitLayout {
    /// The stored timestamp, relative to [`BitLayout::epoch`].
    pub const fn extract_raw_millis(&self, value: u64) -> u64 {
        value >> self.time().shift()
    }

    /// The stored timestamp as milliseconds since the UNIX epoch.
    ///
    /// Wraps on overflow, which only garbage input can trigger.
    pub const fn extract_millis(&self, value: u64) -> u64 {
        self.extract_raw_millis(value).wrapping_add(self.epoch())
    }

    pub const fn extract_sequence(&self, value: u64) -> u64 {
        self.sequence().extract(value)
    }

    pub const fn extract_partition(&self, value: u64) -> u64 {
        self.partition().extract(value)
    }

    /// The low check nibble. Always 0 for layouts without a checksum.
    pub const fn extract_checksum(&self, value: u64) -> u64 {
        self.checksum().extract(value)
    }

    /// Decodes every field at once.
    ///
    /// # Example
    ///
    /// ```
    /// use shardflake::{BitLayout, IdComponents};
    ///
    /// let layout = BitLayout::default();
    /// let id = layout.pack(1_000, 3, 0x13);
    ///
    /// let IdComponents { millis, sequence, partition, checksum, .. } = layout.decode(id);
    /// assert_eq!(millis, layout.epoch() + 1_000);
    /// assert_eq!(sequence, 3);
    /// assert_eq!(partition, 0x13);
    /// assert!(checksum.is_some());
    /// ```
    pub const fn decode(&self, value: u64) -> IdComponents {
        IdComponents {
            millis: self.extract_millis(value),
            raw_millis: self.extract_raw_millis(value),
            sequence: self.extract_sequence(value),
            partition: self.extract_partition(value),
            checksum: if self.has_checksum() {
                Some(self.extract_checksum(value))
            } else {
                None
            },
        }
    }
}
