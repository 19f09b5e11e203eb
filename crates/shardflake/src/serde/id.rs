use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde adapter for ID fields stored as their native `u64`.
///
/// Works for [`PackedId`](crate::PackedId) and for bare `u64` fields. Values
/// with the reserved top bit set are rejected on the way in.
///
/// ```
/// # use serde::{Deserialize, Serialize};
/// use shardflake::{PackedId, as_native_id};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "as_native_id")]
///     id: PackedId,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"id":42}"#).unwrap();
/// assert_eq!(row.id, PackedId::from_raw(42));
/// ```
pub mod as_native_id {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::SerdeError;

    /// Serializes the ID as its native integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Copy + Into<u64>,
        S: Serializer,
    {
        let raw: u64 = (*id).into();
        raw.serialize(s)
    }

    /// Deserializes an ID from its native integer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value sets the reserved top bit
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: From<u64>,
        D: Deserializer<'de>,
    {
        let id = u64::deserialize(d)?;
        if id >> 63 != 0 {
            return Err(serde::de::Error::custom(SerdeError::ReservedBit { id }));
        }
        Ok(ID::from(id))
    }
}

/// Like [`as_native_id`], but deserialization also insists on a valid
/// checksum nibble. Only suitable for layouts with `checksum_bits = 4`.
pub mod as_checked_id {
    use super::{Deserializer, Serializer};
    use crate::{SerdeError, verify_checksum};

    /// Serializes the ID as its native integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: Copy + Into<u64>,
        S: Serializer,
    {
        super::as_native_id::serialize(id, s)
    }

    /// Deserializes an ID and verifies its checksum.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value sets the reserved top bit
    /// - The checksum nibble does not match
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: From<u64>,
        D: Deserializer<'de>,
    {
        let id: u64 = super::as_native_id::deserialize(d)?;
        if !verify_checksum(id) {
            return Err(serde::de::Error::custom(SerdeError::InvalidChecksum { id }));
        }
        Ok(ID::from(id))
    }
}
