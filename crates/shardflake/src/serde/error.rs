/// Reasons a serialized integer is refused as an ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum SerdeError {
    /// Bit 63 is set. Generated IDs always leave it clear.
    #[error("id {id:#018x} sets the reserved top bit")]
    ReservedBit { id: u64 },

    /// The low nibble is not the checksum of the bits above it.
    #[error("id {id:#018x} fails its checksum")]
    InvalidChecksum { id: u64 },
}
