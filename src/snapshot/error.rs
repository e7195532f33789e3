//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, or restoring snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot was written by an incompatible format version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot names a state that was not provided at restore
    #[error("No state named '{0}' among the provided states")]
    UnknownState(String),

    /// Two provided states share a name, so the snapshot is ambiguous
    #[error("More than one provided state is named '{0}'")]
    DuplicateStateName(String),
}
