//! Error types shared by capture, codec, dispatch and storage.

/// Failure reported by a live host object or registry.
///
/// Hosts wrap whatever their runtime reports (player disconnected mid-query,
/// registry not ready, ...) into a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("host error: {0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error types for snapshot and proxy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// Reading a field from the live player failed; nothing was captured.
    #[error("capture failed while reading `{field}`: {reason}")]
    CaptureFailed { field: &'static str, reason: String },

    /// The operation is not part of the offline capability set.
    #[error("the operation `{0}` is not supported for offline players")]
    CapabilityNotSupported(String),

    #[error("serialization error: {0}")]
    SerializeStructureFailed(String),

    #[error("deserialization error: {0}")]
    DeserializeStructureFailed(String),

    /// Two capabilities were registered under the same operation name.
    #[error("operation `{0}` is registered more than once; dispatch by name would be ambiguous")]
    AmbiguousOperation(String),

    #[error("invalid arguments for `{operation}`: {reason}")]
    InvalidArguments { operation: String, reason: String },

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("snapshot store error: {0}")]
    Store(String),

    #[error("`{0}` cannot be used as a snapshot file name")]
    InvalidName(String),
}

pub type PlayerResult<T> = Result<T, PlayerError>;
