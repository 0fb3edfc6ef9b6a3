use thiserror::Error;

/// Errors raised while splitting or combining a secret.
///
/// Every variant is terminal for the operation that produced it: a split or
/// combine either returns the complete result or one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Threshold, share count or chunk size out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No standard prime is larger than the values that must fit in the field.
    #[error("secret is too large for share calculation")]
    SecretTooLarge,

    /// Fewer than two shares with distinct x-coordinates for some chunk.
    #[error("insufficient shares: {0}")]
    InsufficientShares(String),

    /// Artifacts disagree on the number of chunks they carry.
    #[error("artifacts disagree on chunk count: expected {expected}, found {found}")]
    ChunkMismatch { expected: usize, found: usize },

    /// A byte is not part of the codec alphabet.
    #[error("byte 0x{byte:02x} at position {position} is outside the codec alphabet")]
    Encoding { byte: u8, position: usize },

    /// A share token, artifact or recovered chunk does not follow the
    /// expected grammar.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("artifact is not a JSON list of share tokens: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
