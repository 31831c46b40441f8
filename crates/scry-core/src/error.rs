use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Null pointer while reading {what}")]
    NullPointer { what: &'static str },

    #[error("Malformed remote array at {address:#x} (count={count}, max_count={max_count})")]
    MalformedArray {
        address: u64,
        count: u32,
        max_count: u32,
    },

    #[error("Non-finite value in {what}")]
    NonFiniteValue { what: &'static str },

    #[error("Field of view {0} is outside (0, 180) degrees")]
    InvalidFieldOfView(f64),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Shorthand for a failed or short read
    pub fn read_failed(address: u64, message: impl Into<String>) -> Self {
        Error::MemoryReadFailed {
            address,
            message: message.into(),
        }
    }

    /// Whether the error came from the foreign process rather than local files.
    ///
    /// Remote errors are expected mid-scan (entities despawn between reads) and
    /// callers skip the affected entity instead of aborting.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::MemoryReadFailed { .. }
                | Error::NullPointer { .. }
                | Error::MalformedArray { .. }
                | Error::NonFiniteValue { .. }
                | Error::InvalidFieldOfView(_)
        )
    }
}
