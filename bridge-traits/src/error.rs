use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The transport failed before a response was obtained. `code` is the
    /// platform URL-error code (see [`transport_codes`]).
    #[error("Transport error ({code}): {message}")]
    Transport { code: i64, message: String },

    /// A request body could not be encoded (e.g. an invalid multipart part).
    #[error("Request encoding failed: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    pub fn transport(code: i64, message: impl Into<String>) -> Self {
        Self::Transport {
            code,
            message: message.into(),
        }
    }

    /// Native error code carried by a transport failure, if any.
    pub fn transport_code(&self) -> Option<i64> {
        match self {
            Self::Transport { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Platform URL-error codes reported by [`BridgeError::Transport`].
///
/// Values follow the URL loading system codes mobile hosts already surface,
/// so a code produced by a desktop adapter means the same thing as one
/// forwarded from iOS or Android.
pub mod transport_codes {
    pub const UNKNOWN: i64 = -1;
    pub const BAD_URL: i64 = -1000;
    pub const TIMED_OUT: i64 = -1001;
    pub const CANNOT_CONNECT_TO_HOST: i64 = -1004;
    pub const NETWORK_CONNECTION_LOST: i64 = -1005;
    pub const CANNOT_PARSE_RESPONSE: i64 = -1017;
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = BridgeError::transport(transport_codes::TIMED_OUT, "Request timed out");
        assert_eq!(err.to_string(), "Transport error (-1001): Request timed out");
        assert_eq!(err.transport_code(), Some(-1001));
    }

    #[test]
    fn test_non_transport_error_has_no_code() {
        let err = BridgeError::Encoding("bad mime".to_string());
        assert_eq!(err.transport_code(), None);
    }
}
