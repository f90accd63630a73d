use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_missing_display() {
        let err = Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "inject one".to_string(),
        };
        assert_eq!(err.to_string(), "Capability missing: HttpClient - inject one");
    }

    #[test]
    fn test_bridge_error_conversion() {
        let err: Error = BridgeError::DatabaseError("locked".to_string()).into();
        assert!(matches!(err, Error::Bridge(_)));
        assert!(err.to_string().contains("locked"));
    }
}
