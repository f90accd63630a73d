use crate::payload::MediaKind;
use thiserror::Error;

/// Outcomes of a dispatch that produce no response envelope.
///
/// Transport failures are not errors here: they are delivered as a failure
/// [`ResponseEnvelope`](crate::ResponseEnvelope).
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Network is not reachable; request was not sent")]
    Offline,

    #[error("Request encoding failed: {0}")]
    Encoding(String),

    #[error("{kind} payload has {data} entries but only {fields} field names")]
    PayloadFieldMismatch {
        kind: MediaKind,
        data: usize,
        fields: usize,
    },
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DispatchError::Offline.to_string(),
            "Network is not reachable; request was not sent"
        );

        let mismatch = DispatchError::PayloadFieldMismatch {
            kind: MediaKind::Video,
            data: 2,
            fields: 1,
        };
        assert_eq!(
            mismatch.to_string(),
            "video payload has 2 entries but only 1 field names"
        );
    }
}
