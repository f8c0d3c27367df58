use thiserror::Error;

pub type Result<T> = core::result::Result<T, CommunityError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommunityError {
    #[error("Event kind {found} is not the expected kind {expected}")]
    WrongKind { expected: u16, found: u16 },

    #[error("Missing required tag: {0}")]
    MissingRequiredTag(&'static str),

    #[error("Malformed community coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Malformed public key: {0}")]
    MalformedPubKey(String),

    #[error("Malformed embedded event: {0}")]
    MalformedEmbeddedEvent(String),

    #[error("Logging setup error: {0}")]
    LoggingSetup(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CommunityError {
    /// Checks `found` against the record's fixed kind.
    pub(crate) fn ensure_kind(expected: u16, found: u16) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::WrongKind { expected, found })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_kind() {
        assert!(CommunityError::ensure_kind(34550, 34550).is_ok());
        assert_eq!(
            CommunityError::ensure_kind(34550, 1),
            Err(CommunityError::WrongKind {
                expected: 34550,
                found: 1
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = CommunityError::MissingRequiredTag("d");
        assert_eq!(err.to_string(), "Missing required tag: d");

        let err = CommunityError::WrongKind {
            expected: 4550,
            found: 1111,
        };
        assert_eq!(
            err.to_string(),
            "Event kind 1111 is not the expected kind 4550"
        );
    }
}
