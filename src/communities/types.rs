use serde::{Deserialize, Serialize};

/// A sub-field that was dropped while parsing a record in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseWarning {
    /// A `p` moderator tag whose key could not be decoded
    MalformedModeratorKey { value: String, reason: String },

    /// Approval content that is not a decodable event
    MalformedEmbeddedEvent { reason: String },
}

/// A parsed record together with the warnings collected while parsing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parsed<T> {
    pub record: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn new(record: T, warnings: Vec<ParseWarning>) -> Self {
        Self { record, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_record(self) -> T {
        self.record
    }
}
