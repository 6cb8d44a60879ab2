use std::fmt::{Display, Formatter};

/// Failures of the application access layer.
///
/// Messages are meant to be shown to the user as they are; nothing here is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The proxy could not be reached or the connection failed mid-request.
    Transport(String),
    /// The proxy answered with a non-success status. `body` is its diagnostic payload.
    Status { status: u16, body: String },
    /// A header the operation relies on is not present in the sheet.
    MissingColumn(String),
    /// A record id that is not a row position.
    InvalidId(String),
    NotFound(String),
    /// The proxy answered with a body that could not be decoded.
    Decode(String),
    Config(String),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::Transport(msg) => write!(f, "network error: {}", msg),
            TrackerError::Status { status, body } if body.is_empty() => {
                write!(f, "request failed with status {}", status)
            }
            TrackerError::Status { status, body } => {
                write!(f, "request failed with status {}: {}", status, body)
            }
            TrackerError::MissingColumn(column) => write!(f, "column not found: {}", column),
            TrackerError::InvalidId(id) => write!(f, "invalid application id: {}", id),
            TrackerError::NotFound(what) => write!(f, "not found: {}", what),
            TrackerError::Decode(msg) => write!(f, "unexpected response: {}", msg),
            TrackerError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {}

impl From<reqwest::Error> for TrackerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TrackerError::Decode(e.to_string())
        } else {
            TrackerError::Transport(e.to_string())
        }
    }
}

impl From<config::ConfigError> for TrackerError {
    fn from(e: config::ConfigError) -> Self {
        TrackerError::Config(e.to_string())
    }
}

impl From<csv::Error> for TrackerError {
    fn from(e: csv::Error) -> Self {
        TrackerError::Config(format!("seed csv: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_payload() {
        let err = TrackerError::Status {
            status: 400,
            body: "{\"error\":\"Invalid range\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 400: {\"error\":\"Invalid range\"}"
        );
        let bare = TrackerError::Status { status: 503, body: String::new() };
        assert_eq!(bare.to_string(), "request failed with status 503");
    }

    #[test]
    fn missing_column_names_the_column() {
        assert_eq!(
            TrackerError::MissingColumn("Status".into()).to_string(),
            "column not found: Status"
        );
    }
}
