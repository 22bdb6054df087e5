//! Failure classes of an extraction call.

use thiserror::Error;

/// Why an extraction call did not produce a result set.
///
/// None of these touch the currently installed result set; they only prevent
/// a new one from replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// A required input file is missing or unreadable; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),
    /// The service could not be reached.
    #[error("transport error: {message} (is the extraction service running at {url}?)")]
    Transport { url: String, message: String },
    /// The service answered but reported a failure.
    #[error("server error{}: {message}", status_suffix(.status))]
    Server { status: Option<u16>, message: String },
    /// The response does not have the expected shape.
    #[error("format error: {0}")]
    Format(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl ExtractionError {
    pub const GENERIC_SERVER_MESSAGE: &'static str = "the extraction service reported a failure";

    /// Stable lowercase label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::Validation(_) => "validation",
            ExtractionError::Transport { .. } => "transport",
            ExtractionError::Server { .. } => "server",
            ExtractionError::Format(_) => "format",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ExtractionError::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ExtractionError::Transport { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, ExtractionError::Server { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, ExtractionError::Format(_))
    }

    /// Server error with the given message, or the generic one when blank.
    pub fn server(status: Option<u16>, message: Option<&str>) -> Self {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(Self::GENERIC_SERVER_MESSAGE)
            .to_string();
        ExtractionError::Server { status, message }
    }
}
