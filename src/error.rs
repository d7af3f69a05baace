/// Crate-level error types for livetext diagnostics.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Every failure a save can end in.
///
/// Each variant names the file, candidate list, or reason, so a one-line
/// message is enough for the person editing.
#[allow(clippy::error_impl_error, reason = "crate-level error type re-exported as livetext::Error")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Listener could not be bound for the HTTP service.
    #[error("cannot bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// The wrapped I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `.livetext.toml` exists but cannot be parsed.
    #[error("invalid config {}: {source}", path.display())]
    ConfigInvalid {
        /// Path to the config file.
        path: PathBuf,
        /// The wrapped TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// The candidate file does not exist on disk.
    #[error("file not found: {name}")]
    FileNotFound {
        /// Base name of the missing file.
        name: String,
    },

    /// The request is missing something it needs, or carries a no-op edit.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("io: {name}: {source}")]
    Io {
        /// Base name of the file being read or written.
        name: String,
        /// The wrapped I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The patch service could not be reached; no further candidate can succeed.
    #[error("service unavailable: {reason}")]
    ServiceUnavailable {
        /// Transport-level failure description.
        reason: String,
    },

    /// The file exists but does not contain the old text.
    #[error("text not found in {name}")]
    TextNotFound {
        /// Base name of the searched file.
        name: String,
    },

    /// Every candidate was tried and none contained the old text.
    #[error("text not found in any file. Tried: {}", tried.join(", "))]
    TextNotFoundAnywhere {
        /// Base names of the attempted candidates, in trial order.
        tried: Vec<String>,
    },
}

impl Error {
    /// The wire-level category of this error.
    pub const fn kind(&self) -> ErrorKind {
        return match self {
            Self::Bind { .. } | Self::Io { .. } => ErrorKind::IoError,
            Self::ConfigInvalid { .. } | Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            Self::TextNotFound { .. } => ErrorKind::TextNotFound,
            Self::TextNotFoundAnywhere { .. } => ErrorKind::TextNotFoundAnywhere,
        };
    }

    /// Shorthand for an `InvalidRequest` with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        return Self::InvalidRequest { reason: reason.into() };
    }
}

/// Error categories carried in `PatchResult.errorKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The candidate file does not exist.
    FileNotFound,
    /// Missing or contradictory request fields.
    InvalidRequest,
    /// Read or write failed.
    IoError,
    /// The engine could not be reached.
    ServiceUnavailable,
    /// The file does not contain the old text.
    TextNotFound,
    /// No candidate contained the old text.
    TextNotFoundAnywhere,
}

impl ErrorKind {
    /// Whether the orchestration may move on to the next candidate.
    pub const fn is_per_candidate(self) -> bool {
        return matches!(self, Self::FileNotFound | Self::IoError | Self::TextNotFound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_message_lists_every_candidate() {
        let err = Error::TextNotFoundAnywhere {
            tried: vec!["page.tsx".to_string(), "index.tsx".to_string()],
        };
        assert_eq!(err.to_string(), "text not found in any file. Tried: page.tsx, index.tsx");
    }

    #[test]
    fn kind_serializes_with_wire_names() {
        let kinds = [
            ErrorKind::FileNotFound,
            ErrorKind::InvalidRequest,
            ErrorKind::IoError,
            ErrorKind::ServiceUnavailable,
            ErrorKind::TextNotFound,
            ErrorKind::TextNotFoundAnywhere,
        ];
        let json = serde_json::to_string(&kinds).unwrap();
        assert_eq!(
            json,
            r#"["FileNotFound","InvalidRequest","IoError","ServiceUnavailable","TextNotFound","TextNotFoundAnywhere"]"#
        );
    }

    #[test]
    fn only_file_level_failures_continue_the_trial() {
        assert!(ErrorKind::FileNotFound.is_per_candidate());
        assert!(ErrorKind::TextNotFound.is_per_candidate());
        assert!(ErrorKind::IoError.is_per_candidate());
        assert!(!ErrorKind::ServiceUnavailable.is_per_candidate());
        assert!(!ErrorKind::InvalidRequest.is_per_candidate());
    }
}
