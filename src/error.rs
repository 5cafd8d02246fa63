//! Error types for release notes generation.

use std::path::PathBuf;

/// Everything that can go wrong between building the request and writing the notes.
///
/// The command layer collapses every variant into a diagnostic line and exit
/// status 1; the variants exist so callers and tests can tell causes apart.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not the JSON shape we expect
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The response parsed but carried no `choices[0].message.content`
    #[error("response contained no completion text (choices[0].message.content)")]
    MissingCompletion,

    /// The request could not be built, e.g. a header value with a stray newline
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body could not be serialized
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The release notes could not be written to disk
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Status code carried by an HTTP failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = GenerateError::HttpStatus {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: invalid api key");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_invalid_request_is_not_a_network_error() {
        let err = GenerateError::InvalidRequest("bad header".to_string());
        assert_eq!(err.to_string(), "invalid request: bad header");
        assert!(!matches!(err, GenerateError::Network(_)));
    }

    #[test]
    fn test_write_error_names_path() {
        let err = GenerateError::Write {
            path: PathBuf::from("out/release_notes.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let message = err.to_string();
        assert!(message.contains("out/release_notes.md"));
        assert!(message.contains("no such directory"));
        assert_eq!(err.status(), None);
    }
}
