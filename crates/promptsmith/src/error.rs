//! Error types for the boundary layers (share links, preset files).
//!
//! The three core entry points ([`assemble`](crate::assemble()),
//! [`checklist`](crate::checklist()), [`critique`](crate::critique())) are
//! total and never return an error. Only decoding caller-supplied data and
//! persisting the preset library can fail.

use thiserror::Error;

/// Error type for `promptsmith` boundary operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The share payload is not valid base64 in either accepted alphabet.
    #[error("invalid share encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded payload is JSON, but a field has the wrong type
    /// (e.g. a variable value that is not a string).
    #[error("type mismatch in prompt state: {0}")]
    TypeMismatch(String),

    /// The payload is not JSON at all, or JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error while reading or writing a preset library.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A share URL without a `#fragment`.
    #[error("URL has no state fragment: {0}")]
    MissingFragment(String),

    /// No preset with the given id exists in the library.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a `serde_json` error: data errors (wrong type, missing
    /// required shape) become [`Error::TypeMismatch`]; syntax and EOF errors
    /// stay [`Error::Json`].
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Error::TypeMismatch(err.to_string()),
            _ => Error::Json(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_errors_become_type_mismatch() {
        let err = serde_json::from_str::<std::collections::BTreeMap<String, String>>(r#"{"a": 1}"#)
            .unwrap_err();
        assert!(matches!(Error::from_decode(err), Error::TypeMismatch(_)));
    }

    #[test]
    fn syntax_errors_stay_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(Error::from_decode(err), Error::Json(_)));
    }
}
