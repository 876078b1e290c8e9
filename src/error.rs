//! Structured error types for the formgrid entry points.
//!
//! The layout transforms themselves are total functions and never fail; the
//! only fallible surface is turning JSON into a bundle (and a sanity check
//! that the configuration and schema describe the same content type).

use thiserror::Error;

/// The unified error type returned by formgrid's fallible API functions.
#[derive(Debug, Error)]
pub enum FormgridError {
    /// JSON input failed to parse as a configuration bundle.
    #[error("failed to parse bundle: {source}\n  hint: {hint}")]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The bundle's configuration and schema name different content types.
    #[error("configuration is for `{config}` but the schema describes `{schema}`")]
    UidMismatch { config: String, schema: String },
}

impl From<serde_json::Error> for FormgridError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "check for trailing commas, missing quotes, or unescaped characters".to_string()
            }
            serde_json::error::Category::Data => {
                "the JSON is valid but doesn't match the bundle shape; expected top-level \
                 `configuration`, `schema`, and `components` keys"
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => "the input stream failed mid-read".to_string(),
        };
        FormgridError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: FormgridError = serde_json::from_str::<crate::model::Bundle>("{")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.contains("hint:"), "{msg}");
    }
}
