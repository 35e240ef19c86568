//! Pipeline error taxonomy.
//!
//! Every failure mode maps to exactly one variant. All variants are fatal
//! for the request that produced them: no retry, no rollback of store
//! writes that already succeeded. Errors propagate unchanged to the
//! transport layer, which maps them to HTTP statuses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A prompt skeleton referenced a placeholder the caller did not bind.
    #[error("prompt skeleton '{skeleton}' has no binding for placeholder '{{{placeholder}}}'")]
    MissingBinding {
        skeleton: &'static str,
        placeholder: String,
    },

    /// The text-generation call failed (transport, auth, or provider-side).
    #[error("generation request failed: {0}")]
    Generation(String),

    /// Model output did not parse into the required object/array shape.
    #[error("model output did not match the expected shape: {0}")]
    MalformedOutput(String),

    /// A workspace-store call failed; `operation` names the remote call.
    #[error("workspace store operation '{operation}' failed: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    /// A queried entry has no content block to read a body from.
    #[error("entry '{entry_id}' has no content blocks")]
    EntryBodyMissing { entry_id: String },
}

impl Error {
    pub(crate) fn store(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Store {
            operation,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_names_the_failing_operation() {
        let err = Error::store("pages.create", "HTTP 403");
        assert_eq!(
            err.to_string(),
            "workspace store operation 'pages.create' failed: HTTP 403"
        );
    }

    #[test]
    fn missing_binding_renders_placeholder_in_braces() {
        let err = Error::MissingBinding {
            skeleton: "templatize",
            placeholder: "LINKEDIN_POST".to_string(),
        };
        assert!(err.to_string().contains("'{LINKEDIN_POST}'"));
    }
}
