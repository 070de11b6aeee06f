//! Error types for Reposource.
//!
//! Problems with a repository definition fall into two tiers:
//!
//! - **Reportable** problems (missing credentials, a refresh interval that is
//!   too short) are returned by [`RepoDef::valid`](crate::RepoDef::valid) as a
//!   list of human readable messages. They are not errors of this module.
//! - **Fatal** problems (a property with the wrong type, a source address that
//!   cannot be parsed) make the definition unusable and are reported as a
//!   [`RepoDefError`].
//!
//! # Example
//!
//! ```
//! use reposource_core::{RepoDefError, Result};
//!
//! fn require_uri(uri: &str) -> Result<&str> {
//!     if uri.trim().is_empty() {
//!         return Err(RepoDefError::missing_uri("default"));
//!     }
//!     Ok(uri)
//! }
//!
//! assert!(require_uri("").unwrap_err().is_missing_uri());
//! ```

use thiserror::Error;

/// Fatal error raised while building, validating or resolving a repository
/// definition.
#[derive(Debug, Error)]
pub enum RepoDefError {
    /// The definition has no source address.
    #[error("Repository '{name}' has no source uri configured")]
    MissingUri {
        /// Name of the definition
        name: String,
    },

    /// The source address could not be parsed.
    #[error("Invalid source address '{uri}': {message}")]
    InvalidAddress {
        /// The raw address
        uri: String,
        /// Description of the parse failure
        message: String,
        /// Underlying parser error
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A property could not be converted to the type of its field.
    #[error("Invalid value for property '{key}': {message}")]
    InvalidProperty {
        /// The property key
        key: String,
        /// Why the value was rejected
        message: String,
    },

    /// A property document could not be parsed.
    #[error("Failed to parse repository properties from '{source_name}': {message}")]
    Parse {
        /// Where the document came from (file name, format, ...)
        source_name: String,
        /// Description of the parse error
        message: String,
    },

    /// Validation reported at least one problem.
    #[error("Repository '{name}' is misconfigured: {}", messages.join("; "))]
    Invalid {
        /// Name of the definition
        name: String,
        /// The validation messages
        messages: Vec<String>,
    },

    /// A local path could not be turned into a file URI.
    #[error("Cannot build a file URI for path '{path}'")]
    UriBuild {
        /// The offending path
        path: String,
    },
}

impl RepoDefError {
    /// Creates a MissingUri error.
    pub fn missing_uri(name: impl Into<String>) -> Self {
        Self::MissingUri { name: name.into() }
    }

    /// Creates an InvalidAddress error without a cause.
    pub fn invalid_address(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            uri: uri.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an InvalidAddress error wrapping the parser error.
    pub fn invalid_address_with_cause<E>(uri: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidAddress {
            uri: uri.into(),
            message: cause.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an InvalidProperty error.
    pub fn invalid_property(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a Parse error.
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates an Invalid error from validation messages.
    pub fn invalid(name: impl Into<String>, messages: Vec<String>) -> Self {
        Self::Invalid {
            name: name.into(),
            messages,
        }
    }

    /// Creates a UriBuild error.
    pub fn uri_build(path: impl Into<String>) -> Self {
        Self::UriBuild { path: path.into() }
    }

    /// Returns true if the definition has no uri.
    pub fn is_missing_uri(&self) -> bool {
        matches!(self, Self::MissingUri { .. })
    }

    /// Returns true if the source address could not be parsed.
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Self::InvalidAddress { .. })
    }

    /// Returns true if a property had the wrong type or value.
    pub fn is_invalid_property(&self) -> bool {
        matches!(self, Self::InvalidProperty { .. })
    }

    /// Returns true if this wraps validation messages.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// Returns the validation messages carried by an `Invalid` error.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Invalid { messages, .. } => messages,
            _ => &[],
        }
    }
}

/// Type alias for Results with RepoDefError.
pub type Result<T> = std::result::Result<T, RepoDefError>;
