//! Error types for ddms
//!
//! This module defines all error types used throughout the library.
//! Fatal validation failures carry a locator identifying the element
//! they originated from; advisory messages are not errors and live in
//! [`crate::components::ValidationMessage`].

use std::fmt;
use thiserror::Error;

/// Result type alias using ddms Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ddms operations
#[derive(Error, Debug)]
pub enum Error {
    /// A component failed validation
    #[error("invalid component: {0}")]
    InvalidComponent(#[from] InvalidComponentError),

    /// A parsed node was handed to the wrong component type
    #[error("malformed component: expected {expected}, found {found}")]
    MalformedComponent {
        /// Expected qualified name, in Clark notation
        expected: String,
        /// Qualified name of the node actually supplied
        found: String,
    },

    /// Unknown DDMS version identifier
    #[error("unsupported DDMS version: '{0}'")]
    UnsupportedVersion(String),

    /// Invalid settings
    #[error("configuration error: {0}")]
    Config(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidComponent`] without a locator
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidComponent(InvalidComponentError::new(message))
    }

    /// Attach a locator to an invalid-component error.
    ///
    /// Only the first locator sticks: an error raised by a nested element
    /// keeps pointing at that element when it bubbles through its parents.
    pub fn located_at(self, locator: &str) -> Self {
        match self {
            Error::InvalidComponent(mut err) => {
                if err.locator.is_none() {
                    err.locator = Some(locator.to_string());
                }
                Error::InvalidComponent(err)
            }
            other => other,
        }
    }

    /// The locator of an invalid-component error, if any
    pub fn locator(&self) -> Option<&str> {
        match self {
            Error::InvalidComponent(err) => err.locator.as_deref(),
            _ => None,
        }
    }
}

/// A component failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidComponentError {
    /// Error message
    pub message: String,
    /// Qualified-name path of the element that failed validation
    pub locator: Option<String>,
}

impl InvalidComponentError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: None,
        }
    }

    /// Set the locator of the failing element
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }
}

impl fmt::Display for InvalidComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref locator) = self.locator {
            write!(f, "\n\nLocator: {}", locator)?;
        }

        Ok(())
    }
}

impl std::error::Error for InvalidComponentError {}
