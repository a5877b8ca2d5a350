//! Unified error types for plm-tools.
//!
//! Errors here cover I/O, undecodable documents, and broken rule files.
//! Data-quality findings are [`Issue`](crate::validate::Issue) values
//! returned from the validator, never errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plm-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlmToolsError {
    /// Errors while decoding a dataset document
    #[error("Failed to decode dataset: {context}")]
    Decode {
        context: String,
        #[source]
        source: DecodeErrorKind,
    },

    /// Errors while loading or interpreting a rules file
    #[error("Failed to load rules: {context}")]
    Rules {
        context: String,
        #[source]
        source: RulesErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors (caller-contract problems, not data issues)
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific dataset decode error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unknown dataset kind: {0}")]
    UnknownDataset(String),
}

/// Specific rules-file error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RulesErrorKind {
    #[error("Rules file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported rules file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for plm-tools operations
pub type Result<T> = std::result::Result<T, PlmToolsError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PlmToolsError {
    /// Create a decode error with context
    pub fn decode(context: impl Into<String>, source: DecodeErrorKind) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Create a rules error with context
    pub fn rules(context: impl Into<String>, source: RulesErrorKind) -> Self {
        Self::Rules {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PlmToolsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PlmToolsError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(
            "JSON deserialization",
            DecodeErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    ///
    /// The closure is only called if the result is an error,
    /// which is more efficient when the context string is expensive to compute.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PlmToolsError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: PlmToolsError, new_ctx: &str) -> PlmToolsError {
    match err {
        PlmToolsError::Decode {
            context: existing,
            source,
        } => PlmToolsError::Decode {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlmToolsError::Rules {
            context: existing,
            source,
        } => PlmToolsError::Rules {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlmToolsError::Io {
            path,
            message,
            source,
        } => PlmToolsError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PlmToolsError::Config(msg) => PlmToolsError::Config(chain_context(new_ctx, &msg)),
        PlmToolsError::Validation(msg) => PlmToolsError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| PlmToolsError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| PlmToolsError::Validation(f().into()))
    }
}
