//! Error types for promptkit operations.
//!
//! This module defines [`PromptError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Every underlying library failure (filesystem, HTTP, YAML, template engine)
//! is translated into one of the four variants before it reaches a caller.
//! Messages always name the template and the original cause, so callers never
//! need to know which source or which library raised.

use thiserror::Error;

/// Core error type for promptkit operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The template name is absent from the selected source.
    #[error("Template not found: {name}")]
    NotFound { name: String },

    /// The template content could not be parsed (body syntax or front-matter).
    #[error("Malformed template '{name}': {message}")]
    Malformed { name: String, message: String },

    /// The selected source is unusable (missing credentials, bad client,
    /// unreachable endpoint).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A render referenced a variable missing from the context.
    #[error("Undefined variable rendering '{name}': {message}")]
    UndefinedVariable { name: String, message: String },
}

/// Result type alias for promptkit operations.
pub type Result<T> = std::result::Result<T, PromptError>;
