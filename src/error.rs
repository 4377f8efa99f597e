//! Error handling for the ahoy application.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for ahoy operations.
///
/// Every fallible operation in the crate returns this type; the binary decides
/// how to report it and which exit status to use.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the template engine while rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur while resolving a destination path
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The provided local skeleton path is missing or is not a directory
    #[error("Skeleton path '{template_dir}' does not exist or is not a directory.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Represents an invalid copy or ignore pattern
    #[error("Invalid glob pattern: {0}.")]
    GlobError(#[from] globset::Error),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents a failed skeleton archive download
    #[error("Download of '{url}' failed: {source}.")]
    DownloadError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Represents a corrupted or unreadable skeleton archive
    #[error("Archive error: {0}.")]
    ArchiveError(#[from] zip::result::ZipError),

    /// Represents terminal interaction failures
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// Represents malformed JSON input (descriptor, settings or answers)
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents malformed YAML input (descriptor or settings)
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Represents errors while walking the skeleton directory
    #[error("Walk error: {0}.")]
    WalkError(#[from] walkdir::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
