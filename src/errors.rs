/*!
 * Error types for the subforge library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while parsing or rebuilding subtitle documents
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The content matched none of the known format signatures
    #[error("Unknown subtitle format")]
    UnknownFormat,

    /// A parse envelope was used with the wrong format
    #[error("Invalid subtitle type: expected {expected}, found {found}")]
    InvalidSubtitleType {
        /// Format the operation required
        expected: String,
        /// Format that was actually supplied
        found: String,
    },

    /// A timestamp field could not be read as a number
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A model transcript did not follow the `mm:ss:ms --> mm:ss:ms` grammar
    #[error("Invalid transcript format: {0}")]
    InvalidTranscriptFormat(String),
}

/// Errors that can occur while reading a translation reply
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The (possibly repaired) reply is still not valid JSON for the schema
    #[error("Failed to parse translation response: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation reply handling
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
