//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the document model.
/// These are independent of parser and I/O concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("the file '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("the file '{}' is not readable", .0.display())]
    FileNotReadable(PathBuf),

    #[error("document root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("unsupported mapping key: {kind} keys cannot be represented")]
    UnsupportedKey { kind: &'static str },

    #[error("non-finite number at {path}")]
    NonFiniteNumber { path: String },

    #[error("number at {path} is wider than 128 bits")]
    UnrepresentableNumber { path: String },
}
