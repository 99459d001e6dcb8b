//! Application layer: loading, emitting and the subset service
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod emitter;
pub mod error;
pub mod error_ext;
pub mod loader;
pub mod services;

pub use emitter::{emit, render, OutputFormat};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{parse_document, SourceFormat};
