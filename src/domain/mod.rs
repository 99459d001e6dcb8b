//! Domain layer: document tree and field filtering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod filter;
pub mod node;

pub use error::DomainError;
pub use filter::{
    remove_descriptions, remove_extensions, FieldClass, FieldFilter, DESCRIPTION_KEY,
    EXTENSION_PREFIX,
};
pub use node::{Document, Mapping, Node, Scalar};
