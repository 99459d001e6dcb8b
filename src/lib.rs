//! Strip descriptions and vendor extensions from OpenAPI documents.
//!
//! The pipeline is load → transform → emit:
//!
//! ```ignore
//! use openapi_subset::application::{parse_document, render, OutputFormat};
//! use openapi_subset::domain::{FieldClass, FieldFilter};
//!
//! let doc = parse_document("openapi: 3.0.0\ninfo:\n  title: T\n  x-logo: l.png\n")?;
//! let doc = FieldFilter::new().with(FieldClass::Extension).apply_document(&doc);
//! print!("{}", render(&doc, OutputFormat::Json)?);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
