//! OpenAPI subset service
//!
//! Load → strip → emit for a single document.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::emitter::{self, OutputFormat};
use crate::application::loader;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Document, DomainError, FieldClass, FieldFilter};
use crate::infrastructure::traits::FileSystem;

/// Service for producing a reduced OpenAPI document.
pub struct SubsetService {
    fs: Arc<dyn FileSystem>,
}

impl SubsetService {
    /// Create a new subset service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Pre-flight check: the input must be an existing, readable regular file.
    pub fn check_input(&self, path: &Path) -> ApplicationResult<()> {
        if !self.fs.is_file(path) {
            return Err(DomainError::FileNotFound(path.to_path_buf()).into());
        }
        if !self.fs.is_readable(path) {
            return Err(DomainError::FileNotReadable(path.to_path_buf()).into());
        }
        debug!("Successfully validated OpenAPI spec file: {}", path.display());
        Ok(())
    }

    /// Read and parse the document at `path`.
    ///
    /// The file is read completely before parsing starts.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Document> {
        self.check_input(path)?;
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read OpenAPI spec", path)?;
        debug!("load: read {} bytes", content.len());
        loader::parse_document(&content)
    }

    /// Apply the enabled strip passes.
    pub fn transform(&self, document: Document, filter: FieldFilter) -> Document {
        if filter.is_empty() {
            return document;
        }
        if filter.contains(FieldClass::Description) {
            debug!("Removing description fields from the OpenAPI spec");
        }
        if filter.contains(FieldClass::Extension) {
            debug!("Removing extension fields from the OpenAPI spec");
        }
        filter.apply_document(&document)
    }

    /// Load and transform in one step.
    pub fn process(&self, path: &Path, filter: FieldFilter) -> ApplicationResult<Document> {
        let document = self.load(path)?;
        Ok(self.transform(document, filter))
    }

    /// Stream the document to `writer`.
    pub fn write_to<W: Write>(
        &self,
        document: &Document,
        format: OutputFormat,
        writer: W,
    ) -> ApplicationResult<()> {
        debug!("write_to: format={}", format);
        emitter::emit(document, format, writer)
    }

    /// Render in memory, then write `target`. A render failure leaves no file.
    pub fn write_file(
        &self,
        document: &Document,
        format: OutputFormat,
        target: &Path,
    ) -> ApplicationResult<()> {
        debug!("write_file: target={}, format={}", target.display(), format);
        let text = emitter::render(document, format)?;
        self.fs
            .write(target, &text)
            .with_path_context("write output", target)
    }

    /// True if `output` resolves to the same file as `input`.
    pub fn is_same_file(&self, input: &Path, output: &Path) -> bool {
        if input == output {
            return true;
        }
        match (self.fs.canonicalize(input), self.fs.canonicalize(output)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
