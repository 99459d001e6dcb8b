//! Document emission as pretty JSON or block-style YAML

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Document, DomainError};

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Yaml => "YAML",
        }
    }

    /// Format implied by a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Pick the output format.
    ///
    /// Precedence: `--yaml` flag, configured format, output file extension, JSON.
    pub fn resolve(yaml_flag: bool, configured: Option<Self>, output: Option<&Path>) -> Self {
        if yaml_flag {
            return OutputFormat::Yaml;
        }
        configured
            .or_else(|| output.and_then(Self::from_extension))
            .unwrap_or_default()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}' (expected json or yaml)", other)),
        }
    }
}

fn serialization_error(format: OutputFormat, err: impl fmt::Display) -> ApplicationError {
    ApplicationError::Serialization {
        format: format.name(),
        message: err.to_string(),
    }
}

/// JSON has no representation for NaN or infinity.
fn ensure_finite(document: &Document) -> ApplicationResult<()> {
    match document.find_non_finite() {
        Some(path) => Err(serialization_error(
            OutputFormat::Json,
            DomainError::NonFiniteNumber { path },
        )),
        None => Ok(()),
    }
}

/// Numbers wider than 128 bits only have a verbatim JSON form.
fn ensure_yaml_fit(document: &Document) -> ApplicationResult<()> {
    match document.find_yaml_unfit() {
        Some(path) => Err(serialization_error(
            OutputFormat::Yaml,
            DomainError::UnrepresentableNumber { path },
        )),
        None => Ok(()),
    }
}

/// Render the whole document to a string.
pub fn render(document: &Document, format: OutputFormat) -> ApplicationResult<String> {
    match format {
        OutputFormat::Json => {
            ensure_finite(document)?;
            let mut text =
                serde_json::to_string_pretty(document).map_err(|e| serialization_error(format, e))?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => {
            ensure_yaml_fit(document)?;
            serde_yaml::to_string(document).map_err(|e| serialization_error(format, e))
        }
    }
}

/// Stream the document to `writer`.
///
/// Validation happens before the first byte is written; an I/O failure
/// midway may leave partial output behind.
pub fn emit<W: Write>(document: &Document, format: OutputFormat, mut writer: W) -> ApplicationResult<()> {
    match format {
        OutputFormat::Json => {
            ensure_finite(document)?;
            serde_json::to_writer_pretty(&mut writer, document)
                .map_err(|e| serialization_error(format, e))?;
            writer
                .write_all(b"\n")
                .map_err(|e| serialization_error(format, e))?;
        }
        OutputFormat::Yaml => {
            ensure_yaml_fit(document)?;
            serde_yaml::to_writer(&mut writer, document)
                .map_err(|e| serialization_error(format, e))?;
        }
    }
    writer.flush().map_err(|e| serialization_error(format, e))
}
