//! Document loading with JSON/YAML auto-detection
//!
//! Strict JSON is tried first so that valid JSON never goes through YAML's
//! looser scalar resolution. Anything else is parsed as YAML.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Document, Node};

/// Source format a document was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

/// Parse raw text into a mapping-rooted document.
///
/// # Errors
///
/// `InvalidDocument` if the text is neither JSON nor YAML, if a YAML mapping
/// uses a sequence or mapping as key, or if the root is not a mapping.
pub fn parse_document(content: &str) -> ApplicationResult<Document> {
    parse_document_with_format(content).map(|(document, _)| document)
}

/// Like [`parse_document`], also reporting which parser accepted the text.
#[instrument(level = "trace", skip_all)]
pub fn parse_document_with_format(content: &str) -> ApplicationResult<(Document, SourceFormat)> {
    let (node, format) = match parse_json(content) {
        Ok(node) => (node, SourceFormat::Json),
        Err(json_err) => {
            debug!("not JSON ({}), trying YAML", json_err);
            let node = parse_yaml(content).map_err(|e| {
                ApplicationError::invalid_document(format!(
                    "{} (JSON parse also failed: {})",
                    e, json_err
                ))
            })?;
            (node, SourceFormat::Yaml)
        }
    };
    debug!("parsed document as {:?}", format);

    let document =
        Document::try_from(node).map_err(|e| ApplicationError::invalid_document(e.to_string()))?;
    Ok((document, format))
}

/// Nesting depth is unbounded; the stack grows on the heap as needed.
fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(Node::from(value))
}

fn parse_yaml(content: &str) -> Result<Node, String> {
    let mut value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {}", e))?;
    value
        .apply_merge()
        .map_err(|e| format!("invalid YAML merge key: {}", e))?;
    Node::try_from(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_is_detected() {
        let (doc, format) =
            parse_document_with_format(r#"{"openapi": "3.0.0", "info": {"title": "T"}}"#).unwrap();
        assert_eq!(format, SourceFormat::Json);
        assert!(doc.get("info").is_some());
    }

    #[test]
    fn test_yaml_is_detected() {
        let (doc, format) =
            parse_document_with_format("openapi: 3.0.0\ninfo:\n  title: T\n").unwrap();
        assert_eq!(format, SourceFormat::Yaml);
        assert!(doc.get("openapi").is_some());
    }

    #[test]
    fn test_scalar_root_is_invalid() {
        let err = parse_document("just a string").unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidDocument { .. }));
        assert!(err.to_string().contains("mapping"), "{}", err);
    }

    #[test]
    fn test_json_nested_beyond_default_recursion_limit() {
        let depth = 300;
        let text = format!("{}1{}", r#"{"a":"#.repeat(depth), "}".repeat(depth));

        let (doc, format) = parse_document_with_format(&text).unwrap();

        assert_eq!(format, SourceFormat::Json);
        let mut node = doc.get("a");
        for _ in 1..depth {
            node = node.and_then(|n| n.get("a"));
        }
        assert_eq!(node, Some(&Node::Scalar(crate::domain::Scalar::Int(1))));
    }

    #[test]
    fn test_trailing_garbage_after_json_is_not_json() {
        let err = parse_document(r#"{"a": 1} {"b": 2}"#).unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidDocument { .. }));
    }

    #[test]
    fn test_broken_input_carries_parser_message() {
        let err = parse_document("key: [unclosed").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid document:"), "{}", msg);
        assert!(msg.contains("invalid YAML"), "{}", msg);
        assert!(msg.contains("JSON parse also failed"), "{}", msg);
    }
}
