//! Document tree: ordered mappings, sequences and scalars
//!
//! Parsed JSON and YAML both land in the same [`Node`] shape. Mapping keys are
//! always strings; YAML scalar keys (`200:`, `true:`) are converted to their
//! textual form on the way in.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::domain::DomainError;

/// Ordered key/value node. Insertion order is emission order.
pub type Mapping = IndexMap<String, Node>;

/// Leaf value. Never modified by a transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// JSON number literal that no native type holds exactly, kept verbatim
    Number(serde_json::Number),
    String(String),
}

impl Scalar {
    /// Integer value of a verbatim number when it fits in 128 bits.
    fn wide_integer(n: &serde_json::Number) -> Option<WideInt> {
        let text = n.to_string();
        text.parse::<i128>()
            .map(WideInt::Signed)
            .or_else(|_| text.parse::<u128>().map(WideInt::Unsigned))
            .ok()
    }

    /// Whether YAML output can carry this value unchanged.
    pub fn fits_yaml(&self) -> bool {
        match self {
            Scalar::Number(n) => Self::wide_integer(n).is_some(),
            _ => true,
        }
    }
}

enum WideInt {
    Signed(i128),
    Unsigned(u128),
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::UInt(u) => serializer.serialize_u64(*u),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Number(n) => match Self::wide_integer(n) {
                Some(WideInt::Signed(i)) => serializer.serialize_i128(i),
                Some(WideInt::Unsigned(u)) => serializer.serialize_u128(u),
                None => n.serialize(serializer),
            },
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// Human readable name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "boolean",
            Node::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => "integer",
            Node::Scalar(Scalar::Float(_)) => "float",
            Node::Scalar(Scalar::Number(_)) => "number",
            Node::Scalar(Scalar::String(_)) => "string",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Path (`$.paths./pets[0]`) of the first NaN or infinite float, if any.
    pub fn find_non_finite(&self) -> Option<String> {
        self.find_scalar("$", &is_non_finite)
    }

    /// Path of the first number YAML output cannot carry exactly, if any.
    pub fn find_yaml_unfit(&self) -> Option<String> {
        self.find_scalar("$", &|scalar: &Scalar| !scalar.fits_yaml())
    }

    fn find_scalar(&self, path: &str, pred: &dyn Fn(&Scalar) -> bool) -> Option<String> {
        match self {
            Node::Mapping(map) => map
                .iter()
                .find_map(|(key, value)| value.find_scalar(&format!("{}.{}", path, key), pred)),
            Node::Sequence(items) => items
                .iter()
                .enumerate()
                .find_map(|(i, item)| item.find_scalar(&format!("{}[{}]", path, i), pred)),
            Node::Scalar(scalar) if pred(scalar) => Some(path.to_string()),
            Node::Scalar(_) => None,
        }
    }
}

fn is_non_finite(scalar: &Scalar) -> bool {
    matches!(scalar, Scalar::Float(f) if !f.is_finite())
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(json_number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Native scalar for a JSON number, or the verbatim literal when a native
/// type would change its value.
fn json_number(n: serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        return Scalar::Int(i);
    }
    if let Some(u) = n.as_u64() {
        return Scalar::UInt(u);
    }
    let text = n.to_string();
    if text.contains(['.', 'e', 'E']) {
        let exact = n
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| serde_json::Number::from_f64(f).map(|shortest| (f, shortest)))
            .filter(|(_, shortest)| decimal_parts(&shortest.to_string()) == decimal_parts(&text));
        if let Some((f, _)) = exact {
            return Scalar::Float(f);
        }
    }
    Scalar::Number(n)
}

/// Sign, significant digits and power of ten of a JSON number literal.
///
/// `1.50`, `15e-1` and `0.15E1` all give `(false, "15", -1)`.
fn decimal_parts(text: &str) -> (bool, String, i64) {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.trim_start_matches('+').parse::<i64>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits = format!("{}{}", int_part, frac_part);
    let digits = digits.trim_start_matches('0');
    let significant = digits.trim_end_matches('0');
    if significant.is_empty() {
        return (false, String::new(), 0);
    }
    let trailing = (digits.len() - significant.len()) as i64;
    let power = exponent - frac_part.len() as i64 + trailing;
    (negative, significant.to_string(), power)
}

impl TryFrom<serde_yaml::Value> for Node {
    type Error = DomainError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(yaml_number(&n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Node::Sequence(
                items
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(yaml_key(key)?, Node::try_from(value)?);
                }
                Node::Mapping(out)
            }
            // Tags carry no meaning for OpenAPI, keep the tagged value.
            Value::Tagged(tagged) => Node::try_from(tagged.value)?,
        })
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null)
    }
}

/// Textual form of a YAML mapping key, matching what a JSON encoder emits.
fn yaml_key(key: serde_yaml::Value) -> Result<String, DomainError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        Value::Sequence(_) => Err(DomainError::UnsupportedKey { kind: "sequence" }),
        Value::Mapping(_) => Err(DomainError::UnsupportedKey { kind: "mapping" }),
    }
}

/// A parsed OpenAPI document. The root is always a mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    /// See [`Node::find_non_finite`].
    pub fn find_non_finite(&self) -> Option<String> {
        self.find_scalar(&is_non_finite)
    }

    /// See [`Node::find_yaml_unfit`].
    pub fn find_yaml_unfit(&self) -> Option<String> {
        self.find_scalar(&|scalar: &Scalar| !scalar.fits_yaml())
    }

    fn find_scalar(&self, pred: &dyn Fn(&Scalar) -> bool) -> Option<String> {
        self.root
            .iter()
            .find_map(|(key, value)| value.find_scalar(&format!("$.{}", key), pred))
    }
}

impl TryFrom<Node> for Document {
    type Error = DomainError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Mapping(root) => Ok(Document::new(root)),
            other => Err(DomainError::NotAMapping {
                found: other.kind(),
            }),
        }
    }
}
