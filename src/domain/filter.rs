//! Field stripping: descriptions and vendor extensions
//!
//! Both passes walk the whole tree and drop mapping entries by key. They
//! never fail, never reorder surviving keys and never touch scalars.

use crate::domain::node::{Document, Mapping, Node};

/// Key removed by the description pass.
pub const DESCRIPTION_KEY: &str = "description";

/// Prefix reserved by OpenAPI for vendor extensions.
pub const EXTENSION_PREFIX: &str = "x-";

/// Class of mapping keys that can be stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// Keys equal to `description`
    Description,
    /// Keys starting with `x-` (including bare `x-`)
    Extension,
}

impl FieldClass {
    pub fn matches(self, key: &str) -> bool {
        match self {
            FieldClass::Description => key == DESCRIPTION_KEY,
            FieldClass::Extension => key.starts_with(EXTENSION_PREFIX),
        }
    }
}

/// Set of field classes stripped in a single traversal.
///
/// An empty filter is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFilter {
    descriptions: bool,
    extensions: bool,
}

impl FieldFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field class to the filter.
    pub fn with(mut self, class: FieldClass) -> Self {
        match class {
            FieldClass::Description => self.descriptions = true,
            FieldClass::Extension => self.extensions = true,
        }
        self
    }

    /// Add `class` only when `enabled`.
    pub fn with_if(self, class: FieldClass, enabled: bool) -> Self {
        if enabled {
            self.with(class)
        } else {
            self
        }
    }

    pub fn contains(&self, class: FieldClass) -> bool {
        match class {
            FieldClass::Description => self.descriptions,
            FieldClass::Extension => self.extensions,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.descriptions && !self.extensions
    }

    /// True if an entry with this key is dropped.
    pub fn strips(&self, key: &str) -> bool {
        (self.descriptions && FieldClass::Description.matches(key))
            || (self.extensions && FieldClass::Extension.matches(key))
    }

    /// Return a copy of `node` with all matching entries removed at every depth.
    pub fn apply(&self, node: &Node) -> Node {
        match node {
            Node::Mapping(map) => Node::Mapping(self.apply_mapping(map)),
            Node::Sequence(items) => Node::Sequence(items.iter().map(|n| self.apply(n)).collect()),
            Node::Scalar(_) => node.clone(),
        }
    }

    pub fn apply_document(&self, document: &Document) -> Document {
        Document::new(self.apply_mapping(document.root()))
    }

    fn apply_mapping(&self, map: &Mapping) -> Mapping {
        map.iter()
            .filter(|(key, _)| !self.strips(key))
            .map(|(key, value)| (key.clone(), self.apply(value)))
            .collect()
    }
}

/// Remove every `description` entry, at any depth.
pub fn remove_descriptions(node: &Node) -> Node {
    FieldFilter::new().with(FieldClass::Description).apply(node)
}

/// Remove every entry whose key starts with `x-`, at any depth.
pub fn remove_extensions(node: &Node) -> Node {
    FieldFilter::new().with(FieldClass::Extension).apply(node)
}
