//! Parsed category documents.
//!
//! A category file is a JSON object whose keys name destination directories.
//! Parsing goes through `serde_json` (with `preserve_order`, so keys keep
//! their document order) and is then lowered into [`CategoryNode`], a sum
//! type the interpreter matches on exhaustively.
use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Reserved key whose value names icon destinations instead of a category.
pub const ICON_KEY: &str = "Icon";

/// One node of a category document.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryNode {
    /// Ordered mapping of keys to child nodes.
    Object(Vec<(String, CategoryNode)>),
    /// Ordered sequence of nodes.
    Array(Vec<CategoryNode>),
    /// A string leaf.
    String(String),
    /// A number leaf, kept in its JSON rendering (`1999`, `2.5`).
    Number(String),
    /// A boolean leaf.
    Boolean(bool),
    /// JSON `null`; never valid, kept so the error surfaces at its position.
    Null,
}

impl CategoryNode {
    /// Human-readable name of this node's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// The text a scalar contributes as a path segment, if it is one.
    #[must_use]
    pub fn as_segment(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Number(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for CategoryNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
            Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n.to_string()),
            Value::Bool(b) => Self::Boolean(b),
            Value::Null => Self::Null,
        }
    }
}

/// A whole category file: an ordered list of top-level entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDocument {
    entries: Vec<(String, CategoryNode)>,
}

impl CategoryDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] for malformed JSON (reported against
    /// `origin`) and [`DocumentError::NotAnObject`] when the top level is not
    /// an object.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text).map_err(|source| DocumentError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
        match CategoryNode::from(value) {
            CategoryNode::Object(entries) => Ok(Self { entries }),
            other => Err(DocumentError::NotAnObject { found: other.kind() }),
        }
    }

    /// Read and parse the category file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read, or any
    /// error from [`CategoryDocument::parse`].
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Top-level entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[(String, CategoryNode)] {
        &self.entries
    }
}
