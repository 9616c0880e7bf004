use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a column or a row.
///
/// Columns without an explicit `colKey` are identified by their index among
/// their siblings. Row ids come from the row record (string or integer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Positional key for a column without `colKey`.
    pub fn position(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }

    /// Read a key out of a JSON value (strings and integers only).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Name(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(Self::Index),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Index(i)
    }
}

/// Edge a column is frozen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedEdge {
    Left,
    Right,
}

/// One header cell of the column tree.
///
/// Multi-level headers nest columns through `children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<FixedEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Column>,
}

impl Column {
    /// A plain column with a key
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            col_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Freeze this column to the given edge
    #[must_use]
    pub fn fixed(mut self, edge: FixedEdge) -> Self {
        self.fixed = Some(edge);
        self
    }

    /// Attach child columns (multi-level header)
    #[must_use]
    pub fn with_children(mut self, children: Vec<Column>) -> Self {
        self.children = children;
        self
    }

    /// Key used for position lookups: `colKey`, or the sibling index.
    pub fn key_or(&self, index: usize) -> Key {
        self.col_key.clone().unwrap_or_else(|| Key::position(index))
    }

    pub fn is_fixed(&self, edge: FixedEdge) -> bool {
        self.fixed == Some(edge)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_key_deserializes_untagged() {
        let keys: Vec<Key> = serde_json::from_str(r#"[3, "name"]"#).unwrap();
        assert_eq!(keys, vec![Key::Index(3), Key::Name("name".to_string())]);
    }

    #[test]
    fn test_key_from_json_rejects_objects() {
        assert_eq!(Key::from_json(&serde_json::json!({"a": 1})), None);
        assert_eq!(Key::from_json(&serde_json::json!(1.5)), None);
        assert_eq!(Key::from_json(&serde_json::json!(7)), Some(Key::Index(7)));
    }

    #[test]
    fn test_column_json_shape() {
        let col: Column = serde_json::from_str(
            r#"{"colKey":"g","fixed":"left","children":[{"colKey":"a"},{"title":"B"}]}"#,
        )
        .unwrap();
        assert!(col.is_fixed(FixedEdge::Left));
        assert_eq!(col.children.len(), 2);
        assert_eq!(col.children[1].key_or(1), Key::Index(1));
    }
}
