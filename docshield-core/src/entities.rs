//! Document entity structures

use serde::{Deserialize, Serialize};

/// A stored document.
///
/// `level1` is an ordered sequence; its order is meaningful only after
/// sanitization, which ranks items by `sort` descending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub level1: Vec<Level1Item>,
}

/// First-level item of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Level1Item {
    /// Ranking key. Higher values come first after sanitization.
    #[serde(default)]
    pub sort: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub level2: Vec<Level2Item>,
}

/// Second-level item, a code/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Level2Item {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl Document {
    /// Create a document with the given id and title and no items.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a first-level item.
    pub fn with_item(mut self, item: Level1Item) -> Self {
        self.level1.push(item);
        self
    }
}

impl Level1Item {
    pub fn new(sort: i64, name: impl Into<String>) -> Self {
        Self {
            sort,
            name: name.into(),
            level2: Vec::new(),
        }
    }

    /// Append a second-level item.
    pub fn with_entry(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.level2.push(Level2Item::new(code, value));
        self
    }
}

impl Level2Item {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}
