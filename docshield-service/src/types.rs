//! Request bodies accepted by the boundary facade.

use docshield_core::{new_document_id, Document, Level1Item, Level2Item};
use serde::{Deserialize, Serialize};

/// Body of a create request. Carries no id; one is assigned on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level1: Vec<Level1ItemRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level1ItemRequest {
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level2: Vec<Level2ItemRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level2ItemRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub value: String,
}

impl DocumentRequest {
    /// Convert into a [`Document`] with a freshly generated id.
    pub fn into_document(self) -> Document {
        Document {
            id: new_document_id(),
            title: self.title,
            description: self.description,
            level1: self.level1.into_iter().map(Level1Item::from).collect(),
        }
    }
}

impl From<Level1ItemRequest> for Level1Item {
    fn from(req: Level1ItemRequest) -> Self {
        Level1Item {
            sort: req.sort,
            name: req.name,
            level2: req.level2.into_iter().map(Level2Item::from).collect(),
        }
    }
}

impl From<Level2ItemRequest> for Level2Item {
    fn from(req: Level2ItemRequest) -> Self {
        Level2Item {
            code: req.code,
            value: req.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_json() {
        let body = r#"{
            "title": "Report",
            "description": "internal",
            "level1": [
                {"sort": 2, "name": "first", "level2": [{"code": "A", "value": "x"}]},
                {"sort": 7}
            ]
        }"#;
        let req: DocumentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.title, "Report");
        assert_eq!(req.level1.len(), 2);
        assert_eq!(req.level1[1].name, "");
        assert!(req.level1[1].level2.is_empty());
    }

    #[test]
    fn test_into_document_assigns_new_id() {
        let req = DocumentRequest {
            title: "t".into(),
            description: "d".into(),
            level1: vec![Level1ItemRequest {
                sort: 1,
                name: "n".into(),
                level2: vec![Level2ItemRequest {
                    code: "C".into(),
                    value: "v".into(),
                }],
            }],
        };

        let a = req.clone().into_document();
        let b = req.into_document();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());

        assert_eq!(a.title, "t");
        assert_eq!(a.description, "d");
        assert_eq!(a.level1[0].name, "n");
        assert_eq!(a.level1[0].level2[0], Level2Item::new("C", "v"));
    }
}
