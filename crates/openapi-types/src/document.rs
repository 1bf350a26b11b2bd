//! The root object of an API description document.

use crate::components::Components;
use crate::path_item::PathItem;
use crate::security::SecurityRequirement;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The root of an API description document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// The version of the description format this document uses.
    pub openapi: String,

    /// Metadata about the API.
    pub info: Info,

    /// The available paths and their operations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub paths: BTreeMap<String, PathItem>,

    /// Reusable objects referenced from the rest of the document.
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    #[builder(default)]
    pub components: Components,

    /// Security mechanisms applied to every operation unless overridden.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub security: Vec<SecurityRequirement>,
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Info {
    /// The title of the API.
    pub title: String,

    /// The version of the API being described. Distinct from the version of
    /// the description format.
    pub version: String,

    /// A description of the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    /// Create metadata with the given title and API version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }
}

impl Document {
    /// Create a document with the current description-format version.
    pub fn new(info: Info) -> Self {
        Self {
            openapi: crate::version::CURRENT.to_string(),
            info,
            paths: BTreeMap::new(),
            components: Components::new(),
            security: Vec::new(),
        }
    }

    /// Add a path item.
    pub fn with_path(mut self, path: impl Into<String>, path_item: PathItem) -> Self {
        self.paths.insert(path.into(), path_item);
        self
    }

    /// Set the components section.
    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use crate::response::Response;

    #[test]
    fn test_document_creation() {
        let document = Document::new(Info::new("Petstore", "1.0.0")).with_path(
            "/pets",
            PathItem::new().with_get(
                Operation::new()
                    .with_id("listPets")
                    .with_response("200", Response::new("A list of pets")),
            ),
        );

        assert_eq!(document.openapi, crate::version::CURRENT);
        assert_eq!(document.paths.len(), 1);
        assert!(document.components.is_empty());
    }

    #[test]
    fn test_document_serialization() {
        let document = Document::new(Info::new("Petstore", "1.0.0"));
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["openapi"], crate::version::CURRENT);
        assert_eq!(json["info"]["title"], "Petstore");
        assert!(json.get("paths").is_none());

        let decoded: Document = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, document);
    }
}
