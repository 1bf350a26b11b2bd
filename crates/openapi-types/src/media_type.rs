//! Media Type Object: the shape of a request or response body for one
//! media range.

use crate::example::Example;
use crate::reference::ReferenceOr;
use crate::schema::Schema;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A map from media range (such as `application/json`) to the shape of the
/// payload transferred with that media type.
pub type Content = BTreeMap<String, MediaType>;

/// The schema and examples for a single media range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct MediaType {
    /// The schema describing the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ReferenceOr<Schema>>,

    /// A free-form example of the payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Named examples of the payload.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub examples: BTreeMap<String, ReferenceOr<Example>>,
}

impl MediaType {
    /// Create a media type with the given payload schema.
    pub fn with_schema(schema: impl Into<ReferenceOr<Schema>>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Self::default()
        }
    }

    /// Add a named example.
    pub fn with_example(
        mut self,
        name: impl Into<String>,
        example: impl Into<ReferenceOr<Example>>,
    ) -> Self {
        self.examples.insert(name.into(), example.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    #[test]
    fn test_media_type_serialization() {
        let media_type =
            MediaType::with_schema(Reference::<Schema>::component_named("Pet").unwrap());
        let json = serde_json::to_value(&media_type).unwrap();
        assert_eq!(json["schema"]["$ref"], "#/components/schemas/Pet");

        let decoded: MediaType = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, media_type);
    }
}
