//! Header Object: a response or encoding header.

use crate::example::Example;
use crate::reference::ReferenceOr;
use crate::schema::Schema;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A header definition. Follows the structure of a parameter, except the
/// name is given by the containing map and the location is always `header`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Header {
    /// Description of the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the header is mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Declares the header deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// The schema describing the header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ReferenceOr<Schema>>,

    /// A free-form example of the header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Named examples of the header value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub examples: BTreeMap<String, ReferenceOr<Example>>,
}

impl Header {
    /// Create a header with the given value schema.
    pub fn with_schema(schema: impl Into<ReferenceOr<Schema>>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the header is mandatory, defaulting to false.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}
