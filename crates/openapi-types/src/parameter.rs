//! Parameter Object: a single operation parameter.

use crate::example::Example;
use crate::reference::ReferenceOr;
use crate::schema::Schema;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single operation parameter, uniquely identified by its name and
/// location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    /// The parameter name, case sensitive.
    pub name: String,

    /// Where the parameter appears.
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Description of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the parameter is mandatory. Path parameters are always
    /// mandatory regardless of this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Declares the parameter deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// The schema describing the parameter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ReferenceOr<Schema>>,

    /// A free-form example of the parameter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Named examples of the parameter value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub examples: BTreeMap<String, ReferenceOr<Example>>,
}

/// The possible locations of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl Parameter {
    /// Create a parameter with the given name and location.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: None,
            deprecated: None,
            schema: None,
            example: None,
            examples: BTreeMap::new(),
        }
    }

    /// Create a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Create a path parameter. Path parameters are always required.
    pub fn path(name: impl Into<String>) -> Self {
        let mut parameter = Self::new(name, ParameterLocation::Path);
        parameter.required = Some(true);
        parameter
    }

    /// Set the value schema.
    pub fn with_schema(mut self, schema: impl Into<ReferenceOr<Schema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the parameter as mandatory.
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Whether the parameter is mandatory. Path parameters always are.
    pub fn is_required(&self) -> bool {
        self.location == ParameterLocation::Path || self.required.unwrap_or(false)
    }
}
