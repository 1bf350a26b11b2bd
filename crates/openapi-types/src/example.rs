//! Example Object: a sample value for a schema, parameter, or media type.

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A sample value, documented and reusable.
///
/// The `value` and `external_value` fields are mutually exclusive; an example
/// too large or too binary to embed is referenced by location instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Example {
    /// Short description for the example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description for the example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The embedded literal example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// A URI pointing at the example value.
    #[serde(rename = "externalValue", skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl Example {
    /// Create an empty example.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an example with an embedded value.
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
