//! Schema Object: the definition of an input or output data type.
//!
//! Anywhere a Schema Object can be used, a Reference Object can be used in
//! its place, including inside another schema's properties, items, and
//! composition keywords.

use crate::reference::ReferenceOr;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The definition of an input or output data type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Short title for the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Explanation of the schema's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The primitive type of the value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Further refinement of the type, such as `int64` or `date-time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Whether `null` is a valid value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Declares the value read-only: relevant in responses, not requests.
    #[serde(rename = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    /// Declares the value write-only: relevant in requests, not responses.
    #[serde(rename = "writeOnly", skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    /// The closed set of allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Default value used when the instance is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// A free-form example of an instance of this schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Numeric multiple-of validation.
    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,

    /// Inclusive upper bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    /// Inclusive lower bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Maximum string length.
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    /// Minimum string length.
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    /// Regular expression pattern for string values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Maximum array length.
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    /// Minimum array length.
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    /// Whether array items must be unique.
    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    /// Property names that must be present on object instances.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub required: Vec<String>,

    /// Named properties of an object instance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub properties: BTreeMap<String, ReferenceOr<Schema>>,

    /// Schema applied to properties not listed in `properties`.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<ReferenceOr<Schema>>>,

    /// Schema applied to each array item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ReferenceOr<Schema>>>,

    /// The instance must validate against all of these schemas.
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub all_of: Vec<ReferenceOr<Schema>>,

    /// The instance must validate against at least one of these schemas.
    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub any_of: Vec<ReferenceOr<Schema>>,

    /// The instance must validate against exactly one of these schemas.
    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub one_of: Vec<ReferenceOr<Schema>>,

    /// The instance must not validate against this schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<ReferenceOr<Schema>>>,
}

/// The primitive type of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    Object,
    Array,
    Number,
    String,
    Integer,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema of the given primitive type.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Create an object schema.
    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// Create a string schema.
    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    /// Create an integer schema.
    pub fn integer() -> Self {
        Self::of_type(SchemaType::Integer)
    }

    /// Create a number schema.
    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    /// Create a boolean schema.
    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    /// Create an array schema with the given item schema.
    pub fn array(items: impl Into<ReferenceOr<Schema>>) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items.into())),
            ..Self::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a named property.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        property: impl Into<ReferenceOr<Schema>>,
    ) -> Self {
        self.properties.insert(name.into(), property.into());
        self
    }

    /// Mark a property name as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Allow `null` as a value.
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }
}
