//! Operation Object: a single API operation on a path.

use crate::parameter::Parameter;
use crate::reference::ReferenceOr;
use crate::request_body::RequestBody;
use crate::response::Response;
use crate::security::SecurityRequirement;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single API operation.
///
/// Responses are keyed by status code string or `default`; each value can be
/// written inline or point at a reusable Response Object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Operation {
    /// Tags for API documentation control.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub tags: Vec<String>,

    /// A short summary of what the operation does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// A verbose explanation of the operation behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unique string used to identify the operation.
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Parameters applicable to this operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,

    /// The request body applicable to this operation.
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<ReferenceOr<RequestBody>>,

    /// The possible responses, keyed by status code or `default`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub responses: BTreeMap<String, ReferenceOr<Response>>,

    /// Declares this operation deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Security mechanisms that can authorize this operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub security: Vec<SecurityRequirement>,
}

impl Operation {
    /// Create an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation id.
    pub fn with_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, parameter: impl Into<ReferenceOr<Parameter>>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    /// Set the request body.
    pub fn with_request_body(mut self, body: impl Into<ReferenceOr<RequestBody>>) -> Self {
        self.request_body = Some(body.into());
        self
    }

    /// Add a response under the given status code key.
    pub fn with_response(
        mut self,
        status: impl Into<String>,
        response: impl Into<ReferenceOr<Response>>,
    ) -> Self {
        self.responses.insert(status.into(), response.into());
        self
    }

    /// Require a security scheme for this operation.
    pub fn with_security(mut self, requirement: SecurityRequirement) -> Self {
        self.security.push(requirement);
        self
    }

    /// Whether this operation is deprecated, defaulting to false.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;
    use crate::schema::Schema;

    #[test]
    fn test_operation_creation() {
        let operation = Operation::new()
            .with_id("listPets")
            .with_parameter(Parameter::query("limit").with_schema(Schema::integer()))
            .with_response("200", Response::new("A list of pets"));

        assert_eq!(operation.operation_id.as_deref(), Some("listPets"));
        assert_eq!(operation.parameters.len(), 1);
        assert!(operation.responses.contains_key("200"));
        assert!(!operation.is_deprecated());
    }

    #[test]
    fn test_operation_serialization() {
        let operation = Operation::new()
            .with_id("getPetById")
            .with_parameter(Reference::<Parameter>::component_named("PetId").unwrap())
            .with_response(
                "200",
                Reference::<Response>::component_named("PetResponse").unwrap(),
            )
            .with_response("default", Response::new("unexpected error"));

        let json = serde_json::to_value(&operation).unwrap();
        assert_eq!(json["operationId"], "getPetById");
        assert_eq!(
            json["parameters"][0]["$ref"],
            "#/components/parameters/PetId"
        );
        assert_eq!(
            json["responses"]["200"]["$ref"],
            "#/components/responses/PetResponse"
        );

        let decoded: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, operation);
    }
}
