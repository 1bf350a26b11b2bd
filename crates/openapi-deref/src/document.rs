//! Fully resolved mirrors of operations, path items, callbacks, and the
//! document root.

use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::request::{DereferencedParameter, DereferencedRequestBody};
use crate::response::DereferencedResponse;
use crate::security::DereferencedSecurityRequirement;
use crate::trail::ReferenceTrail;
use openapi_types::{
    Callback, ComponentName, Components, Document, Info, Operation, PathItem,
};
use std::collections::BTreeMap;

/// An operation with its parameters, request body, responses, and security
/// requirements resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedOperation {
    underlying: Operation,

    /// Resolved parameters.
    pub parameters: Vec<DereferencedParameter>,

    /// Resolved request body.
    pub request_body: Option<DereferencedRequestBody>,

    /// Resolved responses, keyed by status code or `default`.
    pub responses: BTreeMap<String, DereferencedResponse>,

    /// Resolved security requirements.
    pub security: Vec<DereferencedSecurityRequirement>,
}

impl DereferencedOperation {
    /// The operation as authored, references intact.
    pub fn underlying(&self) -> &Operation {
        &self.underlying
    }

    /// The operation id.
    pub fn operation_id(&self) -> Option<&str> {
        self.underlying.operation_id.as_deref()
    }

    /// The operation summary.
    pub fn summary(&self) -> Option<&str> {
        self.underlying.summary.as_deref()
    }

    /// Whether the operation is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.underlying.is_deprecated()
    }
}

impl LocallyDereferenceable for Operation {
    type Output = DereferencedOperation;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedOperation {
            parameters: self.parameters.dereferenced_with(components, trail, None)?,
            request_body: self
                .request_body
                .dereferenced_with(components, trail, None)?,
            responses: self.responses.dereferenced_with(components, trail, None)?,
            security: self.security.dereferenced_with(components, trail, None)?,
            underlying: self.clone(),
        })
    }
}

/// A path item with every operation resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedPathItem {
    underlying: PathItem,

    /// Resolved GET operation.
    pub get: Option<DereferencedOperation>,

    /// Resolved PUT operation.
    pub put: Option<DereferencedOperation>,

    /// Resolved POST operation.
    pub post: Option<DereferencedOperation>,

    /// Resolved DELETE operation.
    pub delete: Option<DereferencedOperation>,

    /// Resolved OPTIONS operation.
    pub options: Option<DereferencedOperation>,

    /// Resolved HEAD operation.
    pub head: Option<DereferencedOperation>,

    /// Resolved PATCH operation.
    pub patch: Option<DereferencedOperation>,

    /// Resolved TRACE operation.
    pub trace: Option<DereferencedOperation>,

    /// Resolved parameters shared by every operation on this path.
    pub parameters: Vec<DereferencedParameter>,
}

impl DereferencedPathItem {
    /// The path item as authored, references intact.
    pub fn underlying(&self) -> &PathItem {
        &self.underlying
    }

    /// The path summary.
    pub fn summary(&self) -> Option<&str> {
        self.underlying.summary.as_deref()
    }

    /// Iterate over the resolved operations present on this path.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &DereferencedOperation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
            ("trace", self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.map(|operation| (method, operation)))
    }
}

impl LocallyDereferenceable for PathItem {
    type Output = DereferencedPathItem;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedPathItem {
            get: self.get.dereferenced_with(components, trail, None)?,
            put: self.put.dereferenced_with(components, trail, None)?,
            post: self.post.dereferenced_with(components, trail, None)?,
            delete: self.delete.dereferenced_with(components, trail, None)?,
            options: self.options.dereferenced_with(components, trail, None)?,
            head: self.head.dereferenced_with(components, trail, None)?,
            patch: self.patch.dereferenced_with(components, trail, None)?,
            trace: self.trace.dereferenced_with(components, trail, None)?,
            parameters: self.parameters.dereferenced_with(components, trail, None)?,
            underlying: self.clone(),
        })
    }
}

/// A callback with every path item resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedCallback {
    underlying: Callback,
    component_name: Option<ComponentName>,

    /// Resolved path items, keyed by runtime expression.
    pub path_items: BTreeMap<String, DereferencedPathItem>,
}

impl DereferencedCallback {
    /// The callback as authored, references intact.
    pub fn underlying(&self) -> &Callback {
        &self.underlying
    }

    /// The registry name this callback was resolved from, if referenced.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }
}

impl LocallyDereferenceable for Callback {
    type Output = DereferencedCallback;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedCallback {
            path_items: self
                .expressions()
                .dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}

/// A document with every reference in its paths and security requirements
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedDocument {
    underlying: Document,

    /// Resolved paths.
    pub paths: BTreeMap<String, DereferencedPathItem>,

    /// Resolved document-level security requirements.
    pub security: Vec<DereferencedSecurityRequirement>,
}

impl DereferencedDocument {
    /// The document as authored, references intact.
    pub fn underlying(&self) -> &Document {
        &self.underlying
    }

    /// Metadata about the API.
    pub fn info(&self) -> &Info {
        &self.underlying.info
    }

    /// The description-format version of the document.
    pub fn format_version(&self) -> &str {
        &self.underlying.openapi
    }
}

impl LocallyDereferenceable for Document {
    type Output = DereferencedDocument;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedDocument {
            paths: self.paths.dereferenced_with(components, trail, None)?,
            security: self.security.dereferenced_with(components, trail, None)?,
            underlying: self.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_types::{
        MediaType, Parameter, Reference, RequestBody, Response, Schema,
    };

    fn name(raw: &str) -> ComponentName {
        ComponentName::new(raw).unwrap()
    }

    fn petstore_components() -> Components {
        Components::new()
            .with_schema(name("Pet"), Schema::object().with_property("id", Schema::integer()))
            .with_parameter(
                name("PetId"),
                Parameter::path("petId").with_schema(Schema::integer()),
            )
            .with_response(
                name("PetResponse"),
                Response::new("A pet").with_content(
                    "application/json",
                    MediaType::with_schema(Reference::<Schema>::component(name("Pet"))),
                ),
            )
    }

    #[test]
    fn test_operation_resolves_every_position() {
        let components = petstore_components();
        let operation = Operation::new()
            .with_id("getPetById")
            .with_parameter(Reference::<Parameter>::component(name("PetId")))
            .with_request_body(RequestBody::new().with_content(
                "application/json",
                MediaType::with_schema(Reference::<Schema>::component(name("Pet"))),
            ))
            .with_response("200", Reference::<Response>::component(name("PetResponse")));

        let resolved = operation.dereferenced(&components).unwrap();
        assert_eq!(resolved.operation_id(), Some("getPetById"));
        assert_eq!(resolved.parameters[0].name(), "petId");
        assert_eq!(
            resolved.parameters[0].component_name(),
            Some(&name("PetId"))
        );
        assert!(resolved.request_body.is_some());
        assert_eq!(
            resolved.responses["200"].component_name(),
            Some(&name("PetResponse"))
        );
    }

    #[test]
    fn test_path_item_resolves_operations() {
        let components = petstore_components();
        let path_item = PathItem::new()
            .with_get(
                Operation::new()
                    .with_id("getPetById")
                    .with_response("200", Reference::<Response>::component(name("PetResponse"))),
            )
            .with_parameter(Reference::<Parameter>::component(name("PetId")));

        let resolved = path_item.dereferenced(&components).unwrap();
        let methods: Vec<&str> = resolved.operations().map(|(method, _)| method).collect();
        assert_eq!(methods, vec!["get"]);
        assert_eq!(resolved.parameters[0].name(), "petId");
    }

    #[test]
    fn test_callback_resolves_path_items() {
        let components = petstore_components();
        let callback = Callback::new().with_expression(
            "{$request.body#/callbackUrl}",
            PathItem::new().with_post(
                Operation::new()
                    .with_response("200", Reference::<Response>::component(name("PetResponse"))),
            ),
        );

        let resolved = callback.dereferenced(&components).unwrap();
        assert_eq!(resolved.path_items.len(), 1);
        assert_eq!(resolved.component_name(), None);
    }
}
