//! Fully resolved mirrors of parameters and request bodies.

use crate::content::DereferencedContent;
use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::schema::DereferencedSchema;
use crate::trail::ReferenceTrail;
use openapi_types::{
    ComponentName, Components, Example, Parameter, ParameterLocation, RequestBody,
};
use std::collections::BTreeMap;

/// A parameter with its schema and examples resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedParameter {
    underlying: Parameter,
    component_name: Option<ComponentName>,

    /// Resolved value schema.
    pub schema: Option<DereferencedSchema>,

    /// Resolved named examples.
    pub examples: BTreeMap<String, Example>,
}

impl DereferencedParameter {
    /// The parameter as authored, references intact.
    pub fn underlying(&self) -> &Parameter {
        &self.underlying
    }

    /// The registry name this parameter was resolved from, if referenced.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.underlying.name
    }

    /// Where the parameter appears.
    pub fn location(&self) -> ParameterLocation {
        self.underlying.location
    }

    /// Whether the parameter is mandatory.
    pub fn is_required(&self) -> bool {
        self.underlying.is_required()
    }
}

impl LocallyDereferenceable for Parameter {
    type Output = DereferencedParameter;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedParameter {
            schema: self.schema.dereferenced_with(components, trail, None)?,
            examples: self.examples.dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}

/// A request body with its content resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedRequestBody {
    underlying: RequestBody,
    component_name: Option<ComponentName>,

    /// Resolved content per media range.
    pub content: DereferencedContent,
}

impl DereferencedRequestBody {
    /// The request body as authored, references intact.
    pub fn underlying(&self) -> &RequestBody {
        &self.underlying
    }

    /// The registry name this body was resolved from, if referenced.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }

    /// The body description.
    pub fn description(&self) -> Option<&str> {
        self.underlying.description.as_deref()
    }

    /// Whether the body is mandatory.
    pub fn is_required(&self) -> bool {
        self.underlying.is_required()
    }
}

impl LocallyDereferenceable for RequestBody {
    type Output = DereferencedRequestBody;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedRequestBody {
            content: self.content.dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}
