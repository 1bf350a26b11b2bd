//! Fully resolved mirror of a response.

use crate::content::{DereferencedContent, DereferencedHeader};
use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::trail::ReferenceTrail;
use openapi_types::{ComponentName, Components, Link, Response};
use std::collections::BTreeMap;

/// A response with its headers, content, and links resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedResponse {
    underlying: Response,
    component_name: Option<ComponentName>,

    /// Resolved headers, keyed by header name.
    pub headers: BTreeMap<String, DereferencedHeader>,

    /// Resolved content per media range.
    pub content: DereferencedContent,

    /// Resolved follow-up links.
    pub links: BTreeMap<String, Link>,
}

impl DereferencedResponse {
    /// The response as authored, references intact.
    pub fn underlying(&self) -> &Response {
        &self.underlying
    }

    /// The registry name this response was resolved from, if referenced.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }

    /// The response description.
    pub fn description(&self) -> &str {
        &self.underlying.description
    }
}

impl LocallyDereferenceable for Response {
    type Output = DereferencedResponse;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedResponse {
            headers: self.headers.dereferenced_with(components, trail, None)?,
            content: self.content.dereferenced_with(components, trail, None)?,
            links: self.links.dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}
