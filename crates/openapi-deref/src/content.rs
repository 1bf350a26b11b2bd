//! Fully resolved mirrors of media types and headers.

use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::schema::DereferencedSchema;
use crate::trail::ReferenceTrail;
use openapi_types::{ComponentName, Components, Example, Header, MediaType};
use serde_json::Value;
use std::collections::BTreeMap;

/// Resolved content: media ranges mapped to fully resolved media types.
pub type DereferencedContent = BTreeMap<String, DereferencedMediaType>;

/// A media type with its schema and examples resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedMediaType {
    underlying: MediaType,

    /// Resolved payload schema.
    pub schema: Option<DereferencedSchema>,

    /// Resolved named examples.
    pub examples: BTreeMap<String, Example>,
}

impl DereferencedMediaType {
    /// The media type as authored, references intact.
    pub fn underlying(&self) -> &MediaType {
        &self.underlying
    }

    /// The free-form example value.
    pub fn example(&self) -> Option<&Value> {
        self.underlying.example.as_ref()
    }
}

impl LocallyDereferenceable for MediaType {
    type Output = DereferencedMediaType;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedMediaType {
            schema: self.schema.dereferenced_with(components, trail, None)?,
            examples: self.examples.dereferenced_with(components, trail, None)?,
            underlying: self.clone(),
        })
    }
}

/// A header with its schema and examples resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedHeader {
    underlying: Header,
    component_name: Option<ComponentName>,

    /// Resolved value schema.
    pub schema: Option<DereferencedSchema>,

    /// Resolved named examples.
    pub examples: BTreeMap<String, Example>,
}

impl DereferencedHeader {
    /// The header as authored, references intact.
    pub fn underlying(&self) -> &Header {
        &self.underlying
    }

    /// The registry name this header was resolved from, if referenced.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }

    /// The header description.
    pub fn description(&self) -> Option<&str> {
        self.underlying.description.as_deref()
    }

    /// Whether the header is mandatory.
    pub fn is_required(&self) -> bool {
        self.underlying.is_required()
    }
}

impl LocallyDereferenceable for Header {
    type Output = DereferencedHeader;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedHeader {
            schema: self.schema.dereferenced_with(components, trail, None)?,
            examples: self.examples.dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}
