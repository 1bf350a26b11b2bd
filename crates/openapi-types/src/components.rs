//! The components section: categorized storage for named, reusable objects.
//!
//! All objects defined within the components section have no effect on the
//! API unless they are explicitly referenced from properties outside it.
//! Entries may themselves be references, which is how reference chains
//! (`A` pointing at `B`) are represented.

use crate::callback::Callback;
use crate::error::{LookupError, MergeConflict};
use crate::example::Example;
use crate::header::Header;
use crate::link::Link;
use crate::parameter::Parameter;
use crate::reference::{ComponentCategory, ComponentName, InternalReference, Reference, ReferenceOr};
use crate::request_body::RequestBody;
use crate::response::Response;
use crate::schema::Schema;
use crate::security::SecurityScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node kind that can be stored in, and referenced out of, the components
/// section. Ties each kind to its category and its map inside [`Components`].
pub trait ComponentValue: Sized {
    /// The category this kind is stored under.
    const CATEGORY: ComponentCategory;

    /// The map holding this kind's entries.
    fn registry(components: &Components) -> &BTreeMap<ComponentName, ReferenceOr<Self>>;

    /// Mutable access to the map holding this kind's entries.
    fn registry_mut(components: &mut Components) -> &mut BTreeMap<ComponentName, ReferenceOr<Self>>;
}

/// Holds a set of reusable objects, one ordered map per category.
///
/// Names are unique per category by construction (map keys). Two registries
/// can be [`merge`](Components::merge)d; overlapping keys are only tolerated
/// when both sides store structurally identical values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Components {
    /// Reusable Schema Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<ComponentName, ReferenceOr<Schema>>,

    /// Reusable Response Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<ComponentName, ReferenceOr<Response>>,

    /// Reusable Parameter Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<ComponentName, ReferenceOr<Parameter>>,

    /// Reusable Example Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<ComponentName, ReferenceOr<Example>>,

    /// Reusable Request Body Objects.
    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub request_bodies: BTreeMap<ComponentName, ReferenceOr<RequestBody>>,

    /// Reusable Header Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<ComponentName, ReferenceOr<Header>>,

    /// Reusable Security Scheme Objects.
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub security_schemes: BTreeMap<ComponentName, ReferenceOr<SecurityScheme>>,

    /// Reusable Link Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<ComponentName, ReferenceOr<Link>>,

    /// Reusable Callback Objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub callbacks: BTreeMap<ComponentName, ReferenceOr<Callback>>,
}

macro_rules! impl_component_value {
    ($type:ty, $category:expr, $field:ident) => {
        impl ComponentValue for $type {
            const CATEGORY: ComponentCategory = $category;

            fn registry(
                components: &Components,
            ) -> &BTreeMap<ComponentName, ReferenceOr<Self>> {
                &components.$field
            }

            fn registry_mut(
                components: &mut Components,
            ) -> &mut BTreeMap<ComponentName, ReferenceOr<Self>> {
                &mut components.$field
            }
        }
    };
}

impl_component_value!(Schema, ComponentCategory::Schemas, schemas);
impl_component_value!(Response, ComponentCategory::Responses, responses);
impl_component_value!(Parameter, ComponentCategory::Parameters, parameters);
impl_component_value!(Example, ComponentCategory::Examples, examples);
impl_component_value!(RequestBody, ComponentCategory::RequestBodies, request_bodies);
impl_component_value!(Header, ComponentCategory::Headers, headers);
impl_component_value!(SecurityScheme, ComponentCategory::SecuritySchemes, security_schemes);
impl_component_value!(Link, ComponentCategory::Links, links);
impl_component_value!(Callback, ComponentCategory::Callbacks, callbacks);

impl Components {
    /// Create an empty components section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every category map is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.examples.is_empty()
            && self.request_bodies.is_empty()
            && self.headers.is_empty()
            && self.security_schemes.is_empty()
            && self.links.is_empty()
            && self.callbacks.is_empty()
    }

    /// Total number of entries across every category.
    pub fn entry_count(&self) -> usize {
        self.schemas.len()
            + self.responses.len()
            + self.parameters.len()
            + self.examples.len()
            + self.request_bodies.len()
            + self.headers.len()
            + self.security_schemes.len()
            + self.links.len()
            + self.callbacks.len()
    }

    /// Resolve a typed reference against this registry.
    ///
    /// Internal references index the matching category map by name. External
    /// references cannot be resolved by a registry alone and always fail
    /// with [`LookupError::CannotResolveRemote`]; they must be routed through
    /// an external dereferencing pass first.
    pub fn lookup<T: ComponentValue>(
        &self,
        reference: &Reference<T>,
    ) -> Result<&ReferenceOr<T>, LookupError> {
        match reference {
            Reference::Internal(internal) => self.lookup_internal(internal),
            Reference::External(_) => Err(LookupError::CannotResolveRemote {
                reference: reference.to_string(),
            }),
        }
    }

    /// Resolve an internal reference against this registry.
    pub fn lookup_internal<T: ComponentValue>(
        &self,
        reference: &InternalReference<T>,
    ) -> Result<&ReferenceOr<T>, LookupError> {
        T::registry(self)
            .get(reference.name())
            .ok_or_else(|| LookupError::NotFound {
                category: T::CATEGORY,
                name: reference.name().clone(),
            })
    }

    /// Fold another registry into this one.
    ///
    /// Entries present on both sides must be structurally identical;
    /// otherwise the merge fails with a [`MergeConflict`] naming the first
    /// conflicting entry found, and neither registry is modified.
    pub fn merge(&mut self, other: &Components) -> Result<(), MergeConflict> {
        check_category(&self.schemas, &other.schemas, ComponentCategory::Schemas)?;
        check_category(&self.responses, &other.responses, ComponentCategory::Responses)?;
        check_category(&self.parameters, &other.parameters, ComponentCategory::Parameters)?;
        check_category(&self.examples, &other.examples, ComponentCategory::Examples)?;
        check_category(
            &self.request_bodies,
            &other.request_bodies,
            ComponentCategory::RequestBodies,
        )?;
        check_category(&self.headers, &other.headers, ComponentCategory::Headers)?;
        check_category(
            &self.security_schemes,
            &other.security_schemes,
            ComponentCategory::SecuritySchemes,
        )?;
        check_category(&self.links, &other.links, ComponentCategory::Links)?;
        check_category(&self.callbacks, &other.callbacks, ComponentCategory::Callbacks)?;

        extend_category(&mut self.schemas, &other.schemas);
        extend_category(&mut self.responses, &other.responses);
        extend_category(&mut self.parameters, &other.parameters);
        extend_category(&mut self.examples, &other.examples);
        extend_category(&mut self.request_bodies, &other.request_bodies);
        extend_category(&mut self.headers, &other.headers);
        extend_category(&mut self.security_schemes, &other.security_schemes);
        extend_category(&mut self.links, &other.links);
        extend_category(&mut self.callbacks, &other.callbacks);
        Ok(())
    }

    /// Add an entry under the category matching its type.
    pub fn insert<T: ComponentValue>(&mut self, name: ComponentName, entry: ReferenceOr<T>) {
        T::registry_mut(self).insert(name, entry);
    }

    /// Add a schema.
    pub fn with_schema(mut self, name: ComponentName, schema: impl Into<ReferenceOr<Schema>>) -> Self {
        self.schemas.insert(name, schema.into());
        self
    }

    /// Add a response.
    pub fn with_response(
        mut self,
        name: ComponentName,
        response: impl Into<ReferenceOr<Response>>,
    ) -> Self {
        self.responses.insert(name, response.into());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(
        mut self,
        name: ComponentName,
        parameter: impl Into<ReferenceOr<Parameter>>,
    ) -> Self {
        self.parameters.insert(name, parameter.into());
        self
    }

    /// Add an example.
    pub fn with_example(
        mut self,
        name: ComponentName,
        example: impl Into<ReferenceOr<Example>>,
    ) -> Self {
        self.examples.insert(name, example.into());
        self
    }

    /// Add a request body.
    pub fn with_request_body(
        mut self,
        name: ComponentName,
        request_body: impl Into<ReferenceOr<RequestBody>>,
    ) -> Self {
        self.request_bodies.insert(name, request_body.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: ComponentName, header: impl Into<ReferenceOr<Header>>) -> Self {
        self.headers.insert(name, header.into());
        self
    }

    /// Add a security scheme.
    pub fn with_security_scheme(
        mut self,
        name: ComponentName,
        scheme: impl Into<ReferenceOr<SecurityScheme>>,
    ) -> Self {
        self.security_schemes.insert(name, scheme.into());
        self
    }

    /// Add a link.
    pub fn with_link(mut self, name: ComponentName, link: impl Into<ReferenceOr<Link>>) -> Self {
        self.links.insert(name, link.into());
        self
    }

    /// Add a callback.
    pub fn with_callback(
        mut self,
        name: ComponentName,
        callback: impl Into<ReferenceOr<Callback>>,
    ) -> Self {
        self.callbacks.insert(name, callback.into());
        self
    }
}

fn check_category<T: PartialEq>(
    ours: &BTreeMap<ComponentName, ReferenceOr<T>>,
    theirs: &BTreeMap<ComponentName, ReferenceOr<T>>,
    category: ComponentCategory,
) -> Result<(), MergeConflict> {
    for (name, entry) in theirs {
        if let Some(existing) = ours.get(name) {
            if existing != entry {
                return Err(MergeConflict {
                    category,
                    name: name.clone(),
                });
            }
        }
    }
    Ok(())
}

fn extend_category<T: Clone>(
    ours: &mut BTreeMap<ComponentName, ReferenceOr<T>>,
    theirs: &BTreeMap<ComponentName, ReferenceOr<T>>,
) {
    for (name, entry) in theirs {
        ours.entry(name.clone()).or_insert_with(|| entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaType};

    fn name(raw: &str) -> ComponentName {
        ComponentName::new(raw).unwrap()
    }

    #[test]
    fn test_empty_components() {
        let components = Components::new();
        assert!(components.is_empty());
        assert_eq!(components.entry_count(), 0);
    }

    #[test]
    fn test_lookup_internal() {
        let components =
            Components::new().with_schema(name("Pet"), Schema::of_type(SchemaType::Object));

        let reference = Reference::<Schema>::component_named("Pet").unwrap();
        let entry = components.lookup(&reference).unwrap();
        assert!(entry.inline_value().is_some());

        let missing = Reference::<Schema>::component_named("Store").unwrap();
        assert_eq!(
            components.lookup(&missing),
            Err(LookupError::NotFound {
                category: ComponentCategory::Schemas,
                name: name("Store"),
            })
        );
    }

    #[test]
    fn test_lookup_external_is_rejected() {
        let components = Components::new();
        let reference =
            Reference::<Schema>::parse("other.yaml#/components/schemas/Pet").unwrap();
        assert!(matches!(
            components.lookup(&reference),
            Err(LookupError::CannotResolveRemote { .. })
        ));
    }

    #[test]
    fn test_merge_disjoint_registries() {
        let mut left = Components::new()
            .with_schema(name("Pet"), Schema::of_type(SchemaType::Object))
            .with_schema(name("Tag"), Schema::of_type(SchemaType::String));
        let right = Components::new()
            .with_schema(name("Store"), Schema::of_type(SchemaType::Object))
            .with_example(name("PetExample"), Example::new());

        left.merge(&right).unwrap();
        assert_eq!(left.entry_count(), 4);
        assert!(left.schemas.contains_key(&name("Store")));
        assert!(left.examples.contains_key(&name("PetExample")));
    }

    #[test]
    fn test_merge_equal_duplicates_pass() {
        let mut left =
            Components::new().with_schema(name("Pet"), Schema::of_type(SchemaType::Object));
        let right =
            Components::new().with_schema(name("Pet"), Schema::of_type(SchemaType::Object));

        left.merge(&right).unwrap();
        assert_eq!(left.entry_count(), 1);
    }

    #[test]
    fn test_merge_conflict_is_atomic() {
        let mut left = Components::new()
            .with_schema(name("Pet"), Schema::of_type(SchemaType::Object))
            .with_schema(name("Tag"), Schema::of_type(SchemaType::String));
        let right = Components::new()
            .with_schema(name("Order"), Schema::of_type(SchemaType::Object))
            .with_schema(name("Pet"), Schema::of_type(SchemaType::Integer));

        let before = left.clone();
        let right_before = right.clone();
        let err = left.merge(&right).unwrap_err();
        assert_eq!(
            err,
            MergeConflict {
                category: ComponentCategory::Schemas,
                name: name("Pet"),
            }
        );
        assert_eq!(left, before);
        assert_eq!(right, right_before);
    }

    #[test]
    fn test_components_serialization() {
        let components =
            Components::new().with_schema(name("Pet"), Schema::of_type(SchemaType::Object));
        let json = serde_json::to_value(&components).unwrap();
        assert_eq!(json["schemas"]["Pet"]["type"], "object");

        let decoded: Components = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, components);
    }

    #[test]
    fn test_registry_entry_may_be_a_reference() {
        let components = Components::new().with_schema(
            name("NewPet"),
            ReferenceOr::<Schema>::component_named("Pet").unwrap(),
        );
        let entry = components
            .lookup(&Reference::<Schema>::component_named("NewPet").unwrap())
            .unwrap();
        assert!(entry.reference_value().is_some());
    }
}
