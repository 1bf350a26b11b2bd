//! Fully resolved mirror of a schema.

use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::trail::ReferenceTrail;
use openapi_types::{ComponentName, Components, Schema, SchemaType};
use std::collections::BTreeMap;

/// A schema with every reference, at any depth, replaced by the value it
/// pointed at.
///
/// The pre-resolution schema stays attached as the underlying value, so
/// non-reference fields remain available exactly as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedSchema {
    underlying: Schema,
    component_name: Option<ComponentName>,

    /// Resolved named properties.
    pub properties: BTreeMap<String, DereferencedSchema>,

    /// Resolved schema for additional properties.
    pub additional_properties: Option<Box<DereferencedSchema>>,

    /// Resolved item schema.
    pub items: Option<Box<DereferencedSchema>>,

    /// Resolved `allOf` composition.
    pub all_of: Vec<DereferencedSchema>,

    /// Resolved `anyOf` composition.
    pub any_of: Vec<DereferencedSchema>,

    /// Resolved `oneOf` composition.
    pub one_of: Vec<DereferencedSchema>,

    /// Resolved negation schema.
    pub not: Option<Box<DereferencedSchema>>,
}

impl DereferencedSchema {
    /// The schema as authored, references intact.
    pub fn underlying(&self) -> &Schema {
        &self.underlying
    }

    /// The registry name this schema was resolved from, when it was reached
    /// through a reference rather than written inline.
    pub fn component_name(&self) -> Option<&ComponentName> {
        self.component_name.as_ref()
    }

    /// The schema title.
    pub fn title(&self) -> Option<&str> {
        self.underlying.title.as_deref()
    }

    /// The schema description.
    pub fn description(&self) -> Option<&str> {
        self.underlying.description.as_deref()
    }

    /// The primitive type.
    pub fn schema_type(&self) -> Option<SchemaType> {
        self.underlying.schema_type
    }

    /// The format refinement.
    pub fn format(&self) -> Option<&str> {
        self.underlying.format.as_deref()
    }

    /// The required property names.
    pub fn required(&self) -> &[String] {
        &self.underlying.required
    }
}

impl LocallyDereferenceable for Schema {
    type Output = DereferencedSchema;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(DereferencedSchema {
            properties: self.properties.dereferenced_with(components, trail, None)?,
            additional_properties: self
                .additional_properties
                .dereferenced_with(components, trail, None)?,
            items: self.items.dereferenced_with(components, trail, None)?,
            all_of: self.all_of.dereferenced_with(components, trail, None)?,
            any_of: self.any_of.dereferenced_with(components, trail, None)?,
            one_of: self.one_of.dereferenced_with(components, trail, None)?,
            not: self.not.dereferenced_with(components, trail, None)?,
            component_name,
            underlying: self.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_types::{ComponentCategory, Reference, ReferenceOr};
    use openapi_types::error::LookupError;

    fn name(raw: &str) -> ComponentName {
        ComponentName::new(raw).unwrap()
    }

    #[test]
    fn test_reference_free_schema_mirrors_input() {
        let schema = Schema::object()
            .with_title("Pet")
            .with_property("id", Schema::integer())
            .with_property("name", Schema::string())
            .with_required("id");

        let resolved = schema.dereferenced(&Components::new()).unwrap();
        assert_eq!(resolved.title(), Some("Pet"));
        assert_eq!(resolved.schema_type(), Some(SchemaType::Object));
        assert_eq!(resolved.properties.len(), 2);
        assert_eq!(resolved.required(), ["id"]);
        assert_eq!(resolved.component_name(), None);
        assert_eq!(resolved.underlying(), &schema);
    }

    #[test]
    fn test_nested_reference_resolves_and_records_name() {
        let components =
            Components::new().with_schema(name("Tag"), Schema::string().with_title("Tag"));
        let schema = Schema::object().with_property(
            "tag",
            Reference::<Schema>::component(name("Tag")),
        );

        let resolved = schema.dereferenced(&components).unwrap();
        let tag = &resolved.properties["tag"];
        assert_eq!(tag.title(), Some("Tag"));
        assert_eq!(tag.component_name(), Some(&name("Tag")));
    }

    #[test]
    fn test_chain_depth_stays_bounded() {
        // A -> B -> C, a chain of three named schemas.
        let components = Components::new()
            .with_schema(name("A"), ReferenceOr::<Schema>::component(name("B")))
            .with_schema(name("B"), ReferenceOr::<Schema>::component(name("C")))
            .with_schema(name("C"), Schema::string());

        let mut trail = ReferenceTrail::new();
        let resolved = ReferenceOr::<Schema>::component(name("A"))
            .dereferenced_with(&components, &mut trail, None)
            .unwrap();
        assert_eq!(resolved.schema_type(), Some(SchemaType::String));
        // The terminal schema is named after the last lookup in the chain.
        assert_eq!(resolved.component_name(), Some(&name("C")));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_self_referential_schema_cycles() {
        // A list of pets where each pet holds a list of friend pets.
        let components = Components::new().with_schema(
            name("Pet"),
            Schema::object().with_property(
                "friends",
                Schema::array(Reference::<Schema>::component(name("Pet"))),
            ),
        );

        let err = ReferenceOr::<Schema>::component(name("Pet"))
            .dereferenced(&components)
            .unwrap_err();
        assert_eq!(
            err,
            DereferenceError::ReferenceCycle {
                chain: "schemas/Pet -> schemas/Pet".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_property_reference_fails() {
        let schema = Schema::object().with_property(
            "tag",
            Reference::<Schema>::component(name("Tag")),
        );
        let err = schema.dereferenced(&Components::new()).unwrap_err();
        assert_eq!(
            err,
            DereferenceError::Lookup(LookupError::NotFound {
                category: ComponentCategory::Schemas,
                name: name("Tag"),
            })
        );
    }

    #[test]
    fn test_composition_keywords_resolve() {
        let components =
            Components::new().with_schema(name("Base"), Schema::object().with_title("Base"));
        let schema = Schema::new()
            .with_title("Extended");
        let schema = Schema {
            all_of: vec![
                Reference::<Schema>::component(name("Base")).into(),
                Schema::object().with_property("extra", Schema::string()).into(),
            ],
            ..schema
        };

        let resolved = schema.dereferenced(&components).unwrap();
        assert_eq!(resolved.all_of.len(), 2);
        assert_eq!(resolved.all_of[0].title(), Some("Base"));
        assert_eq!(resolved.all_of[0].component_name(), Some(&name("Base")));
        assert_eq!(resolved.all_of[1].component_name(), None);
    }
}
