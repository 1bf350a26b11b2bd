//! Typed references to reusable document components.
//!
//! A Reference Object is a simple object of the form `{"$ref": "..."}` that
//! points at a named component, either in the current document's components
//! section or in another document entirely.

use crate::components::ComponentValue;
use crate::either::Either;
use crate::error::{ComponentNameError, ReferenceParseError};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Phrase used when serialized data is not shaped like a Reference Object.
///
/// The `Either` decoder inspects branch failures for this phrase to decide
/// whether a failure means "the author clearly did not write a reference" as
/// opposed to "the author wrote a reference, but a broken one".
pub(crate) const NOT_A_REFERENCE_MARKER: &str = r#"a reference object of the form {"$ref": "..."}"#;

/// The closed set of component categories a reference may point into.
///
/// One entry exists per map in the components section. The set is fixed by
/// the document's structural model and is not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentCategory {
    /// Reusable Schema Objects.
    Schemas,
    /// Reusable Response Objects.
    Responses,
    /// Reusable Parameter Objects.
    Parameters,
    /// Reusable Example Objects.
    Examples,
    /// Reusable Request Body Objects.
    RequestBodies,
    /// Reusable Header Objects.
    Headers,
    /// Reusable Security Scheme Objects.
    SecuritySchemes,
    /// Reusable Link Objects.
    Links,
    /// Reusable Callback Objects.
    Callbacks,
}

impl ComponentCategory {
    /// The key under which this category appears in a serialized document.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentCategory::Schemas => "schemas",
            ComponentCategory::Responses => "responses",
            ComponentCategory::Parameters => "parameters",
            ComponentCategory::Examples => "examples",
            ComponentCategory::RequestBodies => "requestBodies",
            ComponentCategory::Headers => "headers",
            ComponentCategory::SecuritySchemes => "securitySchemes",
            ComponentCategory::Links => "links",
            ComponentCategory::Callbacks => "callbacks",
        }
    }

    /// All categories, in document order.
    pub const ALL: [ComponentCategory; 9] = [
        ComponentCategory::Schemas,
        ComponentCategory::Responses,
        ComponentCategory::Parameters,
        ComponentCategory::Examples,
        ComponentCategory::RequestBodies,
        ComponentCategory::Headers,
        ComponentCategory::SecuritySchemes,
        ComponentCategory::Links,
        ComponentCategory::Callbacks,
    ];
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = ReferenceParseError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        ComponentCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == segment)
            .ok_or_else(|| ReferenceParseError::UnknownCategory {
                segment: segment.to_string(),
            })
    }
}

/// A validated key into one of the component maps.
///
/// Names are non-empty and restricted to `a-z A-Z 0-9 . - _`, matching the
/// fixed fields pattern for the components section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentName(String);

impl ComponentName {
    /// Validate and wrap a component name.
    pub fn new(name: impl Into<String>) -> Result<Self, ComponentNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ComponentNameError::Empty);
        }
        for character in name.chars() {
            if !character.is_ascii_alphanumeric()
                && character != '.'
                && character != '-'
                && character != '_'
            {
                return Err(ComponentNameError::InvalidCharacter { character, name });
            }
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ComponentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ComponentName::new(raw).map_err(de::Error::custom)
    }
}

/// A typed pointer to a component holding a value of type `T`.
///
/// An internal reference names a component in the current document's registry.
/// An external reference names another document by an opaque locator string,
/// optionally followed by a pointer into that document's components section.
/// References are created during decoding and are immutable afterwards;
/// dereferencing looks them up but never rewrites them in place.
pub enum Reference<T> {
    /// A reference into the current document: `#/components/<category>/<name>`.
    Internal(InternalReference<T>),
    /// A reference into another document: `<locator>#/components/...`.
    External(ExternalReference<T>),
}

/// The internal variant of [`Reference`]: a component name, with the category
/// established statically by the payload type.
pub struct InternalReference<T> {
    name: ComponentName,
    _target: PhantomData<fn() -> T>,
}

/// The external variant of [`Reference`]: an opaque document locator plus an
/// optional pointer applied once the document has been loaded.
pub struct ExternalReference<T> {
    locator: String,
    pointer: Option<ComponentName>,
    _target: PhantomData<fn() -> T>,
}

impl<T> InternalReference<T> {
    /// Create an internal reference to the named component.
    pub fn new(name: ComponentName) -> Self {
        Self {
            name,
            _target: PhantomData,
        }
    }

    /// The referenced component's name.
    pub fn name(&self) -> &ComponentName {
        &self.name
    }
}

impl<T> ExternalReference<T> {
    /// Create an external reference to a document, optionally pointing at a
    /// component inside it.
    pub fn new(locator: impl Into<String>, pointer: Option<ComponentName>) -> Self {
        Self {
            locator: locator.into(),
            pointer,
            _target: PhantomData,
        }
    }

    /// The opaque locator naming the external document.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The pointer to apply after the external document is loaded, if any.
    pub fn pointer(&self) -> Option<&ComponentName> {
        self.pointer.as_ref()
    }
}

impl<T: ComponentValue> Reference<T> {
    /// Create an internal reference to the named component.
    pub fn component(name: ComponentName) -> Self {
        Reference::Internal(InternalReference::new(name))
    }

    /// Create an internal reference, validating the name string.
    pub fn component_named(name: &str) -> Result<Self, ComponentNameError> {
        Ok(Self::component(ComponentName::new(name)?))
    }

    /// Create an external reference.
    pub fn external(locator: impl Into<String>, pointer: Option<ComponentName>) -> Self {
        Reference::External(ExternalReference::new(locator, pointer))
    }

    /// Check if this reference resolves within the current document.
    pub fn is_internal(&self) -> bool {
        matches!(self, Reference::Internal(_))
    }

    /// Check if this reference points at another document.
    pub fn is_external(&self) -> bool {
        matches!(self, Reference::External(_))
    }

    /// The category this reference retrieves values from.
    pub fn category(&self) -> ComponentCategory {
        T::CATEGORY
    }

    /// Parse a raw `$ref` string into a typed reference.
    ///
    /// Internal references must use the `#/components/<category>/<name>` form
    /// with a category matching the payload type. Anything not starting with
    /// `#` is treated as an external locator, optionally carrying the same
    /// pointer form after a `#` separator.
    pub fn parse(raw: &str) -> Result<Self, ReferenceParseError> {
        if raw.is_empty() {
            return Err(ReferenceParseError::Empty);
        }
        if let Some(fragment) = raw.strip_prefix('#') {
            let name = parse_component_pointer::<T>(fragment)?;
            return Ok(Reference::Internal(InternalReference::new(name)));
        }
        match raw.split_once('#') {
            Some((locator, fragment)) => {
                let name = parse_component_pointer::<T>(fragment)?;
                Ok(Reference::External(ExternalReference::new(
                    locator,
                    Some(name),
                )))
            }
            None => Ok(Reference::External(ExternalReference::new(raw, None))),
        }
    }
}

/// Parse `/components/<category>/<name>`, checking the category against `T`.
fn parse_component_pointer<T: ComponentValue>(
    fragment: &str,
) -> Result<ComponentName, ReferenceParseError> {
    let rest = fragment.strip_prefix("/components/").ok_or_else(|| {
        ReferenceParseError::NotAComponentPointer {
            pointer: fragment.to_string(),
        }
    })?;
    let (category_segment, name_segment) =
        rest.split_once('/')
            .ok_or_else(|| ReferenceParseError::MissingName {
                pointer: fragment.to_string(),
            })?;
    let category = ComponentCategory::from_str(category_segment)?;
    if category != T::CATEGORY {
        return Err(ReferenceParseError::CategoryMismatch {
            expected: T::CATEGORY,
            found: category,
        });
    }
    if name_segment.is_empty() {
        return Err(ReferenceParseError::MissingName {
            pointer: fragment.to_string(),
        });
    }
    Ok(ComponentName::new(name_segment)?)
}

impl<T: ComponentValue> fmt::Display for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Internal(internal) => {
                write!(f, "#/components/{}/{}", T::CATEGORY, internal.name)
            }
            Reference::External(external) => {
                f.write_str(&external.locator)?;
                if let Some(pointer) = &external.pointer {
                    write!(f, "#/components/{}/{}", T::CATEGORY, pointer)?;
                }
                Ok(())
            }
        }
    }
}

// Manual trait impls so the phantom payload type carries no bounds.

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        match self {
            Reference::Internal(internal) => Reference::Internal(InternalReference {
                name: internal.name.clone(),
                _target: PhantomData,
            }),
            Reference::External(external) => Reference::External(ExternalReference {
                locator: external.locator.clone(),
                pointer: external.pointer.clone(),
                _target: PhantomData,
            }),
        }
    }
}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Reference::Internal(left), Reference::Internal(right)) => left.name == right.name,
            (Reference::External(left), Reference::External(right)) => {
                left.locator == right.locator && left.pointer == right.pointer
            }
            _ => false,
        }
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Internal(internal) => f
                .debug_struct("InternalReference")
                .field("name", &internal.name)
                .finish(),
            Reference::External(external) => f
                .debug_struct("ExternalReference")
                .field("locator", &external.locator)
                .field("pointer", &external.pointer)
                .finish(),
        }
    }
}

impl<T: ComponentValue> Serialize for Reference<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$ref", &self.to_string())?;
        map.end()
    }
}

impl<'de, T: ComponentValue> Deserialize<'de> for Reference<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReferenceVisitor<T>(PhantomData<fn() -> T>);

        impl<'de, T: ComponentValue> Visitor<'de> for ReferenceVisitor<T> {
            type Value = Reference<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(NOT_A_REFERENCE_MARKER)
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut raw: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "$ref" {
                        if raw.is_some() {
                            return Err(de::Error::custom(format!(
                                "expected {NOT_A_REFERENCE_MARKER}, found a duplicate `$ref` field"
                            )));
                        }
                        raw = Some(map.next_value()?);
                    } else {
                        return Err(de::Error::custom(format!(
                            "expected {NOT_A_REFERENCE_MARKER}, found unexpected field `{key}`"
                        )));
                    }
                }
                let raw = raw.ok_or_else(|| {
                    de::Error::custom(format!(
                        "expected {NOT_A_REFERENCE_MARKER}, found an object without `$ref`"
                    ))
                })?;
                Reference::parse(&raw).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(ReferenceVisitor(PhantomData))
    }
}

/// The union used at every referenceable position in the document: either a
/// typed reference to a reusable component, or the value written inline.
pub type ReferenceOr<T> = Either<Reference<T>, T>;

impl<T: ComponentValue> Either<Reference<T>, T> {
    /// A reference to the named component in the current document.
    pub fn component(name: ComponentName) -> Self {
        Either::A(Reference::component(name))
    }

    /// A reference to the named component, validating the name string.
    pub fn component_named(name: &str) -> Result<Self, ComponentNameError> {
        Ok(Either::A(Reference::component_named(name)?))
    }

    /// A value written inline rather than referenced.
    pub fn inline(value: T) -> Self {
        Either::B(value)
    }

    /// The reference, if this position holds one.
    pub fn reference_value(&self) -> Option<&Reference<T>> {
        self.a()
    }

    /// The inline value, if this position holds one.
    pub fn inline_value(&self) -> Option<&T> {
        self.b()
    }
}

impl<T: ComponentValue> From<T> for Either<Reference<T>, T> {
    fn from(value: T) -> Self {
        Either::B(value)
    }
}

impl<T: ComponentValue> From<Reference<T>> for Either<Reference<T>, T> {
    fn from(reference: Reference<T>) -> Self {
        Either::A(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_component_name_validation() {
        assert!(ComponentName::new("Pet").is_ok());
        assert!(ComponentName::new("pet.store-v2_draft").is_ok());
        assert!(ComponentName::new("123").is_ok());

        assert_eq!(ComponentName::new(""), Err(ComponentNameError::Empty));
        assert!(matches!(
            ComponentName::new("bad name"),
            Err(ComponentNameError::InvalidCharacter { character: ' ', .. })
        ));
        assert!(matches!(
            ComponentName::new("pets/Pet"),
            Err(ComponentNameError::InvalidCharacter { character: '/', .. })
        ));
    }

    #[test]
    fn test_category_round_trip() {
        for category in ComponentCategory::ALL {
            assert_eq!(ComponentCategory::from_str(category.as_str()), Ok(category));
        }
        assert!(matches!(
            ComponentCategory::from_str("definitions"),
            Err(ReferenceParseError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_parse_internal_reference() {
        let reference = Reference::<Schema>::parse("#/components/schemas/Pet").unwrap();
        assert!(reference.is_internal());
        assert_eq!(reference.to_string(), "#/components/schemas/Pet");
    }

    #[test]
    fn test_parse_rejects_category_mismatch() {
        let result = Reference::<Schema>::parse("#/components/responses/Pet");
        assert_eq!(
            result,
            Err(ReferenceParseError::CategoryMismatch {
                expected: ComponentCategory::Schemas,
                found: ComponentCategory::Responses,
            })
        );
    }

    #[test]
    fn test_parse_external_reference() {
        let reference =
            Reference::<Schema>::parse("other.yaml#/components/schemas/Pet").unwrap();
        assert!(reference.is_external());
        assert_eq!(reference.to_string(), "other.yaml#/components/schemas/Pet");

        let bare = Reference::<Schema>::parse("https://example.com/shared.json").unwrap();
        assert!(bare.is_external());
        assert_eq!(bare.to_string(), "https://example.com/shared.json");
    }

    #[test]
    fn test_parse_rejects_malformed_pointers() {
        assert_eq!(Reference::<Schema>::parse(""), Err(ReferenceParseError::Empty));
        assert!(matches!(
            Reference::<Schema>::parse("#/definitions/Pet"),
            Err(ReferenceParseError::NotAComponentPointer { .. })
        ));
        assert!(matches!(
            Reference::<Schema>::parse("#/components/schemas"),
            Err(ReferenceParseError::MissingName { .. })
        ));
        assert!(matches!(
            Reference::<Schema>::parse("#/components/schemas/"),
            Err(ReferenceParseError::MissingName { .. })
        ));
    }

    #[test]
    fn test_reference_serialization() {
        let reference = Reference::<Schema>::component_named("Pet").unwrap();
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, r##"{"$ref":"#/components/schemas/Pet"}"##);

        let decoded: Reference<Schema> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, reference);
    }

    #[test]
    fn test_reference_deserialization_rejects_extra_fields() {
        let err = serde_json::from_str::<Reference<Schema>>(
            r##"{"$ref": "#/components/schemas/Pet", "description": "hm"}"##,
        )
        .unwrap_err();
        assert!(err.to_string().contains(NOT_A_REFERENCE_MARKER));

        let err = serde_json::from_str::<Reference<Schema>>(r#"{"type": "string"}"#).unwrap_err();
        assert!(err.to_string().contains(NOT_A_REFERENCE_MARKER));
    }
}
