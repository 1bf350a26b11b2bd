//! Fully resolved mirror of a security requirement.

use crate::error::DereferenceError;
use crate::local::LocallyDereferenceable;
use crate::trail::ReferenceTrail;
use openapi_types::{
    ComponentName, Components, ReferenceOr, SecurityRequirement, SecurityScheme,
};
use std::collections::BTreeMap;

/// A security requirement with every named scheme resolved against the
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub struct DereferencedSecurityRequirement {
    underlying: SecurityRequirement,

    /// The resolved schemes, keyed by the names the requirement used.
    pub schemes: BTreeMap<ComponentName, SecurityScheme>,
}

impl DereferencedSecurityRequirement {
    /// The requirement as authored.
    pub fn underlying(&self) -> &SecurityRequirement {
        &self.underlying
    }

    /// The scopes required for the named scheme.
    pub fn scopes(&self, scheme: &ComponentName) -> Option<&[String]> {
        self.underlying
            .iter()
            .find(|(name, _)| *name == scheme)
            .map(|(_, scopes)| scopes.as_slice())
    }
}

impl LocallyDereferenceable for SecurityRequirement {
    type Output = DereferencedSecurityRequirement;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        let mut schemes = BTreeMap::new();
        for (scheme_name, _scopes) in self.iter() {
            // A requirement key is a reference in all but syntax.
            let scheme = ReferenceOr::<SecurityScheme>::component(scheme_name.clone())
                .dereferenced_with(components, trail, None)?;
            schemes.insert(scheme_name.clone(), scheme);
        }
        Ok(DereferencedSecurityRequirement {
            underlying: self.clone(),
            schemes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DereferenceError;
    use openapi_types::ComponentCategory;
    use openapi_types::error::LookupError;

    fn name(raw: &str) -> ComponentName {
        ComponentName::new(raw).unwrap()
    }

    #[test]
    fn test_scheme_names_resolve_against_registry() {
        let components = Components::new()
            .with_security_scheme(name("api_key"), SecurityScheme::api_key_header("X-Api-Key"));
        let requirement = SecurityRequirement::new().with_scheme(name("api_key"), ["read:pets"]);

        let resolved = requirement.dereferenced(&components).unwrap();
        assert_eq!(
            resolved.schemes[&name("api_key")],
            SecurityScheme::api_key_header("X-Api-Key")
        );
        assert_eq!(
            resolved.scopes(&name("api_key")),
            Some(&["read:pets".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_scheme_name_fails() {
        let requirement = SecurityRequirement::new().with_scheme(name("missing"), ["x"]);
        let err = requirement.dereferenced(&Components::new()).unwrap_err();
        assert_eq!(
            err,
            DereferenceError::Lookup(LookupError::NotFound {
                category: ComponentCategory::SecuritySchemes,
                name: name("missing"),
            })
        );
    }
}
