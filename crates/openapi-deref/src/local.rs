//! The local dereferencing pass: a synchronous walk replacing every internal
//! reference with the registry value it points at.

use crate::error::DereferenceError;
use crate::trail::ReferenceTrail;
use openapi_types::error::LookupError;
use openapi_types::{
    ComponentName, ComponentValue, Components, Either, Example, Link, Reference, SecurityScheme,
};
use std::collections::BTreeMap;

/// A node whose internal references can be resolved against a registry,
/// producing a fully inlined mirror value.
///
/// Container shapes implement this generically, so node implementations only
/// walk their own reference-bearing fields. The whole walk either succeeds
/// or unwinds; a failure anywhere produces no partial result.
pub trait LocallyDereferenceable: Sized {
    /// The mirror type with every reference replaced by its resolved value.
    type Output;

    /// Resolve this node against `components`.
    ///
    /// `trail` guards the current path against reference cycles.
    /// `component_name` carries the registry name this node was looked up
    /// under, if it was reached through a reference; wrappers record it for
    /// traceability.
    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError>;

    /// Resolve this node against `components`, starting a fresh trail.
    fn dereferenced(&self, components: &Components) -> Result<Self::Output, DereferenceError> {
        self.dereferenced_with(components, &mut ReferenceTrail::new(), None)
    }
}

impl<T: LocallyDereferenceable> LocallyDereferenceable for Option<T> {
    type Output = Option<T::Output>;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        match self {
            Some(value) => Ok(Some(value.dereferenced_with(
                components,
                trail,
                component_name,
            )?)),
            None => Ok(None),
        }
    }
}

impl<T: LocallyDereferenceable> LocallyDereferenceable for Box<T> {
    type Output = Box<T::Output>;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        Ok(Box::new((**self).dereferenced_with(
            components,
            trail,
            component_name,
        )?))
    }
}

impl<T: LocallyDereferenceable> LocallyDereferenceable for Vec<T> {
    type Output = Vec<T::Output>;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        self.iter()
            .map(|item| item.dereferenced_with(components, trail, None))
            .collect()
    }
}

impl<K, V> LocallyDereferenceable for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: LocallyDereferenceable,
{
    type Output = BTreeMap<K, V::Output>;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        _component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        self.iter()
            .map(|(key, value)| {
                Ok((key.clone(), value.dereferenced_with(components, trail, None)?))
            })
            .collect()
    }
}

impl<T> LocallyDereferenceable for Either<Reference<T>, T>
where
    T: LocallyDereferenceable + ComponentValue,
{
    type Output = T::Output;

    fn dereferenced_with(
        &self,
        components: &Components,
        trail: &mut ReferenceTrail,
        component_name: Option<ComponentName>,
    ) -> Result<Self::Output, DereferenceError> {
        match self {
            Either::A(reference @ Reference::External(_)) => {
                Err(LookupError::CannotResolveRemote {
                    reference: reference.to_string(),
                }
                .into())
            }
            Either::A(Reference::Internal(internal)) => {
                trail.push(T::CATEGORY, internal.name())?;
                let entry = components.lookup_internal(internal)?;
                let output = entry.dereferenced_with(
                    components,
                    trail,
                    Some(internal.name().clone()),
                )?;
                trail.pop();
                Ok(output)
            }
            Either::B(value) => value.dereferenced_with(components, trail, component_name),
        }
    }
}

macro_rules! impl_identity_dereference {
    ($type:ty) => {
        impl LocallyDereferenceable for $type {
            type Output = $type;

            fn dereferenced_with(
                &self,
                _components: &Components,
                _trail: &mut ReferenceTrail,
                _component_name: Option<ComponentName>,
            ) -> Result<Self::Output, DereferenceError> {
                Ok(self.clone())
            }
        }
    };
}

// Nodes with no reference-bearing fields dereference to themselves.
impl_identity_dereference!(Example);
impl_identity_dereference!(Link);
impl_identity_dereference!(SecurityScheme);
