//! The cycle guard threaded through a local dereferencing walk.

use crate::error::DereferenceError;
use openapi_types::{ComponentCategory, ComponentName};

/// The component identities currently being resolved along one
/// top-to-bottom path of the walk.
///
/// An identity is pushed before recursing into the component it names and
/// popped on the way back up, so the guard is scoped to the current path
/// rather than the whole call. Sibling branches that independently reference
/// the same component never see each other's entries. A trail lives for a
/// single dereferencing call and is never shared.
#[derive(Debug, Default)]
pub struct ReferenceTrail {
    entries: Vec<TrailEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TrailEntry {
    category: ComponentCategory,
    name: ComponentName,
}

impl ReferenceTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many components are currently being resolved on this path.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is currently being resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that the named component is being resolved.
    ///
    /// Fails with [`DereferenceError::ReferenceCycle`] if the component is
    /// already on the current path, reporting the full chain back to the
    /// first occurrence.
    pub fn push(
        &mut self,
        category: ComponentCategory,
        name: &ComponentName,
    ) -> Result<(), DereferenceError> {
        if self
            .entries
            .iter()
            .any(|entry| entry.category == category && &entry.name == name)
        {
            let mut chain: Vec<String> = self
                .entries
                .iter()
                .map(|entry| format!("{}/{}", entry.category, entry.name))
                .collect();
            chain.push(format!("{category}/{name}"));
            return Err(DereferenceError::ReferenceCycle {
                chain: chain.join(" -> "),
            });
        }
        self.entries.push(TrailEntry {
            category,
            name: name.clone(),
        });
        Ok(())
    }

    /// Record that resolution of the most recently pushed component is done.
    pub fn pop(&mut self) {
        self.entries.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> ComponentName {
        ComponentName::new(raw).unwrap()
    }

    #[test]
    fn test_push_and_pop() {
        let mut trail = ReferenceTrail::new();
        assert!(trail.is_empty());

        trail.push(ComponentCategory::Schemas, &name("A")).unwrap();
        trail.push(ComponentCategory::Schemas, &name("B")).unwrap();
        assert_eq!(trail.depth(), 2);

        trail.pop();
        trail.pop();
        assert!(trail.is_empty());
    }

    #[test]
    fn test_repeat_reports_full_chain() {
        let mut trail = ReferenceTrail::new();
        trail.push(ComponentCategory::Schemas, &name("A")).unwrap();
        trail.push(ComponentCategory::Schemas, &name("B")).unwrap();

        let err = trail
            .push(ComponentCategory::Schemas, &name("A"))
            .unwrap_err();
        assert_eq!(
            err,
            DereferenceError::ReferenceCycle {
                chain: "schemas/A -> schemas/B -> schemas/A".to_string(),
            }
        );
    }

    #[test]
    fn test_same_name_in_different_categories_is_not_a_cycle() {
        let mut trail = ReferenceTrail::new();
        trail.push(ComponentCategory::Schemas, &name("Pet")).unwrap();
        trail
            .push(ComponentCategory::Responses, &name("Pet"))
            .unwrap();
        assert_eq!(trail.depth(), 2);
    }

    #[test]
    fn test_popped_entries_do_not_trip_the_guard() {
        let mut trail = ReferenceTrail::new();
        trail.push(ComponentCategory::Schemas, &name("A")).unwrap();
        trail.pop();
        trail.push(ComponentCategory::Schemas, &name("A")).unwrap();
        assert_eq!(trail.depth(), 1);
    }
}
