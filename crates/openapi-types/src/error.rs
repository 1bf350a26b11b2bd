//! Error types for the document model and the component registry.

use crate::reference::{ComponentCategory, ComponentName};
use thiserror::Error;

/// Error produced when constructing a [`ComponentName`] from an invalid string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentNameError {
    /// Component names must contain at least one character.
    #[error("component name cannot be empty")]
    Empty,

    /// Component names are restricted to `a-z A-Z 0-9 . - _`.
    #[error("invalid character '{character}' in component name '{name}'")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// The full name that was rejected.
        name: String,
    },
}

/// Error produced when parsing a `$ref` string into a typed reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceParseError {
    /// The reference string was empty.
    #[error("reference cannot be empty")]
    Empty,

    /// An internal pointer did not start with `/components/`.
    #[error("reference pointer '{pointer}' does not point into /components")]
    NotAComponentPointer {
        /// The pointer fragment that was rejected.
        pointer: String,
    },

    /// The category segment of the pointer is not one of the known categories.
    #[error("unknown component category '{segment}'")]
    UnknownCategory {
        /// The unrecognized category segment.
        segment: String,
    },

    /// The pointer names a category other than the one this reference type
    /// retrieves values from.
    #[error("reference points at {found} but a {expected} component was expected")]
    CategoryMismatch {
        /// The category required by the reference's payload type.
        expected: ComponentCategory,
        /// The category actually named by the pointer.
        found: ComponentCategory,
    },

    /// The pointer ended before naming a component.
    #[error("reference pointer '{pointer}' does not name a component")]
    MissingName {
        /// The pointer fragment that was rejected.
        pointer: String,
    },

    /// The component name segment failed validation.
    #[error(transparent)]
    InvalidName(#[from] ComponentNameError),
}

/// Error produced when a reference cannot be resolved against a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No component is registered under the referenced category and name.
    #[error("no {category} component named '{name}' exists")]
    NotFound {
        /// The category that was searched.
        category: ComponentCategory,
        /// The name that was not found.
        name: ComponentName,
    },

    /// The reference points outside the current document. A registry alone
    /// cannot resolve it; the external document must be loaded first.
    #[error("cannot resolve remote reference '{reference}' against the local registry")]
    CannotResolveRemote {
        /// The rendered reference string.
        reference: String,
    },
}

/// Error produced when two registries disagree on the value stored under the
/// same category and name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("conflicting definitions for {category} component '{name}'")]
pub struct MergeConflict {
    /// The category containing the conflicting entry.
    pub category: ComponentCategory,
    /// The key both registries define differently.
    pub name: ComponentName,
}
