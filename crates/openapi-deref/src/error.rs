//! Error types for the local and external dereferencing passes.

use crate::loader::BoxError;
use openapi_types::error::{LookupError, MergeConflict};
use thiserror::Error;

/// Errors produced by the local dereferencing pass.
///
/// Every variant is terminal for the call in progress: the walk unwinds and
/// no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DereferenceError {
    /// A reference could not be resolved against the registry, either
    /// because the component is missing or because the reference points
    /// outside the document.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Following references led back to a component already being resolved
    /// on the current path.
    #[error("reference cycle through {chain}")]
    ReferenceCycle {
        /// The chain of component identities, ending with the repeat.
        chain: String,
    },
}

/// Errors produced by the external dereferencing pass.
#[derive(Error, Debug)]
pub enum ExternalDereferenceError {
    /// A pointer into a loaded document could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Two registries disagreed on an entry while folding loaded components
    /// together.
    #[error(transparent)]
    Merge(#[from] MergeConflict),

    /// The injected loader failed to produce components for a locator.
    #[error("failed to load external document '{locator}'")]
    Loader {
        /// The locator passed to the loader.
        locator: String,
        /// The loader's failure.
        #[source]
        source: BoxError,
    },

    /// An external reference named a document but no component inside it, so
    /// there is nothing typed to substitute at the referencing position.
    #[error("external reference '{locator}' does not name a component")]
    MissingInternalPointer {
        /// The locator of the pointer-less reference.
        locator: String,
    },
}

/// Errors produced by running the external pass followed by the local pass.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The external pass failed.
    #[error(transparent)]
    External(#[from] ExternalDereferenceError),

    /// The local pass failed.
    #[error(transparent)]
    Local(#[from] DereferenceError),
}
