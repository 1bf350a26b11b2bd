//! OpenAPI Deref
//!
//! Dereferencing engine for [`openapi-types`](openapi_types) documents. Two
//! composable passes replace every reference with the value it points at:
//!
//! - **Local** ([`LocallyDereferenceable`]): a synchronous walk resolving
//!   internal references against the document's component registry, guarded
//!   against reference cycles by a path-scoped [`ReferenceTrail`]. Produces
//!   `Dereferenced*` mirror values that keep the authored node attached.
//! - **External** ([`ExternallyDereferenceable`]): an asynchronous walk that
//!   loads externally referenced documents through an injected
//!   [`ComponentLoader`], fans out across sibling subtrees concurrently, and
//!   folds the loaded registries together conflict-safely, reassembling
//!   results in input order.
//!
//! Run the external pass first to grow the registry, then the local pass to
//! inline it; [`ResolveDocument::resolve`] does both.
//!
//! # Example
//!
//! ```rust
//! use openapi_deref::LocallyDereferenceable;
//! use openapi_types::{ComponentName, Components, ReferenceOr, Schema};
//!
//! let components = Components::new().with_schema(
//!     ComponentName::new("Pet").unwrap(),
//!     Schema::object().with_title("Pet"),
//! );
//! let position = ReferenceOr::<Schema>::component_named("Pet").unwrap();
//!
//! let resolved = position.dereferenced(&components).unwrap();
//! assert_eq!(resolved.title(), Some("Pet"));
//! assert_eq!(
//!     resolved.component_name(),
//!     Some(&ComponentName::new("Pet").unwrap())
//! );
//! ```

pub mod error;

mod content;
mod document;
mod external;
mod loader;
mod local;
mod request;
mod response;
mod schema;
mod security;
mod trail;

pub use content::*;
pub use document::*;
pub use external::*;
pub use loader::*;
pub use local::*;
pub use request::*;
pub use response::*;
pub use schema::*;
pub use security::*;
pub use trail::*;

pub use error::*;
