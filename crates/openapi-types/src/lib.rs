//! OpenAPI Types
//!
//! Typed model of an OpenAPI-style API description document, built around
//! reference resolution:
//! - An [`Either`] union representing every "reference or inline value"
//!   position, with decode disambiguation that surfaces the most useful
//!   branch failure
//! - Typed [`Reference`]s, internal and external, over a closed set of
//!   component categories
//! - A [`Components`] registry with categorized named storage and
//!   conflict-safe merging
//! - Serde serialization for every node shape, bon builders, and fluent
//!   construction helpers
//!
//! # Example
//!
//! ```rust
//! use openapi_types::{
//!     Document, Info, MediaType, Operation, PathItem, Reference, Response, Schema,
//! };
//!
//! let document = Document::new(Info::new("Petstore", "1.0.0")).with_path(
//!     "/pets",
//!     PathItem::new().with_get(
//!         Operation::new().with_id("listPets").with_response(
//!             "200",
//!             Response::new("A paged array of pets").with_content(
//!                 "application/json",
//!                 MediaType::with_schema(
//!                     Reference::<Schema>::component_named("Pets").unwrap(),
//!                 ),
//!             ),
//!         ),
//!     ),
//! );
//! assert_eq!(document.paths.len(), 1);
//! ```

pub mod error;

mod callback;
mod components;
mod document;
mod either;
mod example;
mod header;
mod link;
mod media_type;
mod operation;
mod parameter;
mod path_item;
mod reference;
mod request_body;
mod response;
mod schema;
mod security;

pub use callback::*;
pub use components::*;
pub use document::*;
pub use either::*;
pub use example::*;
pub use header::*;
pub use link::*;
pub use media_type::*;
pub use operation::*;
pub use parameter::*;
pub use path_item::*;
pub use reference::*;
pub use request_body::*;
pub use response::*;
pub use schema::*;
pub use security::*;

pub use error::*;

/// Description-format version constants
pub mod version {
    /// Current description-format version targeted by this model
    pub const CURRENT: &str = "3.0.4";

    /// All description-format versions this model accepts
    pub const SUPPORTED: &[&str] = &["3.0.0", "3.0.1", "3.0.2", "3.0.3", "3.0.4"];

    /// Check if a version string is supported
    pub fn is_supported(version: &str) -> bool {
        SUPPORTED.contains(&version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(version::is_supported("3.0.4"));
        assert!(version::is_supported("3.0.0"));
        assert!(!version::is_supported("2.0"));
        assert!(!version::is_supported("3.1.0"));
    }
}
