//! Response Object: a single response from an operation.

use crate::header::Header;
use crate::link::Link;
use crate::media_type::{Content, MediaType};
use crate::reference::ReferenceOr;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single response, including its headers, payload, and follow-up links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct Response {
    /// Description of the response.
    pub description: String,

    /// Headers sent with the response, keyed by header name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub headers: BTreeMap<String, ReferenceOr<Header>>,

    /// The content of the response per media range.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub content: Content,

    /// Follow-up operations reachable from this response.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub links: BTreeMap<String, ReferenceOr<Link>>,
}

impl Response {
    /// Create a response with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            headers: BTreeMap::new(),
            content: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }

    /// Add a header.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        header: impl Into<ReferenceOr<Header>>,
    ) -> Self {
        self.headers.insert(name.into(), header.into());
        self
    }

    /// Add content for a media range.
    pub fn with_content(mut self, media_range: impl Into<String>, media_type: MediaType) -> Self {
        self.content.insert(media_range.into(), media_type);
        self
    }

    /// Add a follow-up link.
    pub fn with_link(mut self, name: impl Into<String>, link: impl Into<ReferenceOr<Link>>) -> Self {
        self.links.insert(name.into(), link.into());
        self
    }
}
