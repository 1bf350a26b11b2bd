//! Request Body Object: the payload an operation accepts.

use crate::media_type::{Content, MediaType};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The payload accepted by an operation, keyed by media range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct RequestBody {
    /// Description of the request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The content of the request body per media range.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[builder(default)]
    pub content: Content,

    /// Whether the body is mandatory. Defaults to false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RequestBody {
    /// Create an empty request body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content for a media range.
    pub fn with_content(mut self, media_range: impl Into<String>, media_type: MediaType) -> Self {
        self.content.insert(media_range.into(), media_type);
        self
    }

    /// Mark the body as mandatory.
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Whether the body is mandatory, defaulting to false.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}
