//! Security Scheme and Security Requirement Objects.

use crate::reference::ComponentName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A security mechanism usable by the API's operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    /// An API key passed in a header, query parameter, or cookie.
    #[serde(rename_all = "camelCase")]
    ApiKey {
        /// The name of the header, query parameter, or cookie.
        name: String,
        /// Where the key is sent.
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        /// Description of the scheme.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },

    /// An HTTP authentication scheme from the IANA registry.
    #[serde(rename_all = "camelCase")]
    Http {
        /// The authentication scheme name, such as `basic` or `bearer`.
        scheme: String,
        /// Hint on how bearer tokens are formatted.
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        /// Description of the scheme.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },

    /// OpenID Connect discovery.
    #[serde(rename_all = "camelCase")]
    OpenIdConnect {
        /// Where to discover configuration values.
        open_id_connect_url: String,
        /// Description of the scheme.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Where an API key is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

impl SecurityScheme {
    /// An API key sent in the named header.
    pub fn api_key_header(name: impl Into<String>) -> Self {
        SecurityScheme::ApiKey {
            name: name.into(),
            location: ApiKeyLocation::Header,
            description: None,
        }
    }

    /// HTTP bearer authentication.
    pub fn http_bearer() -> Self {
        SecurityScheme::Http {
            scheme: "bearer".to_string(),
            bearer_format: None,
            description: None,
        }
    }
}

/// The schemes, with their scopes, that must all be satisfied to authorize a
/// request.
///
/// Each key names a Security Scheme Object declared in the components
/// section, so keys are validated component names; resolving them against
/// the registry happens during dereferencing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityRequirement(BTreeMap<ComponentName, Vec<String>>);

impl SecurityRequirement {
    /// Create an empty requirement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the named scheme with the given scopes.
    pub fn with_scheme(
        mut self,
        scheme: ComponentName,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.0
            .insert(scheme, scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Iterate over the required scheme names and their scopes.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentName, &Vec<String>)> {
        self.0.iter()
    }

    /// Check if no schemes are required.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
