//! Callback Object: out-of-band requests related to an operation.

use crate::path_item::PathItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A map of runtime expressions to the path items describing the requests
/// the API may initiate against the expression's resolved URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Callback(BTreeMap<String, PathItem>);

impl From<BTreeMap<String, PathItem>> for Callback {
    fn from(expressions: BTreeMap<String, PathItem>) -> Self {
        Self(expressions)
    }
}

impl Callback {
    /// Create an empty callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path item under a runtime expression.
    pub fn with_expression(mut self, expression: impl Into<String>, path_item: PathItem) -> Self {
        self.0.insert(expression.into(), path_item);
        self
    }

    /// Iterate over the expressions and their path items.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathItem)> {
        self.0.iter()
    }

    /// The path items keyed by runtime expression.
    pub fn expressions(&self) -> &BTreeMap<String, PathItem> {
        &self.0
    }

    /// Check if no expressions are defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
