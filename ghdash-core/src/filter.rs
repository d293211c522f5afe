//! Client-side search and category filtering over loaded items
//!
//! Everything here is pure and synchronous: the visible list is recomputed
//! from the accumulated items on every read, never fetched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::model::Item;

/// Literal used by the presentation layer for "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Active category selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Whether an item with the given category passes. Items without a
    /// category only pass the `All` filter.
    pub fn admits(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(value) => f.write_str(value),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::new(value)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::new(s))
    }
}

/// Transient search box + category selector state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// True when the filter cannot hide anything
    pub fn is_identity(&self) -> bool {
        self.query.is_empty() && self.category.is_all()
    }

    /// Single-item predicate combining search and category
    pub fn admits(&self, kind: EntityKind, item: &Item) -> bool {
        kind.matches(item, &self.query) && self.category.admits(kind.category_of(item))
    }
}

/// Visible subset of `items`, in their original order
pub fn visible<'a>(kind: EntityKind, items: &'a [Item], filter: &FilterState) -> Vec<&'a Item> {
    items.iter().filter(|item| filter.admits(kind, item)).collect()
}

/// What to show in place of an empty visible list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "placeholder", content = "message", rename_all = "snake_case")]
pub enum Placeholder {
    /// Nothing has been loaded for this collection
    EmptyCollection(String),
    /// Items are loaded but the filters hide all of them
    NoMatches,
}

impl Placeholder {
    pub fn message(&self) -> &str {
        match self {
            Placeholder::EmptyCollection(message) => message,
            Placeholder::NoMatches => "No items match your search filters.",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
