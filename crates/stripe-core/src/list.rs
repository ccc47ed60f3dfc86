//! # List Envelopes
//!
//! Paginated responses from list and search endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::expandable::HasId;
use crate::params::ListParams;

/// Pagination metadata shared by every list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMeta {
    pub has_more: bool,
    pub url: String,
    /// Only present when the request asked for `total_count`.
    pub total_count: Option<u64>,
}

/// A page of objects from a list endpoint.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "list_object")]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub total_count: Option<u64>,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            object: list_object(),
            data: Vec::new(),
            has_more: false,
            url: String::new(),
            total_count: None,
        }
    }
}

impl<T> List<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn meta(&self) -> ListMeta {
        ListMeta {
            has_more: self.has_more,
            url: self.url.clone(),
            total_count: self.total_count,
        }
    }
}

impl<T: HasId> List<T> {
    /// Id of the last object on this page, the cursor for the next one.
    pub fn last_id(&self) -> Option<&str> {
        self.data.last().map(HasId::id)
    }

    /// Params for the following page, or `None` on the last page.
    pub fn next_page_params(&self, current: &ListParams) -> Option<ListParams> {
        if !self.has_more {
            return None;
        }
        let cursor = self.last_id()?;
        Some(current.clone().after(cursor))
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A page of results from a `/search` endpoint.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    #[serde(default)]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page, fed back as `page`.
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub total_count: Option<u64>,
}
