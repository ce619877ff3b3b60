//
//  bagisto-storefront
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Storefront List Responses
//!
//! The Bagisto backend paginates list endpoints Laravel-style: the items
//! arrive under `data`, absolute page URLs under `links`, and the page
//! bookkeeping under `meta`.
//!
//! # Example
//!
//! ```rust
//! use bagisto_storefront::api::common::PaginatedResponse;
//!
//! # fn example(initial: PaginatedResponse<String>) {
//! let mut page = initial;
//! let mut all_items = page.data.clone();
//! while page.has_next() {
//!     // let next = fetch(page.links.next.as_deref().unwrap());
//!     // all_items.extend(next.data.clone());
//!     // page = next;
//!     break; // simplified for the example
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};

/// A paginated list response.
///
/// # Type Parameters
///
/// - `T` - The element type of the listed resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The items on this page.
    pub data: Vec<T>,

    /// Absolute URLs for navigating between pages.
    #[serde(default)]
    pub links: Option<PageLinks>,

    /// Page bookkeeping.
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> PaginatedResponse<T> {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.links
            .as_ref()
            .is_some_and(|links| links.next.is_some())
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.links
            .as_ref()
            .is_some_and(|links| links.prev.is_some())
    }

    /// Total number of items across all pages, when reported.
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref().map(|meta| meta.total)
    }
}

/// Absolute page-navigation URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLinks {
    /// URL of the first page.
    #[serde(default)]
    pub first: Option<String>,

    /// URL of the last page.
    #[serde(default)]
    pub last: Option<String>,

    /// URL of the previous page, `None` on the first page.
    #[serde(default)]
    pub prev: Option<String>,

    /// URL of the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Page bookkeeping reported alongside a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based index of the current page.
    pub current_page: u64,

    /// 1-based index of the first item on this page.
    #[serde(default)]
    pub from: Option<u64>,

    /// Index of the last page.
    pub last_page: u64,

    /// Base path of the listing endpoint.
    #[serde(default)]
    pub path: Option<String>,

    /// Items per page.
    pub per_page: u64,

    /// 1-based index of the last item on this page.
    #[serde(default)]
    pub to: Option<u64>,

    /// Total number of items across all pages.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_navigation() {
        let json = r#"{
            "data": ["a", "b"],
            "links": {"first": "p?page=1", "last": "p?page=3", "prev": null, "next": "p?page=2"},
            "meta": {"current_page": 1, "from": 1, "last_page": 3, "path": "p", "per_page": 2, "to": 2, "total": 6}
        }"#;
        let page: PaginatedResponse<String> = serde_json::from_str(json).unwrap();
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.total(), Some(6));
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn test_pagination_without_meta() {
        let json = r#"{"data": []}"#;
        let page: PaginatedResponse<String> = serde_json::from_str(json).unwrap();
        assert!(!page.has_next());
        assert_eq!(page.total(), None);
    }
}
