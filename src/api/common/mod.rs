//
//  bagisto-storefront
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Common API Types
//!
//! Shared response envelopes used across every storefront resource. The
//! Bagisto backend wraps single entities as `{"data": ...}` (optionally
//! with a human-readable `message`) and lists as `{"data": [...], "links":
//! ..., "meta": ...}`.
//!
//! # Overview
//!
//! - [`ApiResponse`] - Envelope for a single entity, with optional message
//! - [`MessageResponse`] - Envelope for message-only operations (logout,
//!   password reset)
//! - Pagination types (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use bagisto_storefront::api::common::ApiResponse;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Category {
//!     id: u64,
//!     name: String,
//! }
//!
//! let json = r#"{"data": {"id": 3, "name": "Shoes"}}"#;
//! let response: ApiResponse<Category> = serde_json::from_str(json).unwrap();
//! assert_eq!(response.data.name, "Shoes");
//! ```

use serde::{Deserialize, Serialize};

mod pagination;

pub use pagination::*;

/// Envelope for a single entity returned by the storefront API.
///
/// Most endpoints answer with `{"data": <entity>}`; mutating endpoints
/// often add a `message` describing the outcome.
///
/// # Type Parameters
///
/// - `T` - The entity type carried in `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response payload.
    pub data: T,

    /// Optional human-readable outcome message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for operations that only report an outcome message.
///
/// Used by logout, password-reset and similar endpoints that carry no
/// entity payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}
