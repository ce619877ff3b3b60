//
//  bagisto-storefront
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for a headless Bagisto storefront
//! backend, the middleware pipeline it runs every call through, and the
//! typed domain services layered on top.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Core HTTP client with middleware orchestration
//! - [`middleware`]: The [`ApiMiddleware`](middleware::ApiMiddleware)
//!   trait, phase executors and shipped middleware
//! - [`error`]: Structured error normalization and retry helpers
//! - [`context`]: Per-call request/response/error context types
//! - [`endpoints`]: Static registry of storefront REST paths
//! - [`common`]: Shared response envelopes (entity and paginated)
//! - [`services`]: Typed domain services (auth, catalog, cart, checkout)
//! - [`bagisto`]: One-shot construction of the shared client
//!
//! ## Usage
//!
//! ### Creating a Client
//!
//! ```rust,no_run
//! use bagisto_storefront::api::{ApiClient, ApiClientConfig};
//!
//! let client = ApiClient::new(
//!     ApiClientConfig::new("https://shop.example.com/api").with_version("v1"),
//! )
//! .expect("client construction");
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as a normalized [`ApiError`] carrying a
//! namespaced code, the HTTP status, a correlation id and a timestamp;
//! see [`error`] for the taxonomy and the retry helpers.

/// Core HTTP client for the storefront API.
///
/// Provides the [`ApiClient`] struct which handles:
/// - URL building with path and query parameters
/// - Middleware pipeline orchestration
/// - Per-call timeouts and credential policy
/// - Error normalization
pub mod client;

/// Shared response envelopes for entities and paginated lists.
pub mod common;

/// Per-call context types threaded through the middleware pipeline.
pub mod context;

/// Static registry of storefront REST paths.
pub mod endpoints;

/// Error normalization and retry helpers.
pub mod error;

/// Middleware trait, executors and shipped middleware.
pub mod middleware;

/// Typed domain services over the client.
pub mod services;

/// Construction of the shared storefront client.
pub mod bagisto;

/// Re-export of the main API client and its configuration.
pub use client::{ApiClient, ApiClientConfig, CredentialsPolicy, ExecuteOptions};

/// Re-export of the per-call context types.
pub use context::{ErrorContext, HttpMethod, RequestContext, RequestOptions, ResponseContext};

/// Re-export of the error entities.
pub use error::{ApiError, RawError, ValidationError};

/// Re-export of the shared response envelopes.
pub use common::{ApiResponse, MessageResponse, PaginatedResponse};

/// Re-export of the client wiring helper.
pub use bagisto::build_storefront_client;
