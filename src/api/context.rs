//
//  bagisto-storefront
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request, Response and Error Contexts
//!
//! This module defines the data structures that describe a single HTTP
//! exchange as it moves through the middleware pipeline: the options a
//! caller supplies, the request context threaded through `on_request`
//! hooks, the response context threaded through `on_response` hooks, and
//! the error context threaded through `on_error` hooks.
//!
//! # Ownership
//!
//! Each context is created fresh per call and owned exclusively by that
//! call's execution. Contexts are moved through the pipeline by value;
//! there is no cross-call sharing and no concurrent mutation of a single
//! context.
//!
//! # Notes
//!
//! - Response payloads travel through the pipeline as [`serde_json::Value`]
//!   so that middleware stays object-safe; the client performs the single
//!   typed deserialization after the response chain completes.
//! - Non-JSON response bodies are carried as `Value::String`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;

/// HTTP methods supported by the storefront API.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::HttpMethod;
///
/// assert_eq!(HttpMethod::default(), HttpMethod::Get);
/// assert_eq!(HttpMethod::Post.as_str(), "POST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Safe, cacheable read. The default when no method is specified.
    #[default]
    Get,
    /// Resource creation and non-idempotent actions.
    Post,
    /// Full resource replacement.
    Put,
    /// Partial resource update.
    Patch,
    /// Resource removal.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical uppercase wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether this method mutates server state.
    ///
    /// Mutating methods (POST/PUT/PATCH) are the ones the idempotency
    /// middleware stamps with an `Idempotency-Key` header. DELETE is
    /// already idempotent by contract and is not stamped.
    pub fn is_mutating(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a single API call.
///
/// Every field is optional in spirit: `method` defaults to GET and
/// `timeout` defaults to the client's configured timeout when the request
/// context is built. Query and path parameters are ordered lists so that
/// substitution and query-string assembly happen in insertion order.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::{HttpMethod, RequestOptions};
///
/// let options = RequestOptions {
///     method: Some(HttpMethod::Get),
///     params: vec![("page".into(), "2".into())],
///     ..Default::default()
/// };
/// assert!(options.body.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method; `None` resolves to GET.
    pub method: Option<HttpMethod>,

    /// Per-call headers, merged over the client defaults (per-call wins).
    pub headers: HashMap<String, String>,

    /// Query parameters, appended in insertion order, values stringified.
    pub params: Vec<(String, String)>,

    /// Path parameters substituted into `:name` placeholders, in order.
    pub path_params: Vec<(String, String)>,

    /// JSON body; only attached for non-GET methods.
    pub body: Option<Value>,

    /// Per-call timeout in milliseconds; `None` resolves to the client's
    /// configured timeout.
    pub timeout: Option<u64>,

    /// Names of middleware to skip for this call.
    pub skip_middleware: Vec<String>,

    /// Free-form metadata for middleware to read; never sent on the wire.
    pub meta: HashMap<String, Value>,
}

impl RequestOptions {
    /// The effective method, defaulting to GET when unspecified.
    pub fn method(&self) -> HttpMethod {
        self.method.unwrap_or_default()
    }

    /// Whether the named middleware should be skipped for this call.
    pub fn skips(&self, middleware_name: &str) -> bool {
        self.skip_middleware.iter().any(|n| n == middleware_name)
    }
}

/// The mutable unit threaded through request-phase middleware.
///
/// Holds the fully resolved URL, the per-call correlation identifier, and
/// the request options with headers progressively merged by middleware.
///
/// # Fields
///
/// * `url` - The final URL including version segment and query string
/// * `request_id` - Correlation id; blank until the `request-id` middleware
///   stamps it (or a caller supplies one up front)
/// * `options` - Resolved options (method and timeout defaults applied)
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The fully resolved request URL.
    pub url: String,

    /// Per-call correlation identifier. Empty string until generated.
    pub request_id: String,

    /// The resolved request options.
    pub options: RequestOptions,
}

impl RequestContext {
    /// The effective HTTP method for this request.
    pub fn method(&self) -> HttpMethod {
        self.options.method()
    }

    /// Sets a header on the request, replacing any existing value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.headers.insert(name.into(), value.into());
    }

    /// Sets a header only if it is not already present.
    pub fn set_header_if_absent(&mut self, name: &str, value: impl Into<String>) {
        if !self.options.headers.contains_key(name) {
            self.options.headers.insert(name.to_string(), value.into());
        }
    }
}

/// Produced after the network call succeeds.
///
/// Carries the deserialized payload, the HTTP status, the response headers
/// and a back-reference to the originating request context (read-only from
/// this point on).
///
/// # Notes
///
/// The payload is an untyped [`serde_json::Value`]; JSON bodies are parsed,
/// everything else arrives as `Value::String`. The typed deserialization to
/// the caller's `T` happens once, after the response middleware chain.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// The response payload.
    pub data: Value,

    /// HTTP status code of the response.
    pub status: u16,

    /// Response headers, lowercased names mapped to values.
    pub headers: HashMap<String, String>,

    /// The request context this response answers.
    pub request: RequestContext,
}

/// Produced after the network call or pipeline fails.
///
/// Error middleware receives this context in registration order and may
/// transform it (recover) or suppress further processing by returning
/// `None`.
///
/// # Notes
///
/// `retry_count` is always 0 at the point error middleware observes it:
/// the client performs no internal retry. The field exists so that caller
/// supplied retry orchestration has a place to thread attempt counts
/// through the error chain.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The normalized error for this failure.
    pub error: ApiError,

    /// The request context the failure belongs to.
    pub request: RequestContext,

    /// Number of retries already performed. Always 0 in the core client.
    pub retry_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_defaults_to_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method(), HttpMethod::Get);
    }

    #[test]
    fn test_is_mutating() {
        assert!(HttpMethod::Post.is_mutating());
        assert!(HttpMethod::Put.is_mutating());
        assert!(HttpMethod::Patch.is_mutating());
        assert!(!HttpMethod::Get.is_mutating());
        assert!(!HttpMethod::Delete.is_mutating());
    }

    #[test]
    fn test_skip_list_matching() {
        let options = RequestOptions {
            skip_middleware: vec!["logger".to_string()],
            ..Default::default()
        };
        assert!(options.skips("logger"));
        assert!(!options.skips("auth"));
    }

    #[test]
    fn test_set_header_if_absent() {
        let mut context = RequestContext {
            url: "http://localhost".to_string(),
            request_id: String::new(),
            options: RequestOptions::default(),
        };
        context.set_header_if_absent("Idempotency-Key", "a");
        context.set_header_if_absent("Idempotency-Key", "b");
        assert_eq!(context.options.headers["Idempotency-Key"], "a");
    }
}
