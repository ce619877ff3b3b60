//
//  bagisto-storefront
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Model
//!
//! This module produces one stable [`ApiError`] shape regardless of where a
//! failure originated: a network timeout, a non-2xx HTTP response, an
//! already-structured server error body, or an unexpected exception inside
//! the pipeline.
//!
//! ## Overview
//!
//! Failures are classified into a [`RawError`] at the point the transport
//! raises them, then normalized exactly once by [`parse_api_error`]. The
//! normalized entity carries a namespaced machine-readable code, the HTTP
//! status, a correlation id, an ISO-8601 timestamp, optional field-level
//! validation errors and an optional server-supplied `retry_after` hint.
//!
//! ## Error Codes
//!
//! | Code | Meaning | Status |
//! |------|---------|--------|
//! | `server.internal_error` | Unclassified server or client failure | 500 |
//! | `server.maintenance` | Backend is down for maintenance | 503 |
//! | `server.timeout` | The call exceeded its timeout or was aborted | 503 |
//! | `rate_limit.exceeded` | Too many requests | 429 |
//! | `http.<status>` | Bare HTTP failure with no structured body | varies |
//!
//! Any code a server's JSON error body supplies is preserved verbatim.
//!
//! ## Example
//!
//! ```rust
//! use bagisto_storefront::api::error::{parse_api_error, RawError, codes};
//!
//! let raw = RawError::Other("operation timeout".to_string());
//! let err = parse_api_error(&raw);
//! assert_eq!(err.code, codes::TIMEOUT);
//! assert_eq!(err.status, 503);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::util::{generate_request_id, now_iso8601};

/// Namespaced error codes produced by the client itself.
///
/// Server-supplied codes (e.g. `validation.failed`, `cart.empty`) pass
/// through untouched; these constants cover the failures the client has to
/// name on its own.
pub mod codes {
    /// Unclassified server or client failure.
    pub const INTERNAL_ERROR: &str = "server.internal_error";

    /// The backend is down for maintenance.
    pub const MAINTENANCE: &str = "server.maintenance";

    /// The call exceeded its timeout or was aborted in flight.
    pub const TIMEOUT: &str = "server.timeout";

    /// The server's rate limit was exceeded.
    pub const RATE_LIMIT_EXCEEDED: &str = "rate_limit.exceeded";
}

/// Default base delay for exponential backoff, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Default backoff multiplier per attempt.
pub const DEFAULT_RETRY_MULTIPLIER: u64 = 2;

/// Default backoff ceiling, in milliseconds.
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 30000;

/// A single field-level validation failure.
///
/// Servers report form validation problems as an ordered list of these
/// entries inside [`ApiError::errors`].
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::ValidationError;
///
/// let entry = ValidationError {
///     field: "email".to_string(),
///     code: "invalid".to_string(),
///     value: None,
/// };
/// assert_eq!(entry.field, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The name of the offending field.
    pub field: String,

    /// Machine-readable code describing what is wrong with the field.
    pub code: String,

    /// The offending value, when the server chooses to echo it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// The normalized error entity for every failure the client surfaces.
///
/// The quadruple `code` + `status` + `request_id` + `timestamp` is always
/// present and acts as the discriminator that recognizes an
/// already-normalized error (a JSON body deserializes into `ApiError` only
/// when all four are there).
///
/// # Fields
///
/// * `code` - Namespaced machine-readable code (`server.timeout`, `http.429`, …)
/// * `status` - HTTP status associated with the failure
/// * `request_id` - Correlation id tying the error to a specific call
/// * `timestamp` - ISO-8601 time the error was raised
/// * `errors` - Optional ordered field-level validation entries
/// * `retry_after` - Optional server-supplied rate-limit hint, in seconds
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::ApiError;
///
/// let err = ApiError::new("cart.empty", 422);
/// assert_eq!(err.status, 422);
/// assert!(!err.request_id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{code} (status {status}, request {request_id})")]
pub struct ApiError {
    /// Namespaced machine-readable error code.
    pub code: String,

    /// HTTP status associated with the failure.
    pub status: u16,

    /// Correlation id tying the error to a specific call.
    pub request_id: String,

    /// ISO-8601 timestamp of when the error was raised.
    pub timestamp: String,

    /// Ordered field-level validation errors, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,

    /// Server-supplied retry hint in seconds, for rate limiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ApiError {
    /// Creates an error with a fresh request id and current timestamp.
    ///
    /// # Parameters
    ///
    /// * `code` - Namespaced error code
    /// * `status` - HTTP status to associate with the failure
    pub fn new(code: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            status,
            request_id: generate_request_id(),
            timestamp: now_iso8601(),
            errors: None,
            retry_after: None,
        }
    }

    /// Creates a `rate_limit.exceeded` error carrying a retry hint.
    ///
    /// # Parameters
    ///
    /// * `retry_after` - Seconds the server asked the client to wait
    pub fn rate_limit(retry_after: u64) -> Self {
        Self {
            retry_after: Some(retry_after),
            ..Self::new(codes::RATE_LIMIT_EXCEEDED, 429)
        }
    }

    /// Creates a generic `server.internal_error` with status 500.
    pub fn server() -> Self {
        Self::new(codes::INTERNAL_ERROR, 500)
    }
}

/// A failure as raised by the transport or pipeline, before normalization.
///
/// The variant is decided at the point the failure occurs; there is no
/// shape-sniffing after the fact. [`parse_api_error`] maps each variant to
/// the stable [`ApiError`] shape.
///
/// # Variants
///
/// * `Api` - Already-normalized error (a structured server body, or a
///   failure raised by a middleware hook)
/// * `Http` - Non-2xx HTTP response, with whatever body the server sent
/// * `Transport` - Transport-level failure (timeout, DNS, connection reset)
/// * `Other` - Anything else (serialization problems, unexpected states)
#[derive(Debug, Error)]
pub enum RawError {
    /// Already-normalized structured error; passes through unchanged.
    #[error(transparent)]
    Api(ApiError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The status reason phrase, e.g. `"Unprocessable Entity"`.
        status_text: String,
        /// The response body, parsed as JSON when possible.
        body: Option<Value>,
    },

    /// Transport-level failure from the HTTP stack.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Anything else, described by a bare message.
    #[error("{0}")]
    Other(String),
}

static HTTP_STATUS_IN_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"HTTP (\d{3})").expect("valid status regex"));

/// Normalizes any [`RawError`] into the stable [`ApiError`] shape.
///
/// The four branches are applied in priority order:
///
/// 1. An already-normalized error is returned unchanged.
/// 2. A transport failure or bare message is classified by content: a
///    timeout/abort becomes `server.timeout`/503, a message carrying
///    `HTTP <status>` becomes `http.<status>`, anything else becomes
///    `server.internal_error`/500.
/// 3. A non-2xx response whose body is itself a valid `ApiError` is
///    returned as-is; otherwise one is synthesized from the status and
///    whatever fields the body does carry.
/// 4. Everything else defaults to `server.internal_error`/500.
///
/// Normalization is idempotent: feeding an already-normalized error back
/// through this function returns it unchanged.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::{parse_api_error, RawError};
///
/// let raw = RawError::Other("HTTP 404: Not Found".to_string());
/// let err = parse_api_error(&raw);
/// assert_eq!(err.code, "http.404");
/// assert_eq!(err.status, 404);
/// ```
pub fn parse_api_error(error: &RawError) -> ApiError {
    match error {
        RawError::Api(err) => err.clone(),

        RawError::Transport(err) => {
            if err.is_timeout() {
                return ApiError::new(codes::TIMEOUT, 503);
            }
            classify_message(&err.to_string())
        }

        RawError::Other(message) => classify_message(message),

        RawError::Http { status, body, .. } => {
            if let Some(body) = body {
                if let Ok(err) = serde_json::from_value::<ApiError>(body.clone()) {
                    return err;
                }
                return synthesize_from_body(*status, body);
            }
            ApiError::new(format!("http.{status}"), *status)
        }
    }
}

/// Classifies a bare failure message into an [`ApiError`].
///
/// Timeouts and aborted calls map to `server.timeout`/503; messages of the
/// form `HTTP <3-digit-status>` map to `http.<status>`; everything else is
/// `server.internal_error`/500.
fn classify_message(message: &str) -> ApiError {
    if message.contains("timeout") || message.contains("aborted") {
        return ApiError::new(codes::TIMEOUT, 503);
    }

    if let Some(captures) = HTTP_STATUS_IN_MESSAGE.captures(message) {
        if let Ok(status) = captures[1].parse::<u16>() {
            return ApiError::new(format!("http.{status}"), status);
        }
    }

    ApiError::new(codes::INTERNAL_ERROR, 500)
}

/// Builds an [`ApiError`] from a partially structured error body.
///
/// Fields present in the body (code, request id, timestamp, validation
/// errors, retry hint) are preserved; missing ones are synthesized.
fn synthesize_from_body(status: u16, body: &Value) -> ApiError {
    let code = body
        .get("code")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("http.{status}"));

    let request_id = body
        .get("request_id")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(generate_request_id);

    let timestamp = body
        .get("timestamp")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(now_iso8601);

    let errors = body
        .get("errors")
        .and_then(|v| serde_json::from_value::<Vec<ValidationError>>(v.clone()).ok());

    let retry_after = body.get("retry_after").and_then(Value::as_u64);

    ApiError {
        code,
        status,
        request_id,
        timestamp,
        errors,
        retry_after,
    }
}

/// Whether the failure is worth retrying.
///
/// True for request timeout (408), rate limiting (429), service
/// unavailable (503) and gateway timeout (504).
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::{is_retryable_error, ApiError};
///
/// assert!(is_retryable_error(&ApiError::new("rate_limit.exceeded", 429)));
/// assert!(!is_retryable_error(&ApiError::new("http.404", 404)));
/// ```
pub fn is_retryable_error(error: &ApiError) -> bool {
    matches!(error.status, 408 | 429 | 503 | 504)
}

/// Whether the error carries any field-level validation entries.
pub fn has_validation_errors(error: &ApiError) -> bool {
    error.errors.as_ref().is_some_and(|errors| !errors.is_empty())
}

/// Reduces the validation entries into a mapping from field name to
/// error code.
///
/// When a field appears more than once, the last occurrence wins.
///
/// # Returns
///
/// An empty map when the error has no validation entries.
pub fn extract_validation_errors(error: &ApiError) -> HashMap<String, String> {
    let Some(errors) = &error.errors else {
        return HashMap::new();
    };

    errors
        .iter()
        .map(|entry| (entry.field.clone(), entry.code.clone()))
        .collect()
}

/// Returns the code of the first validation entry for the given field.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::{get_field_error, ApiError, ValidationError};
///
/// let mut err = ApiError::new("validation.failed", 422);
/// err.errors = Some(vec![ValidationError {
///     field: "email".to_string(),
///     code: "invalid".to_string(),
///     value: None,
/// }]);
/// assert_eq!(get_field_error(&err, "email"), Some("invalid"));
/// assert_eq!(get_field_error(&err, "phone"), None);
/// ```
pub fn get_field_error<'a>(error: &'a ApiError, field: &str) -> Option<&'a str> {
    error
        .errors
        .as_ref()?
        .iter()
        .find(|entry| entry.field == field)
        .map(|entry| entry.code.as_str())
}

/// Computes the exponential backoff delay for a retry attempt, in
/// milliseconds, using the default base (1000 ms), multiplier (2) and
/// ceiling (30000 ms).
///
/// # Parameters
///
/// * `attempt` - 1-based retry attempt number
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::error::calculate_retry_delay;
///
/// assert_eq!(calculate_retry_delay(1), 1000);
/// assert_eq!(calculate_retry_delay(2), 2000);
/// assert_eq!(calculate_retry_delay(6), 30000); // clamped
/// ```
pub fn calculate_retry_delay(attempt: u32) -> u64 {
    calculate_retry_delay_with(
        attempt,
        DEFAULT_RETRY_BASE_DELAY_MS,
        DEFAULT_RETRY_MULTIPLIER,
        DEFAULT_RETRY_MAX_DELAY_MS,
    )
}

/// Computes `min(base_delay * multiplier^(attempt - 1), max_delay)` with
/// saturating arithmetic.
///
/// # Parameters
///
/// * `attempt` - 1-based retry attempt number
/// * `base_delay` - Delay for the first attempt, in milliseconds
/// * `multiplier` - Growth factor per attempt
/// * `max_delay` - Ceiling, in milliseconds
pub fn calculate_retry_delay_with(
    attempt: u32,
    base_delay: u64,
    multiplier: u64,
    max_delay: u64,
) -> u64 {
    let delay = multiplier
        .saturating_pow(attempt.saturating_sub(1))
        .saturating_mul(base_delay);
    delay.min(max_delay)
}

/// Returns the delay to wait before retrying the given error, in
/// milliseconds.
///
/// A server-supplied `retry_after` hint (in seconds) takes precedence;
/// otherwise the exponential backoff for the attempt applies.
///
/// The client never calls this itself; retry orchestration is the
/// caller's responsibility.
pub fn get_retry_delay(error: &ApiError, attempt: u32) -> u64 {
    match error.retry_after {
        Some(seconds) => seconds * 1000,
        None => calculate_retry_delay(attempt),
    }
}

/// Returns the i18n message key for an error code, e.g.
/// `errors.server.timeout`.
pub fn error_i18n_key(code: &str) -> String {
    format!("errors.{code}")
}

/// Returns the i18n message key for a field validation code, e.g.
/// `errors.validation.invalid`.
pub fn field_error_i18n_key(code: &str) -> String {
    format!("errors.validation.{code}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_body() -> Value {
        json!({
            "code": "validation.failed",
            "status": 422,
            "request_id": "r1",
            "timestamp": "t1",
            "errors": [{"field": "email", "code": "invalid"}]
        })
    }

    #[test]
    fn test_normalized_error_passes_through_unchanged() {
        let raw = RawError::Http {
            status: 422,
            status_text: "Unprocessable Entity".to_string(),
            body: Some(validation_body()),
        };
        let err = parse_api_error(&raw);
        assert_eq!(err.code, "validation.failed");
        assert_eq!(err.status, 422);
        assert_eq!(err.request_id, "r1");
        assert_eq!(err.timestamp, "t1");
        assert_eq!(get_field_error(&err, "email"), Some("invalid"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let inputs = vec![
            RawError::Other("HTTP 502: Bad Gateway".to_string()),
            RawError::Other("connection aborted".to_string()),
            RawError::Other("something exploded".to_string()),
            RawError::Http {
                status: 404,
                status_text: "Not Found".to_string(),
                body: None,
            },
        ];
        for raw in inputs {
            let once = parse_api_error(&raw);
            let twice = parse_api_error(&RawError::Api(once.clone()));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_timeout_messages_classify_as_timeout() {
        for message in ["operation timeout", "request aborted mid-flight"] {
            let err = parse_api_error(&RawError::Other(message.to_string()));
            assert_eq!(err.code, codes::TIMEOUT);
            assert_eq!(err.status, 503);
        }
    }

    #[test]
    fn test_http_status_in_message() {
        let err = parse_api_error(&RawError::Other("HTTP 418: I'm a teapot".to_string()));
        assert_eq!(err.code, "http.418");
        assert_eq!(err.status, 418);
    }

    #[test]
    fn test_unclassified_message_is_internal_error() {
        let err = parse_api_error(&RawError::Other("disk on fire".to_string()));
        assert_eq!(err.code, codes::INTERNAL_ERROR);
        assert_eq!(err.status, 500);
    }

    #[test]
    fn test_partial_body_is_synthesized() {
        let raw = RawError::Http {
            status: 429,
            status_text: "Too Many Requests".to_string(),
            body: Some(json!({"code": "rate_limit.exceeded", "retry_after": 12})),
        };
        let err = parse_api_error(&raw);
        assert_eq!(err.code, "rate_limit.exceeded");
        assert_eq!(err.status, 429);
        assert_eq!(err.retry_after, Some(12));
        assert!(!err.request_id.is_empty());
    }

    #[test]
    fn test_bodyless_http_failure() {
        let raw = RawError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: None,
        };
        let err = parse_api_error(&raw);
        assert_eq!(err.code, "http.404");
        assert_eq!(err.status, 404);
    }

    #[test]
    fn test_is_retryable() {
        for status in [408u16, 429, 503, 504] {
            assert!(is_retryable_error(&ApiError::new("x", status)));
        }
        for status in [400u16, 401, 404, 422, 500] {
            assert!(!is_retryable_error(&ApiError::new("x", status)));
        }
    }

    #[test]
    fn test_extract_validation_errors_last_wins() {
        let mut err = ApiError::new("validation.failed", 422);
        err.errors = Some(vec![
            ValidationError {
                field: "email".to_string(),
                code: "invalid".to_string(),
                value: None,
            },
            ValidationError {
                field: "email".to_string(),
                code: "taken".to_string(),
                value: None,
            },
        ]);
        let map = extract_validation_errors(&err);
        assert_eq!(map.len(), 1);
        assert_eq!(map["email"], "taken");
        // get_field_error keeps the first occurrence
        assert_eq!(get_field_error(&err, "email"), Some("invalid"));
    }

    #[test]
    fn test_has_validation_errors() {
        let mut err = ApiError::new("validation.failed", 422);
        assert!(!has_validation_errors(&err));
        err.errors = Some(vec![]);
        assert!(!has_validation_errors(&err));
        err.errors = Some(vec![ValidationError {
            field: "email".to_string(),
            code: "invalid".to_string(),
            value: None,
        }]);
        assert!(has_validation_errors(&err));
    }

    #[test]
    fn test_retry_delay_backoff() {
        assert_eq!(calculate_retry_delay(1), 1000);
        assert_eq!(calculate_retry_delay(2), 2000);
        assert_eq!(calculate_retry_delay(3), 4000);
        assert_eq!(calculate_retry_delay(6), 30000);
        assert_eq!(calculate_retry_delay_with(4, 500, 3, 60000), 13500);
    }

    #[test]
    fn test_retry_after_takes_precedence() {
        let err = ApiError::rate_limit(7);
        assert_eq!(get_retry_delay(&err, 1), 7000);
        let plain = ApiError::new("http.503", 503);
        assert_eq!(get_retry_delay(&plain, 2), 2000);
    }

    #[test]
    fn test_i18n_keys() {
        assert_eq!(error_i18n_key("server.timeout"), "errors.server.timeout");
        assert_eq!(field_error_i18n_key("invalid"), "errors.validation.invalid");
    }
}
