//
//  bagisto-storefront
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! This module provides small helpers used throughout the storefront SDK:
//! identifier generation for request correlation and idempotency, and
//! timestamp formatting for error payloads.
//!
//! ## Categories
//!
//! - **Identifiers**: [`generate_request_id`], [`generate_idempotency_key`]
//! - **Time**: [`now_iso8601`]
//!
//! ## Example
//!
//! ```rust
//! use bagisto_storefront::util::{generate_request_id, generate_idempotency_key};
//!
//! let request_id = generate_request_id();       // "7d7f0a4e-..."
//! let key = generate_idempotency_key();         // "idem_7d7f0a4e..."
//! assert_ne!(generate_request_id(), request_id);
//! ```

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Generates a unique request correlation identifier.
///
/// Every API call is stamped with one of these by the `request-id`
/// middleware and carries it in the `X-Request-ID` header, so a single
/// call can be traced across client logs and server logs.
///
/// # Returns
///
/// A random UUID v4 in hyphenated form, e.g.
/// `"67e55044-10b1-426f-9247-bb680e5fe0c8"`.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::util::generate_request_id;
///
/// let id = generate_request_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a unique idempotency key for mutating requests.
///
/// The `idempotency` middleware attaches one of these as the
/// `Idempotency-Key` header on POST/PUT/PATCH calls that don't already
/// carry one, so the server can detect and collapse duplicate retries.
///
/// # Returns
///
/// A string of the form `idem_<32 hex chars>`.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::util::generate_idempotency_key;
///
/// let key = generate_idempotency_key();
/// assert!(key.starts_with("idem_"));
/// ```
pub fn generate_idempotency_key() -> String {
    format!("idem_{}", Uuid::new_v4().simple())
}

/// Returns the current UTC time as an ISO-8601 / RFC 3339 string.
///
/// Used when synthesizing [`ApiError`](crate::api::ApiError) timestamps for
/// failures the server did not describe itself.
///
/// # Returns
///
/// A timestamp such as `"2026-01-12T09:30:00.000Z"`, millisecond precision,
/// always in UTC with a `Z` suffix.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = generate_request_id();
        let b = generate_request_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_idempotency_key_format() {
        let key = generate_idempotency_key();
        assert!(key.starts_with("idem_"));
        assert_eq!(key.len(), "idem_".len() + 32);
        assert_ne!(key, generate_idempotency_key());
    }

    #[test]
    fn test_now_iso8601_is_utc() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }
}
