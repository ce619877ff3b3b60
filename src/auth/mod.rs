//
//  bagisto-storefront
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module manages the customer's bearer token for the storefront
//! API. The token is an opaque string issued by the backend at login and
//! persisted under a fixed key, the desktop analog of the web
//! storefront's local-storage entry.
//!
//! There is deliberately no cryptography here: the token is stored as-is,
//! and invalidation is the server's job. The SDK only needs a getter for
//! the auth middleware and set/clear hooks for the auth service.
//!
//! ## Module Structure
//!
//! - [`store`]: Persistent [`TokenStore`] and token format validation
//!
//! ## Example
//!
//! ```rust,no_run
//! use bagisto_storefront::auth::TokenStore;
//!
//! let tokens = TokenStore::new().expect("token store");
//! tokens.set("issued-token").expect("persist token");
//! assert!(tokens.is_authenticated());
//! tokens.clear().expect("clear token");
//! ```

/// Persistent token storage and validation.
///
/// Provides the [`TokenStore`] used by the auth middleware (reads) and
/// the auth service (writes after login/logout).
pub mod store;

/// Re-export of the token store.
pub use store::{validate_token, TokenStore};
