//
//  bagisto-storefront
//  api/bagisto.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Storefront Client Wiring
//!
//! Builds the one shared [`ApiClient`] an application uses for its whole
//! lifetime, wired with the standard middleware stack: request ids first
//! (so every later middleware and log line sees the correlation id), then
//! auth over the token store, then locale over the locale store, and,
//! when debug is on, the logger last so it observes the fully prepared
//! request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bagisto_storefront::api::build_storefront_client;
//! use bagisto_storefront::auth::TokenStore;
//! use bagisto_storefront::config::StorefrontConfig;
//! use bagisto_storefront::locale::LocaleStore;
//!
//! let config = StorefrontConfig::load().expect("configuration");
//! let tokens = TokenStore::new().expect("token store");
//! let locales = Arc::new(LocaleStore::new(config.default_locale.clone()));
//!
//! let client = Arc::new(
//!     build_storefront_client(&config, tokens, locales).expect("client"),
//! );
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::api::client::{ApiClient, ApiClientConfig, CredentialsPolicy};
use crate::api::middleware::{
    AuthMiddleware, LocaleMiddleware, LoggerMiddleware, RequestIdMiddleware,
};
use crate::auth::TokenStore;
use crate::config::StorefrontConfig;
use crate::locale::LocaleStore;

/// Builds the shared storefront client with the standard middleware
/// stack.
///
/// The token and locale getters read their stores fresh on every request,
/// so logging in or switching locale takes effect immediately without
/// rebuilding the client. The logger middleware is only registered when
/// `config.debug` is set.
///
/// # Errors
///
/// Returns an error if the underlying HTTP client cannot be constructed.
pub fn build_storefront_client(
    config: &StorefrontConfig,
    tokens: TokenStore,
    locales: Arc<LocaleStore>,
) -> Result<ApiClient> {
    let mut client_config = ApiClientConfig::new(config.api_url.clone())
        .with_timeout(config.timeout_ms)
        .with_credentials(CredentialsPolicy::Include)
        .with_header("Accept", "application/json")
        .with_header("Content-Type", "application/json")
        .with_middleware(Arc::new(RequestIdMiddleware))
        .with_middleware(Arc::new(AuthMiddleware::new(move || tokens.get())))
        .with_middleware(Arc::new(LocaleMiddleware::new(move || locales.current())));

    if let Some(version) = &config.api_version {
        client_config = client_config.with_version(version.clone());
    }

    if config.debug {
        client_config = client_config.with_middleware(Arc::new(LoggerMiddleware::new()));
    }

    ApiClient::new(client_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = TokenStore::with_path(dir.path().join("auth_token"));
        let locales = Arc::new(LocaleStore::default());
        let config = StorefrontConfig::default();

        let client = build_storefront_client(&config, tokens, locales);
        assert!(client.is_ok());
    }
}
