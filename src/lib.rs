//
//  bagisto-storefront
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bagisto Storefront SDK
//!
//! A typed HTTP client SDK for headless Bagisto commerce storefronts.
//!
//! ## Overview
//!
//! This library provides everything an application needs to talk to a
//! Bagisto REST backend: a configured HTTP client with a composable
//! middleware pipeline (request correlation ids, locale and auth header
//! injection, logging, idempotency keys), a structured error model, a
//! static endpoint registry, and typed domain services for the catalog,
//! cart and checkout flows.
//!
//! ## Features
//!
//! - **Middleware Pipeline**: ordered, name-addressed request/response/
//!   error hooks with per-call skip lists
//! - **Structured Errors**: one stable error shape with namespaced codes,
//!   correlation ids, validation details and retry hints
//! - **Typed Services**: auth, products, categories, cart, checkout and
//!   core reference data
//! - **Session Plumbing**: persistent token store and a live locale store
//!   read fresh on every request
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, middleware, errors, endpoints and services
//! - [`auth`]: Persistent bearer-token storage
//! - [`config`]: TOML + environment configuration loading
//! - [`locale`]: Current-locale store backing the locale middleware
//! - [`util`]: Identifier and timestamp helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bagisto_storefront::api::services::products::{ProductFilters, ProductsService};
//! use bagisto_storefront::api::build_storefront_client;
//! use bagisto_storefront::auth::TokenStore;
//! use bagisto_storefront::config::StorefrontConfig;
//! use bagisto_storefront::locale::LocaleStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = StorefrontConfig::load()?;
//! let tokens = TokenStore::new()?;
//! let locales = Arc::new(LocaleStore::new(config.default_locale.clone()));
//!
//! let client = Arc::new(build_storefront_client(&config, tokens, locales)?);
//!
//! let products = ProductsService::new(client);
//! let page = products.list(ProductFilters::default()).await?;
//! println!("{} products on page 1", page.data.len());
//! # Ok(())
//! # }
//! ```

/// API client implementation for the storefront backend.
///
/// This module provides the HTTP client, the middleware pipeline it runs
/// every call through, the structured error model, the endpoint registry
/// and the typed domain services.
pub mod api;

/// Authentication token management.
///
/// Handles the customer's bearer token: a plain string persisted under a
/// fixed key, read by the auth middleware on every request and written by
/// the auth service after login and logout.
pub mod auth;

/// Configuration file management.
///
/// Loads the SDK's configuration from platform-specific locations:
/// - Linux: `~/.config/bagisto-storefront/config.toml`
/// - macOS: `~/Library/Application Support/bagisto-storefront/config.toml`
/// - Windows: `%APPDATA%\bagisto-storefront\config.toml`
pub mod config;

/// Locale selection store.
///
/// Holds the shopper's current locale for the locale middleware to read
/// fresh on every request.
pub mod locale;

/// Utility functions and helpers.
///
/// Identifier generation for request correlation and idempotency, plus
/// ISO-8601 timestamp formatting.
pub mod util;

/// Re-export of the main API client.
///
/// The [`ApiClient`] is the single configured entry point for all
/// storefront HTTP calls.
pub use api::ApiClient;

/// Re-export of the API client configuration.
pub use api::ApiClientConfig;

/// Re-export of the normalized error entity.
///
/// Every failure the client surfaces is an [`ApiError`] carrying a
/// namespaced code, HTTP status, correlation id and timestamp.
pub use api::ApiError;

/// Re-export of the application configuration.
pub use config::StorefrontConfig;

/// Application name constant.
///
/// Used for user-agent strings and configuration paths.
pub const APP_NAME: &str = "bagisto-storefront";

/// Library version constant.
///
/// Automatically derived from Cargo.toml at compile time using the
/// `CARGO_PKG_VERSION` environment variable.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
