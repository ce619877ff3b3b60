//
//  bagisto-storefront
//  api/services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Domain Services
//!
//! Thin typed wrappers over the [`ApiClient`](crate::api::ApiClient), one
//! per storefront resource. Each service resolves the right endpoint,
//! reshapes the Bagisto response envelope into the typed entity, and
//! nothing more; caching, state and error presentation belong to the
//! embedding application.
//!
//! Services never swallow errors: every method either returns the entity
//! or the normalized [`ApiError`](crate::api::ApiError). Degrading to an
//! empty list or a null entity is a deliberate choice the caller makes.
//!
//! ## Services
//!
//! - [`auth::AuthService`]: login, registration, profile
//! - [`products::ProductsService`]: catalog browsing and search
//! - [`categories::CategoriesService`]: category tree navigation
//! - [`cart::CartService`]: cart manipulation and coupons
//! - [`checkout::CheckoutService`]: the four-step checkout flow
//! - [`core::CoreService`]: locales, currencies and other reference data
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bagisto_storefront::api::services::products::{ProductFilters, ProductsService};
//! use bagisto_storefront::api::{ApiClient, ApiClientConfig};
//!
//! # async fn example() -> Result<(), bagisto_storefront::api::ApiError> {
//! let client = Arc::new(
//!     ApiClient::new(ApiClientConfig::new("https://shop.example.com/api")).unwrap(),
//! );
//! let products = ProductsService::new(client);
//!
//! let page = products.list(ProductFilters::default()).await?;
//! println!("{} products", page.data.len());
//! # Ok(())
//! # }
//! ```

/// Customer session and profile operations.
pub mod auth;

/// Shopping cart operations.
pub mod cart;

/// Category tree operations.
pub mod categories;

/// Checkout flow operations.
pub mod checkout;

/// Core reference data operations.
pub mod core;

/// Catalog product operations.
pub mod products;
