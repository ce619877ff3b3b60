//
//  bagisto-storefront
//  api/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Endpoint Registry
//!
//! A static map of the storefront REST paths, pure data with no behavior.
//! Literal paths are `const`s; resources addressed by id are functions
//! producing the interpolated path.
//!
//! The [`Endpoint`] type additionally binds a path to an HTTP method so
//! that [`ApiClient::execute`](crate::api::ApiClient::execute) can resolve
//! a named operation directly.
//!
//! ## Example
//!
//! ```rust
//! use bagisto_storefront::api::endpoints;
//!
//! assert_eq!(endpoints::cart::GET, "/checkout/cart");
//! assert_eq!(endpoints::products::detail(42), "/products/42");
//! ```

use std::fmt::Display;

use crate::api::context::HttpMethod;

/// A logical name bound to a path template and HTTP method.
///
/// # Fields
///
/// * `path` - The REST path, possibly carrying `:name` placeholders
/// * `method` - The HTTP method the operation uses
/// * `authenticated` - Whether the operation requires a customer token
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::endpoints::Endpoint;
/// use bagisto_storefront::api::HttpMethod;
///
/// let cancel = Endpoint::new("/orders/:id/cancel", HttpMethod::Post).authenticated();
/// assert!(cancel.authenticated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// REST path, possibly containing `:name` placeholders.
    pub path: String,

    /// HTTP method for the operation.
    pub method: HttpMethod,

    /// Whether the operation requires an authenticated customer.
    pub authenticated: bool,
}

impl Endpoint {
    /// Defines an endpoint for the given path and method.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            authenticated: false,
        }
    }

    /// Marks the endpoint as requiring an authenticated customer.
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }
}

/// Customer session and profile endpoints.
pub mod auth {
    /// Email/password login.
    pub const LOGIN: &str = "/customer/login";
    /// New customer registration.
    pub const REGISTER: &str = "/customer/register";
    /// Session logout.
    pub const LOGOUT: &str = "/customer/logout";
    /// Password reset email.
    pub const FORGOT_PASSWORD: &str = "/customer/forgot-password";
    /// Current customer profile.
    pub const PROFILE: &str = "/customer/get";
    /// Profile update.
    pub const UPDATE_PROFILE: &str = "/customer/profile";
}

/// Catalog product endpoints.
pub mod products {
    use super::Display;

    /// Product listing with filters.
    pub const LIST: &str = "/products";

    /// Single product by id.
    pub fn detail(id: impl Display) -> String {
        format!("/products/{id}")
    }

    /// Extra attribute rows shown on a product page.
    pub fn additional_info(id: impl Display) -> String {
        format!("/product-additional-information/{id}")
    }

    /// Variant matrix for configurable products.
    pub fn configurable_config(id: impl Display) -> String {
        format!("/product-configurable-config/{id}")
    }
}

/// Catalog category endpoints.
pub mod categories {
    use super::Display;

    /// Category listing.
    pub const LIST: &str = "/categories";
    /// Children of a category subtree.
    pub const DESCENDANTS: &str = "/descendant-categories";

    /// Single category by id.
    pub fn detail(id: impl Display) -> String {
        format!("/categories/{id}")
    }
}

/// Product attribute endpoints.
pub mod attributes {
    use super::Display;

    /// Attribute listing.
    pub const LIST: &str = "/attributes";

    /// Single attribute by id.
    pub fn detail(id: impl Display) -> String {
        format!("/attributes/{id}")
    }
}

/// Attribute family endpoints.
pub mod families {
    use super::Display;

    /// Family listing.
    pub const LIST: &str = "/families";

    /// Single family by id.
    pub fn detail(id: impl Display) -> String {
        format!("/families/{id}")
    }
}

/// Product review endpoints.
pub mod reviews {
    use super::Display;

    /// Review listing.
    pub const LIST: &str = "/reviews";

    /// Single review by id.
    pub fn detail(id: impl Display) -> String {
        format!("/reviews/{id}")
    }

    /// Create a review for a product.
    pub fn create(product_id: impl Display) -> String {
        format!("/reviews/{product_id}/create")
    }

    /// Delete a review by id.
    pub fn delete(id: impl Display) -> String {
        format!("/reviews/{id}")
    }
}

/// Shopping cart endpoints.
pub mod cart {
    use super::Display;

    /// Current cart.
    pub const GET: &str = "/checkout/cart";
    /// Item quantity update.
    pub const UPDATE: &str = "/checkout/cart/update";
    /// Empty the cart.
    pub const CLEAR: &str = "/checkout/cart/empty";
    /// Apply a coupon (POST) or remove it (DELETE).
    pub const APPLY_COUPON: &str = "/checkout/cart/coupon";
    /// Same path as [`APPLY_COUPON`]; the method distinguishes the action.
    pub const REMOVE_COUPON: &str = "/checkout/cart/coupon";

    /// Add a product to the cart.
    pub fn add(product_id: impl Display) -> String {
        format!("/checkout/cart/add/{product_id}")
    }

    /// Remove a single cart item.
    pub fn remove_item(cart_item_id: impl Display) -> String {
        format!("/checkout/cart/remove-item/{cart_item_id}")
    }

    /// Move a cart item to the wishlist.
    pub fn move_to_wishlist(cart_item_id: impl Display) -> String {
        format!("/checkout/cart/move-to-wishlist/{cart_item_id}")
    }
}

/// Checkout flow endpoints.
pub mod checkout {
    /// Billing/shipping address submission.
    pub const SAVE_ADDRESS: &str = "/checkout/save-address";
    /// Shipping method selection.
    pub const SAVE_SHIPPING: &str = "/checkout/save-shipping";
    /// Payment method selection.
    pub const SAVE_PAYMENT: &str = "/checkout/save-payment";
    /// Order placement.
    pub const SAVE_ORDER: &str = "/checkout/save-order";
    /// Minimum order amount check.
    pub const CHECK_MINIMUM_ORDER: &str = "/checkout/check-minimum-order";
}

/// Customer account sub-resources.
pub mod customer {
    use super::Display;

    /// Single customer by id.
    pub fn detail(id: impl Display) -> String {
        format!("/customers/{id}")
    }

    /// Address book endpoints.
    pub mod addresses {
        use super::Display;

        /// Address listing.
        pub const LIST: &str = "/addresses";
        /// Address creation.
        pub const CREATE: &str = "/addresses/create";

        /// Single address by id.
        pub fn detail(id: impl Display) -> String {
            format!("/addresses/{id}")
        }

        /// Address update by id.
        pub fn update(id: impl Display) -> String {
            format!("/addresses/{id}")
        }

        /// Address deletion by id.
        pub fn delete(id: impl Display) -> String {
            format!("/addresses/{id}")
        }
    }

    /// Order history endpoints.
    pub mod orders {
        use super::Display;

        /// Order listing.
        pub const LIST: &str = "/orders";

        /// Single order by id.
        pub fn detail(id: impl Display) -> String {
            format!("/orders/{id}")
        }

        /// Order cancellation.
        pub fn cancel(id: impl Display) -> String {
            format!("/orders/{id}/cancel")
        }
    }

    /// Invoice endpoints.
    pub mod invoices {
        use super::Display;

        /// Invoice listing.
        pub const LIST: &str = "/invoices";

        /// Single invoice by id.
        pub fn detail(id: impl Display) -> String {
            format!("/invoices/{id}")
        }
    }

    /// Shipment endpoints.
    pub mod shipments {
        use super::Display;

        /// Shipment listing.
        pub const LIST: &str = "/shipments";

        /// Single shipment by id.
        pub fn detail(id: impl Display) -> String {
            format!("/shipments/{id}")
        }
    }

    /// Payment transaction endpoints.
    pub mod transactions {
        use super::Display;

        /// Transaction listing.
        pub const LIST: &str = "/transactions";

        /// Single transaction by id.
        pub fn detail(id: impl Display) -> String {
            format!("/transactions/{id}")
        }
    }

    /// Wishlist endpoints.
    pub mod wishlist {
        use super::Display;

        /// Wishlist listing.
        pub const LIST: &str = "/wishlist";

        /// Add a product to the wishlist.
        pub fn add(product_id: impl Display) -> String {
            format!("/wishlist/add/{product_id}")
        }

        /// Remove a wishlist entry.
        pub fn delete(id: impl Display) -> String {
            format!("/wishlist/{id}")
        }

        /// Move a wishlist entry into the cart.
        pub fn move_to_cart(id: impl Display) -> String {
            format!("/move-to-cart/{id}")
        }
    }
}

/// Core reference-data endpoints.
pub mod core {
    /// Channel/store configuration.
    pub const CONFIG: &str = "/config";
    /// Switch the active currency.
    pub const SWITCH_CURRENCY: &str = "/switch-currency";
    /// Switch the active locale.
    pub const SWITCH_LOCALE: &str = "/switch-locale";
    /// Available locales.
    pub const LOCALES: &str = "/locales";
    /// Available currencies.
    pub const CURRENCIES: &str = "/currencies";
    /// Countries reference list.
    pub const COUNTRIES: &str = "/countries";
    /// States per country.
    pub const COUNTRY_STATES: &str = "/country-states";
    /// Sales channels.
    pub const CHANNELS: &str = "/channels";
    /// Home page slider content.
    pub const SLIDERS: &str = "/sliders";
    /// Deliverable cities.
    pub const CITIES: &str = "/cities";
    /// Default city.
    pub const CITIES_DEFAULT: &str = "/cities/default";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parametrized_paths() {
        assert_eq!(products::detail(7), "/products/7");
        assert_eq!(products::detail("sku-9"), "/products/sku-9");
        assert_eq!(cart::add(3), "/checkout/cart/add/3");
        assert_eq!(customer::orders::cancel(12), "/orders/12/cancel");
        assert_eq!(customer::wishlist::move_to_cart(5), "/move-to-cart/5");
    }

    #[test]
    fn test_endpoint_definition() {
        let endpoint = Endpoint::new("/orders/:id", HttpMethod::Get).authenticated();
        assert_eq!(endpoint.path, "/orders/:id");
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert!(endpoint.authenticated);
    }
}
