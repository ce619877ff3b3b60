//
//  bagisto-storefront
//  api/services/cart.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shopping cart types and operations.
//!
//! The cart is session-bound: guests get one through the session cookie,
//! authenticated customers through their token. All pricing on the cart
//! (totals, tax, discounts) is computed server-side and read back here.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::common::ApiResponse;
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::services::checkout::{Address, Payment, ShippingRate};
use crate::api::services::products::Product;

/// The shopper's cart with server-computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart id.
    pub id: u64,

    /// Customer email, when known.
    #[serde(default)]
    pub customer_email: Option<String>,

    /// Customer given name, when known.
    #[serde(default)]
    pub customer_first_name: Option<String>,

    /// Customer family name, when known.
    #[serde(default)]
    pub customer_last_name: Option<String>,

    /// Selected shipping method code, when chosen.
    #[serde(default)]
    pub shipping_method: Option<String>,

    /// Applied coupon code, when any.
    #[serde(default)]
    pub coupon_code: Option<String>,

    /// Whether the order is flagged as a gift.
    #[serde(default)]
    pub is_gift: bool,

    /// Number of distinct items.
    #[serde(default)]
    pub items_count: u64,

    /// Total quantity across items.
    #[serde(default)]
    pub items_qty: f64,

    /// Base currency of the channel.
    #[serde(default)]
    pub base_currency_code: String,

    /// Currency of the channel.
    #[serde(default)]
    pub channel_currency_code: String,

    /// Currency the cart is priced in.
    #[serde(default)]
    pub cart_currency_code: String,

    /// Grand total in the cart currency.
    #[serde(default)]
    pub grand_total: f64,

    /// Grand total formatted for display.
    #[serde(default)]
    pub formatted_grand_total: String,

    /// Grand total in the base currency.
    #[serde(default)]
    pub base_grand_total: f64,

    /// Base grand total formatted for display.
    #[serde(default)]
    pub formatted_base_grand_total: String,

    /// Subtotal before tax and discounts.
    #[serde(default)]
    pub sub_total: f64,

    /// Subtotal formatted for display.
    #[serde(default)]
    pub formatted_sub_total: String,

    /// Subtotal in the base currency.
    #[serde(default)]
    pub base_sub_total: f64,

    /// Base subtotal formatted for display.
    #[serde(default)]
    pub formatted_base_sub_total: String,

    /// Tax total.
    #[serde(default)]
    pub tax_total: f64,

    /// Tax total formatted for display.
    #[serde(default)]
    pub formatted_tax_total: String,

    /// Tax total in the base currency.
    #[serde(default)]
    pub base_tax_total: f64,

    /// Base tax total formatted for display.
    #[serde(default)]
    pub formatted_base_tax_total: String,

    /// Discount amount.
    #[serde(default)]
    pub discount_amount: f64,

    /// Discount amount formatted for display.
    #[serde(default)]
    pub formatted_discount_amount: String,

    /// Discount amount in the base currency.
    #[serde(default)]
    pub base_discount_amount: f64,

    /// Base discount amount formatted for display.
    #[serde(default)]
    pub formatted_base_discount_amount: String,

    /// Items in the cart.
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Billing address, once saved.
    #[serde(default)]
    pub billing_address: Option<Address>,

    /// Shipping address, once saved.
    #[serde(default)]
    pub shipping_address: Option<Address>,

    /// Selected shipping rate, once chosen.
    #[serde(default)]
    pub selected_shipping_rate: Option<ShippingRate>,

    /// Selected payment method, once chosen.
    #[serde(default)]
    pub payment: Option<Payment>,
}

/// One line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart item id (distinct from the product id).
    pub id: u64,

    /// Quantity of this line.
    #[serde(default)]
    pub quantity: f64,

    /// SKU of the purchased variant.
    #[serde(default)]
    pub sku: String,

    /// Product type of the line.
    #[serde(rename = "type", default)]
    pub item_type: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Coupon applied to this line, when any.
    #[serde(default)]
    pub coupon_code: Option<String>,

    /// Unit weight.
    #[serde(default)]
    pub weight: f64,

    /// Line weight.
    #[serde(default)]
    pub total_weight: f64,

    /// Unit price.
    #[serde(default)]
    pub price: f64,

    /// Unit price formatted for display.
    #[serde(default)]
    pub formatted_price: String,

    /// Unit price in the base currency.
    #[serde(default)]
    pub base_price: f64,

    /// Base unit price formatted for display.
    #[serde(default)]
    pub formatted_base_price: String,

    /// Line total.
    #[serde(default)]
    pub total: f64,

    /// Line total formatted for display.
    #[serde(default)]
    pub formatted_total: String,

    /// Line total in the base currency.
    #[serde(default)]
    pub base_total: f64,

    /// Base line total formatted for display.
    #[serde(default)]
    pub formatted_base_total: String,

    /// Tax percentage applied to this line.
    #[serde(default)]
    pub tax_percent: f64,

    /// Tax amount for this line.
    #[serde(default)]
    pub tax_amount: f64,

    /// Tax amount formatted for display.
    #[serde(default)]
    pub formatted_tax_amount: String,

    /// Discount percentage applied to this line.
    #[serde(default)]
    pub discount_percent: f64,

    /// Discount amount for this line.
    #[serde(default)]
    pub discount_amount: f64,

    /// Discount amount formatted for display.
    #[serde(default)]
    pub formatted_discount_amount: String,

    /// Product id of the line.
    #[serde(default)]
    pub product_id: u64,

    /// The full product entity.
    #[serde(default)]
    pub product: Option<Product>,

    /// Type-specific extras (selected options, booking slots, …).
    #[serde(default)]
    pub additional: HashMap<String, Value>,
}

/// Payload for [`CartService::add`].
#[derive(Debug, Clone, Serialize)]
pub struct AddToCartRequest {
    /// Product to add.
    pub product_id: u64,

    /// Quantity to add.
    pub quantity: u32,

    /// Chosen variant id, for configurable products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_configurable_option: Option<u64>,

    /// Chosen super-attribute options, for configurable products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_attribute: Option<HashMap<String, u64>>,

    /// Chosen bundle options, for bundle products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_options: Option<HashMap<String, Vec<u64>>>,

    /// Quantities per bundle option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_option_qty: Option<HashMap<String, u32>>,

    /// Chosen downloadable links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<u64>>,

    /// Quantities per grouped-product member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<HashMap<String, u32>>,

    /// Booking slot selection, for booking products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<HashMap<String, Value>>,
}

impl AddToCartRequest {
    /// Creates a plain add-to-cart payload for a simple product.
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            selected_configurable_option: None,
            super_attribute: None,
            bundle_options: None,
            bundle_option_qty: None,
            links: None,
            qty: None,
            booking: None,
        }
    }
}

/// Payload for [`CartService::update`].
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartRequest {
    /// New quantity per cart item id.
    pub qty: HashMap<String, u32>,
}

/// Shopping cart operations.
pub struct CartService {
    client: Arc<ApiClient>,
}

impl CartService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the current cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn cart(&self) -> Result<Cart, ApiError> {
        let response: ApiResponse<Cart> = self
            .client
            .get(endpoints::cart::GET, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Adds a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; out-of-stock and option
    /// validation problems carry field-level entries.
    pub async fn add(&self, request: &AddToCartRequest) -> Result<Cart, ApiError> {
        let response: ApiResponse<Cart> = self
            .client
            .post(
                &endpoints::cart::add(request.product_id),
                request,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Updates item quantities, keyed by cart item id.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn update(&self, quantities: HashMap<String, u32>) -> Result<Cart, ApiError> {
        let payload = UpdateCartRequest { qty: quantities };
        let response: ApiResponse<Cart> = self
            .client
            .put(endpoints::cart::UPDATE, &payload, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Removes a single item from the cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn remove_item(&self, cart_item_id: u64) -> Result<Cart, ApiError> {
        let response: ApiResponse<Cart> = self
            .client
            .delete(
                &endpoints::cart::remove_item(cart_item_id),
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn clear(&self) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .delete(endpoints::cart::CLEAR, RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Applies a coupon code to the cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; invalid codes surface as
    /// validation errors.
    pub async fn apply_coupon(&self, code: &str) -> Result<Cart, ApiError> {
        let payload = serde_json::json!({ "code": code });
        let response: ApiResponse<Cart> = self
            .client
            .post(
                endpoints::cart::APPLY_COUPON,
                &payload,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Removes the applied coupon from the cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn remove_coupon(&self) -> Result<Cart, ApiError> {
        let response: ApiResponse<Cart> = self
            .client
            .delete(endpoints::cart::REMOVE_COUPON, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Moves a cart item to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn move_to_wishlist(&self, cart_item_id: u64) -> Result<(), ApiError> {
        let _: Value = self
            .client
            .post(
                &endpoints::cart::move_to_wishlist(cart_item_id),
                &serde_json::json!({}),
                RequestOptions::default(),
            )
            .await?;
        Ok(())
    }
}
