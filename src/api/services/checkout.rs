//
//  bagisto-storefront
//  api/services/checkout.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Checkout flow types and operations.
//!
//! Checkout is a strict four-step sequence against the server-held cart:
//! save addresses (returns the available shipping methods), save the
//! shipping choice (returns the available payment methods), save the
//! payment choice, then place the order. Each step validates the previous
//! ones server-side.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::common::ApiResponse;
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::services::cart::Cart;

/// A postal address on a cart or order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Address id, when persisted in the address book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Owning customer id, when persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,

    /// Recipient given name.
    pub first_name: String,

    /// Recipient family name.
    pub last_name: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// Company name, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// VAT identifier, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,

    /// Street address lines.
    #[serde(default)]
    pub address1: Vec<String>,

    /// Additional address line, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    /// City name.
    #[serde(default)]
    pub city: String,

    /// State or region.
    #[serde(default)]
    pub state: String,

    /// ISO country code.
    #[serde(default)]
    pub country: String,

    /// Postal code.
    #[serde(default)]
    pub postcode: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: String,

    /// Whether this is the customer's default address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// A shipping carrier's method with its rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Method code, e.g. `flatrate`.
    pub method: String,

    /// Display title.
    #[serde(default)]
    pub method_title: String,

    /// Concrete rates offered under this method.
    #[serde(default)]
    pub rates: Vec<ShippingRate>,
}

/// One concrete shipping rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRate {
    /// Carrier code.
    #[serde(default)]
    pub carrier: String,

    /// Carrier display title.
    #[serde(default)]
    pub carrier_title: String,

    /// Method code, e.g. `flatrate_flatrate`.
    pub method: String,

    /// Method display title.
    #[serde(default)]
    pub method_title: String,

    /// Longer description of the rate.
    #[serde(default)]
    pub method_description: String,

    /// Price of the rate.
    #[serde(default)]
    pub price: f64,

    /// Price formatted for display.
    #[serde(default)]
    pub formatted_price: String,

    /// Price in the base currency.
    #[serde(default)]
    pub base_price: f64,

    /// Base price formatted for display.
    #[serde(default)]
    pub formatted_base_price: String,
}

/// An available payment method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Method code, e.g. `cashondelivery`.
    pub method: String,

    /// Display title.
    #[serde(default)]
    pub method_title: String,

    /// Longer description shown during checkout.
    #[serde(default)]
    pub description: String,

    /// Sort position among methods.
    #[serde(default)]
    pub sort: i64,
}

/// The payment selection recorded on a cart or order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment record id.
    #[serde(default)]
    pub id: u64,

    /// Method code.
    pub method: String,

    /// Method display title.
    #[serde(default)]
    pub method_title: String,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: u64,

    /// Human-facing order number.
    #[serde(default)]
    pub increment_id: String,

    /// Order state code.
    #[serde(default)]
    pub status: String,

    /// Order state label for display.
    #[serde(default)]
    pub status_label: String,

    /// Channel the order was placed on.
    #[serde(default)]
    pub channel_name: String,

    /// Whether the order was placed by a guest.
    #[serde(default)]
    pub is_guest: bool,

    /// Customer email.
    #[serde(default)]
    pub customer_email: String,

    /// Customer given name.
    #[serde(default)]
    pub customer_first_name: String,

    /// Customer family name.
    #[serde(default)]
    pub customer_last_name: String,

    /// Chosen shipping method code.
    #[serde(default)]
    pub shipping_method: String,

    /// Chosen shipping method title.
    #[serde(default)]
    pub shipping_title: String,

    /// Applied coupon code, when any.
    #[serde(default)]
    pub coupon_code: Option<String>,

    /// Number of distinct items.
    #[serde(default)]
    pub total_item_count: u64,

    /// Total quantity ordered.
    #[serde(default)]
    pub total_qty_ordered: f64,

    /// Currency the order is priced in.
    #[serde(default)]
    pub order_currency_code: String,

    /// Grand total.
    #[serde(default)]
    pub grand_total: f64,

    /// Grand total formatted for display.
    #[serde(default)]
    pub formatted_grand_total: String,

    /// Subtotal before tax and discounts.
    #[serde(default)]
    pub sub_total: f64,

    /// Subtotal formatted for display.
    #[serde(default)]
    pub formatted_sub_total: String,

    /// Tax amount.
    #[serde(default)]
    pub tax_amount: f64,

    /// Tax amount formatted for display.
    #[serde(default)]
    pub formatted_tax_amount: String,

    /// Discount amount.
    #[serde(default)]
    pub discount_amount: f64,

    /// Discount amount formatted for display.
    #[serde(default)]
    pub formatted_discount_amount: String,

    /// Shipping cost.
    #[serde(default)]
    pub shipping_amount: f64,

    /// Shipping cost formatted for display.
    #[serde(default)]
    pub formatted_shipping_amount: String,

    /// Shipping address.
    #[serde(default)]
    pub shipping_address: Option<Address>,

    /// Billing address.
    #[serde(default)]
    pub billing_address: Option<Address>,

    /// Ordered items.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Payment selection.
    #[serde(default)]
    pub payment: Option<Payment>,

    /// Placement timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Order item id.
    pub id: u64,

    /// SKU of the purchased variant.
    #[serde(default)]
    pub sku: String,

    /// Product type of the line.
    #[serde(rename = "type", default)]
    pub item_type: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Quantity ordered.
    #[serde(default)]
    pub qty_ordered: f64,

    /// Quantity already shipped.
    #[serde(default)]
    pub qty_shipped: f64,

    /// Quantity already invoiced.
    #[serde(default)]
    pub qty_invoiced: f64,

    /// Quantity canceled.
    #[serde(default)]
    pub qty_canceled: f64,

    /// Quantity refunded.
    #[serde(default)]
    pub qty_refunded: f64,

    /// Unit price.
    #[serde(default)]
    pub price: f64,

    /// Unit price formatted for display.
    #[serde(default)]
    pub formatted_price: String,

    /// Line total.
    #[serde(default)]
    pub total: f64,

    /// Line total formatted for display.
    #[serde(default)]
    pub formatted_total: String,

    /// Tax amount for this line.
    #[serde(default)]
    pub tax_amount: f64,

    /// Discount amount for this line.
    #[serde(default)]
    pub discount_amount: f64,
}

/// One address block of [`CheckoutAddressRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct AddressInput {
    /// Street address lines.
    pub address1: Vec<String>,

    /// City name.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub postcode: String,

    /// ISO country code.
    pub country: String,

    /// Contact phone number.
    pub phone: String,

    /// Contact email.
    pub email: String,

    /// Recipient given name.
    pub first_name: String,

    /// Recipient family name.
    pub last_name: String,

    /// Company name, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Billing only: reuse this address for shipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_for_shipping: Option<bool>,

    /// Persist this address into the customer's address book.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_as_address: Option<bool>,
}

/// Payload for [`CheckoutService::save_address`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutAddressRequest {
    /// Billing address; may double as the shipping address.
    pub billing: AddressInput,

    /// Shipping address, when not reusing the billing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<AddressInput>,
}

/// Payload for [`CheckoutService::save_shipping`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutShippingRequest {
    /// Chosen shipping rate code, e.g. `flatrate_flatrate`.
    pub shipping_method: String,
}

/// Payload for [`CheckoutService::save_payment`].
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutPaymentRequest {
    /// Chosen payment method.
    pub payment: PaymentSelection,
}

/// The payment selection inside [`CheckoutPaymentRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSelection {
    /// Payment method code.
    pub method: String,
}

/// Result of saving addresses: the updated cart and the shipping methods
/// now available for it.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAddressData {
    /// The updated cart.
    pub cart: Cart,

    /// Shipping methods available for the addresses.
    #[serde(rename = "shippingMethods", default)]
    pub shipping_methods: Vec<ShippingMethod>,
}

/// Result of saving the shipping choice: the updated cart and the payment
/// methods now available for it.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveShippingData {
    /// The updated cart.
    pub cart: Cart,

    /// Payment methods available for the chosen shipping.
    #[serde(rename = "paymentMethods", default)]
    pub payment_methods: Vec<PaymentMethod>,
}

/// Result of saving the payment choice.
#[derive(Debug, Clone, Deserialize)]
pub struct SavePaymentData {
    /// The updated cart.
    pub cart: Cart,
}

/// Result of placing the order.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveOrderData {
    /// The placed order.
    pub order: Order,
}

/// Result of the minimum-order check.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumOrderData {
    /// Whether the cart satisfies the minimum order amount.
    pub status: bool,

    /// Human-readable explanation.
    #[serde(default)]
    pub message: String,
}

/// Checkout flow operations.
pub struct CheckoutService {
    client: Arc<ApiClient>,
}

impl CheckoutService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Saves the billing (and optionally shipping) address.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; address validation problems
    /// carry field-level entries.
    pub async fn save_address(
        &self,
        request: &CheckoutAddressRequest,
    ) -> Result<SaveAddressData, ApiError> {
        let response: ApiResponse<SaveAddressData> = self
            .client
            .post(
                endpoints::checkout::SAVE_ADDRESS,
                request,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Saves the chosen shipping rate.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn save_shipping(
        &self,
        request: &CheckoutShippingRequest,
    ) -> Result<SaveShippingData, ApiError> {
        let response: ApiResponse<SaveShippingData> = self
            .client
            .post(
                endpoints::checkout::SAVE_SHIPPING,
                request,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Saves the chosen payment method.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn save_payment(
        &self,
        request: &CheckoutPaymentRequest,
    ) -> Result<SavePaymentData, ApiError> {
        let response: ApiResponse<SavePaymentData> = self
            .client
            .post(
                endpoints::checkout::SAVE_PAYMENT,
                request,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Places the order for the prepared cart.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when an earlier checkout step
    /// is missing or the call fails.
    pub async fn save_order(&self) -> Result<Order, ApiError> {
        let response: ApiResponse<SaveOrderData> = self
            .client
            .post(
                endpoints::checkout::SAVE_ORDER,
                &(),
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data.order)
    }

    /// Checks whether the cart satisfies the channel's minimum order
    /// amount.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn check_minimum_order(&self) -> Result<MinimumOrderData, ApiError> {
        let response: ApiResponse<MinimumOrderData> = self
            .client
            .get(
                endpoints::checkout::CHECK_MINIMUM_ORDER,
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }
}
