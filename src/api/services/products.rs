//
//  bagisto-storefront
//  api/services/products.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Catalog product types and operations.
//!
//! Products are the core catalog resource. Simple products stand alone;
//! configurable products carry super attributes (size, color, …) whose
//! option combinations resolve to concrete variants.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::common::{ApiResponse, PaginatedResponse};
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::services::categories::Category;

/// Product type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Standalone product with one SKU.
    Simple,
    /// Product with selectable attribute combinations.
    Configurable,
    /// Fixed bundle of other products.
    Bundle,
    /// Loose grouping of related products.
    Grouped,
    /// Digitally delivered product.
    Downloadable,
    /// Non-shippable product.
    Virtual,
    /// Time-slot or event product.
    Booking,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: u64,

    /// Stock-keeping unit.
    pub sku: String,

    /// Product type discriminator.
    #[serde(rename = "type")]
    pub product_type: ProductType,

    /// Display name.
    pub name: String,

    /// URL slug.
    #[serde(default)]
    pub url_key: String,

    /// Current price in the active currency.
    #[serde(default)]
    pub price: f64,

    /// Price formatted for display.
    #[serde(default)]
    pub formatted_price: String,

    /// Short description shown in listings.
    #[serde(default)]
    pub short_description: String,

    /// Full description shown on the product page.
    #[serde(default)]
    pub description: String,

    /// Gallery images.
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Primary image.
    #[serde(default)]
    pub base_image: Option<ProductImage>,

    /// Product videos.
    #[serde(default)]
    pub videos: Vec<ProductVideo>,

    /// Whether the product can be ordered right now.
    #[serde(default)]
    pub in_stock: bool,

    /// Whether the authenticated customer has wishlisted this product.
    #[serde(default)]
    pub is_saved: bool,

    /// Whether the product carries the "new" badge.
    #[serde(default)]
    pub is_new: bool,

    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub is_featured: bool,

    /// Discounted price, when a special price is active.
    #[serde(default)]
    pub special_price: Option<f64>,

    /// Discounted price formatted for display.
    #[serde(default)]
    pub formatted_special_price: Option<String>,

    /// Start of the special price window.
    #[serde(default)]
    pub special_price_from: Option<String>,

    /// End of the special price window.
    #[serde(default)]
    pub special_price_to: Option<String>,

    /// Aggregated review figures.
    #[serde(default)]
    pub reviews: Option<ReviewSummary>,

    /// Categories the product belongs to.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Selectable attributes, for configurable products.
    #[serde(default)]
    pub super_attributes: Option<Vec<SuperAttribute>>,

    /// Concrete variants, for configurable products.
    #[serde(default)]
    pub variants: Option<Vec<ProductVariant>>,
}

/// Aggregated review figures for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Number of reviews.
    #[serde(default)]
    pub total: u64,

    /// Sum of all ratings.
    #[serde(default)]
    pub total_rating: f64,

    /// Average rating.
    #[serde(default)]
    pub average_rating: f64,
}

/// A product image in its rendered sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image id.
    #[serde(default)]
    pub id: u64,

    /// Storage path.
    #[serde(default)]
    pub path: String,

    /// Canonical URL.
    #[serde(default)]
    pub url: String,

    /// Original upload URL.
    #[serde(default)]
    pub original_image_url: String,

    /// Thumbnail URL.
    #[serde(default)]
    pub small_image_url: String,

    /// Listing-size URL.
    #[serde(default)]
    pub medium_image_url: String,

    /// Zoom-size URL.
    #[serde(default)]
    pub large_image_url: String,
}

/// A product video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVideo {
    /// Video id.
    pub id: u64,

    /// Video kind as reported by the backend.
    #[serde(rename = "type", default)]
    pub video_type: String,

    /// Video URL.
    #[serde(default)]
    pub url: String,
}

/// A selectable attribute on a configurable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperAttribute {
    /// Attribute id.
    pub id: u64,

    /// Attribute code, e.g. `size`.
    pub code: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Swatch rendering hint, when configured.
    #[serde(default)]
    pub swatch_type: Option<String>,

    /// Selectable options.
    #[serde(default)]
    pub options: Vec<AttributeOption>,
}

/// One selectable option of a super attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeOption {
    /// Option id.
    pub id: u64,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Swatch value (color code or image path), when configured.
    #[serde(default)]
    pub swatch_value: Option<String>,

    /// Variant product ids this option resolves to.
    #[serde(default)]
    pub products: Vec<u64>,
}

/// A concrete variant of a configurable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant product id.
    pub id: u64,

    /// Variant SKU.
    #[serde(default)]
    pub sku: String,

    /// Variant display name.
    #[serde(default)]
    pub name: String,

    /// Variant price.
    #[serde(default)]
    pub price: f64,

    /// Variant price formatted for display.
    #[serde(default)]
    pub formatted_price: String,

    /// Whether the variant can be ordered.
    #[serde(default)]
    pub in_stock: bool,

    /// Variant images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// One extra attribute row shown on a product page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAdditionalInfo {
    /// Attribute id.
    pub id: u64,

    /// Attribute code.
    pub code: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Attribute value; a string or a list of strings.
    #[serde(default)]
    pub value: Value,

    /// Internal admin label.
    #[serde(default)]
    pub admin_name: String,
}

/// Variant matrix for a configurable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfigurableConfig {
    /// Selectable attributes and their options.
    #[serde(default)]
    pub attributes: Vec<ConfigAttribute>,

    /// Prices per variant id.
    #[serde(default)]
    pub variant_prices: HashMap<String, VariantPrice>,

    /// Image URLs per variant id.
    #[serde(default)]
    pub variant_images: HashMap<String, Vec<String>>,
}

/// A selectable attribute inside the variant matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigAttribute {
    /// Attribute id.
    pub id: u64,

    /// Attribute code.
    pub code: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Options with the variant ids they resolve to.
    #[serde(default)]
    pub options: Vec<ConfigAttributeOption>,
}

/// One option inside the variant matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigAttributeOption {
    /// Option id.
    pub id: u64,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Variant product ids this option resolves to.
    #[serde(default)]
    pub products: Vec<u64>,
}

/// Regular and final price of a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantPrice {
    /// Undiscounted price.
    pub regular_price: PriceDetail,

    /// Price after active discounts.
    pub final_price: PriceDetail,
}

/// A price with its display formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDetail {
    /// Numeric amount.
    pub price: f64,

    /// Amount formatted for display.
    #[serde(default)]
    pub formatted_price: String,
}

/// Filters for [`ProductsService::list`]. Only set fields become query
/// parameters.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// 1-based page number.
    pub page: Option<u32>,

    /// Items per page.
    pub limit: Option<u32>,

    /// Restrict to one category.
    pub category_id: Option<u64>,

    /// Full-text search term.
    pub search: Option<String>,

    /// Sort field, e.g. `name` or `price`.
    pub sort: Option<String>,

    /// Sort direction, `asc` or `desc`.
    pub order: Option<String>,

    /// Only products carrying the "new" badge.
    pub new: bool,

    /// Only featured products.
    pub featured: bool,

    /// Restrict to one brand.
    pub brand: Option<String>,
}

impl ProductFilters {
    /// Renders the set fields as query parameters, in a fixed order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("category_id".to_string(), category_id.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if self.new {
            params.push(("new".to_string(), "1".to_string()));
        }
        if self.featured {
            params.push(("featured".to_string(), "1".to_string()));
        }
        if let Some(brand) = &self.brand {
            // the backend exposes brand as dynamic attribute 25
            params.push(("attribute_25".to_string(), brand.clone()));
        }
        params
    }
}

/// Catalog product operations.
pub struct ProductsService {
    client: Arc<ApiClient>,
}

impl ProductsService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists products matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn list(
        &self,
        filters: ProductFilters,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        let options = RequestOptions {
            params: filters.to_query(),
            ..Default::default()
        };
        self.client.get(endpoints::products::LIST, options).await
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; `http.404` for unknown ids.
    pub async fn by_id(&self, id: u64) -> Result<Product, ApiError> {
        let response: ApiResponse<Product> = self
            .client
            .get(&endpoints::products::detail(id), RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Fetches the extra attribute rows for a product page.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn additional_info(&self, id: u64) -> Result<Vec<ProductAdditionalInfo>, ApiError> {
        let response: ApiResponse<Vec<ProductAdditionalInfo>> = self
            .client
            .get(
                &endpoints::products::additional_info(id),
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Fetches the variant matrix for a configurable product.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn configurable_config(
        &self,
        id: u64,
    ) -> Result<ProductConfigurableConfig, ApiError> {
        let response: ApiResponse<ProductConfigurableConfig> = self
            .client
            .get(
                &endpoints::products::configurable_config(id),
                RequestOptions::default(),
            )
            .await?;
        Ok(response.data)
    }

    /// Fetches the featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn featured(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        let page = self
            .list(ProductFilters {
                featured: true,
                limit: Some(limit),
                ..Default::default()
            })
            .await?;
        Ok(page.data)
    }

    /// Fetches the newest products for the home page.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn new_arrivals(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        let page = self
            .list(ProductFilters {
                new: true,
                limit: Some(limit),
                ..Default::default()
            })
            .await?;
        Ok(page.data)
    }

    /// Lists products within one category.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn by_category(
        &self,
        category_id: u64,
        filters: ProductFilters,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.list(ProductFilters {
            category_id: Some(category_id),
            ..filters
        })
        .await
    }

    /// Searches the catalog.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn search(
        &self,
        query: &str,
        filters: ProductFilters,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.list(ProductFilters {
            search: Some(query.to_string()),
            ..filters
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_render_in_fixed_order() {
        let filters = ProductFilters {
            page: Some(2),
            limit: Some(12),
            featured: true,
            brand: Some("acme".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "12".to_string()),
                ("featured".to_string(), "1".to_string()),
                ("attribute_25".to_string(), "acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filters_render_nothing() {
        assert!(ProductFilters::default().to_query().is_empty());
    }
}
