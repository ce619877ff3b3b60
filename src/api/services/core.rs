//
//  bagisto-storefront
//  api/services/core.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Core reference data: locales, currencies, countries, channels and home
//! page content.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::common::ApiResponse;
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::services::categories::Category;

/// A storefront locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    /// Locale id.
    pub id: u64,

    /// Locale code, e.g. `en` or `ru`.
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Text direction, `ltr` or `rtl`.
    #[serde(default)]
    pub direction: String,

    /// Flag image URL, when configured.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A storefront currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// Currency id.
    pub id: u64,

    /// ISO currency code, e.g. `USD`.
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Currency symbol, e.g. `$`.
    #[serde(default)]
    pub symbol: String,
}

/// A country in the reference list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// Country id.
    pub id: u64,

    /// ISO country code.
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A state or region within a country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryState {
    /// State id.
    pub id: u64,

    /// ISO code of the owning country.
    #[serde(default)]
    pub country_code: String,

    /// State code.
    #[serde(default)]
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub default_name: String,
}

/// A sales channel with its defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Channel id.
    pub id: u64,

    /// Channel code.
    pub code: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Description, when configured.
    #[serde(default)]
    pub description: Option<String>,

    /// Active theme name.
    #[serde(default)]
    pub theme: String,

    /// Hostname the channel is served from.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Logo URL, when configured.
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Favicon URL, when configured.
    #[serde(default)]
    pub favicon_url: Option<String>,

    /// Default locale of the channel.
    #[serde(default)]
    pub default_locale: Option<Locale>,

    /// Base currency of the channel.
    #[serde(default)]
    pub base_currency: Option<Currency>,

    /// Root category of the channel's catalog.
    #[serde(default)]
    pub root_category: Option<Category>,

    /// Locales enabled on the channel.
    #[serde(default)]
    pub locales: Vec<Locale>,

    /// Currencies enabled on the channel.
    #[serde(default)]
    pub currencies: Vec<Currency>,
}

/// A home page slider entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    /// Slider id.
    pub id: u64,

    /// Headline, when configured.
    #[serde(default)]
    pub title: Option<String>,

    /// Banner image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Rich-text content, when configured.
    #[serde(default)]
    pub content: Option<String>,

    /// Sort position among slides.
    #[serde(default)]
    pub sort_order: i64,
}

/// A deliverable city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    /// City id.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// City code, when configured.
    #[serde(default)]
    pub code: Option<String>,

    /// Whether this is the default city.
    #[serde(default)]
    pub is_default: bool,
}

/// Core reference data operations.
pub struct CoreService {
    client: Arc<ApiClient>,
}

impl CoreService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the raw channel/store configuration blob.
    ///
    /// The shape of this payload varies with the backend's installed
    /// modules, so it is exposed untyped.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn config(&self) -> Result<Value, ApiError> {
        self.client
            .get(endpoints::core::CONFIG, RequestOptions::default())
            .await
    }

    /// Lists the available locales.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn locales(&self) -> Result<Vec<Locale>, ApiError> {
        let response: ApiResponse<Vec<Locale>> = self
            .client
            .get(endpoints::core::LOCALES, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Lists the available currencies.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn currencies(&self) -> Result<Vec<Currency>, ApiError> {
        let response: ApiResponse<Vec<Currency>> = self
            .client
            .get(endpoints::core::CURRENCIES, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Lists the countries reference data.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        let response: ApiResponse<Vec<Country>> = self
            .client
            .get(endpoints::core::COUNTRIES, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Lists the states of a country.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn country_states(&self, country_code: &str) -> Result<Vec<CountryState>, ApiError> {
        let response: ApiResponse<Vec<CountryState>> = self
            .client
            .get(
                endpoints::core::COUNTRY_STATES,
                RequestOptions {
                    params: vec![("country".to_string(), country_code.to_string())],
                    ..Default::default()
                },
            )
            .await?;
        Ok(response.data)
    }

    /// Lists the sales channels.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn channels(&self) -> Result<Vec<Channel>, ApiError> {
        let response: ApiResponse<Vec<Channel>> = self
            .client
            .get(endpoints::core::CHANNELS, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Switches the active locale for the session.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn switch_locale(&self, code: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                endpoints::core::SWITCH_LOCALE,
                RequestOptions {
                    params: vec![("locale".to_string(), code.to_string())],
                    ..Default::default()
                },
            )
            .await
    }

    /// Switches the active currency for the session.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn switch_currency(&self, code: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                endpoints::core::SWITCH_CURRENCY,
                RequestOptions {
                    params: vec![("currency".to_string(), code.to_string())],
                    ..Default::default()
                },
            )
            .await
    }

    /// Lists the home page sliders.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn sliders(&self) -> Result<Vec<Slider>, ApiError> {
        let response: ApiResponse<Vec<Slider>> = self
            .client
            .get(endpoints::core::SLIDERS, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Lists the deliverable cities.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn cities(&self) -> Result<Vec<City>, ApiError> {
        let response: ApiResponse<Vec<City>> = self
            .client
            .get(endpoints::core::CITIES, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Fetches the default city.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn default_city(&self) -> Result<City, ApiError> {
        let response: ApiResponse<City> = self
            .client
            .get(endpoints::core::CITIES_DEFAULT, RequestOptions::default())
            .await?;
        Ok(response.data)
    }
}
