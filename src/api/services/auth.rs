//
//  bagisto-storefront
//  api/services/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Customer session and profile operations.
//!
//! Login stores the issued bearer token in the [`TokenStore`] so the auth
//! middleware picks it up on the next request; logout clears it even when
//! the server call fails, so a stale token never lingers locally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::common::{ApiResponse, MessageResponse};
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::auth::{validate_token, TokenStore};

/// A storefront customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Customer id.
    pub id: u64,

    /// Account email address.
    pub email: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Full display name.
    #[serde(default)]
    pub name: String,

    /// Self-reported gender, when provided.
    #[serde(default)]
    pub gender: Option<String>,

    /// Date of birth, when provided.
    #[serde(default)]
    pub date_of_birth: Option<String>,

    /// Phone number, when provided.
    #[serde(default)]
    pub phone: Option<String>,

    /// Avatar URL, when provided.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Whether the account is active.
    #[serde(default)]
    pub status: bool,

    /// Whether the email address has been verified.
    #[serde(default)]
    pub is_verified: bool,

    /// Whether the customer subscribed to the newsletter.
    #[serde(default)]
    pub subscribed_to_news_letter: bool,

    /// Account creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last account update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Credentials for [`AuthService::login`].
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,

    /// Account password.
    pub password: String,

    /// Device label shown in the customer's session list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Successful login payload: the customer, a message and the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The authenticated customer.
    pub data: Customer,

    /// Human-readable outcome message.
    #[serde(default)]
    pub message: Option<String>,

    /// The issued bearer token.
    pub token: String,
}

/// Payload for [`AuthService::register`].
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Account email address.
    pub email: String,

    /// Chosen password.
    pub password: String,

    /// Password repeated for confirmation.
    pub password_confirmation: String,
}

/// Payload for [`AuthService::update_profile`]. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileRequest {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New gender value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// New date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Current password, required when changing the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,

    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,

    /// New password repeated for confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password_confirmation: Option<String>,
}

/// Payload for [`AuthService::forgot_password`].
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    /// Email address to send the reset link to.
    pub email: String,
}

/// Customer session and profile operations.
pub struct AuthService {
    client: Arc<ApiClient>,
    tokens: TokenStore,
}

impl AuthService {
    /// Creates the service over a shared client and token store.
    pub fn new(client: Arc<ApiClient>, tokens: TokenStore) -> Self {
        Self { client, tokens }
    }

    /// Logs a customer in and stores the issued token.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the credentials are
    /// rejected or the call fails.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .client
            .post(endpoints::auth::LOGIN, credentials, RequestOptions::default())
            .await?;

        if validate_token(&response.token) {
            if let Err(err) = self.tokens.set(&response.token) {
                tracing::warn!("could not persist auth token: {err:#}");
            }
        }

        Ok(response)
    }

    /// Registers a new customer account.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; validation problems carry
    /// field-level entries.
    pub async fn register(&self, data: &RegisterRequest) -> Result<ApiResponse<Customer>, ApiError> {
        self.client
            .post(endpoints::auth::REGISTER, data, RequestOptions::default())
            .await
    }

    /// Logs the customer out.
    ///
    /// The locally stored token is cleared even when the server call
    /// fails, so a rejected or expired session never leaves a stale token
    /// behind.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] from the server call.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let result = self
            .client
            .get(endpoints::auth::LOGOUT, RequestOptions::default())
            .await;

        if let Err(err) = self.tokens.clear() {
            tracing::warn!("could not clear auth token: {err:#}");
        }

        result
    }

    /// Fetches the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; `http.401` when no valid
    /// session exists.
    pub async fn profile(&self) -> Result<Customer, ApiError> {
        let response: ApiResponse<Customer> = self
            .client
            .get(endpoints::auth::PROFILE, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Updates the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; validation problems carry
    /// field-level entries.
    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> Result<Customer, ApiError> {
        let response: ApiResponse<Customer> = self
            .client
            .put(endpoints::auth::UPDATE_PROFILE, data, RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] from the server call.
    pub async fn forgot_password(
        &self,
        data: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.client
            .post(
                endpoints::auth::FORGOT_PASSWORD,
                data,
                RequestOptions::default(),
            )
            .await
    }

    /// Whether a token is currently stored locally.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// The locally stored token, if any.
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }
}
