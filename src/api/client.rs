//
//  bagisto-storefront
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Storefront API
//!
//! This module provides the core HTTP client for interacting with a
//! headless Bagisto backend. It owns the client configuration and the
//! ordered middleware list, and orchestrates the middleware pipeline
//! around every network call.
//!
//! ## Features
//!
//! - Typed verb methods (`get`/`post`/`put`/`patch`/`delete`) and a
//!   registry-driven [`execute`](ApiClient::execute)
//! - Ordered request/response/error middleware with per-call skip lists
//! - `:name` path parameter substitution and ordered query strings
//! - Per-call timeouts enforced by request cancellation
//! - Structured error normalization into [`ApiError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bagisto_storefront::api::{ApiClient, ApiClientConfig, RequestOptions};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), bagisto_storefront::api::ApiError> {
//! let client = ApiClient::new(ApiClientConfig::new("https://shop.example.com/api"))
//!     .expect("client construction");
//!
//! let products: Value = client.get("/products", RequestOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::context::{
    ErrorContext, HttpMethod, RequestContext, RequestOptions, ResponseContext,
};
use crate::api::endpoints::Endpoint;
use crate::api::error::{parse_api_error, ApiError, RawError};
use crate::api::middleware::{
    run_error_middleware, run_request_middleware, run_response_middleware, ApiMiddleware,
};

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Cookie/credential policy for the underlying HTTP client.
///
/// The storefront backend tracks guest carts through a session cookie, so
/// browser-style credential inclusion matters. `SameOrigin` and `Include`
/// both enable the cookie jar (the same-origin restriction is a browser
/// concept with no server-side analog); `Omit` disables cookies entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsPolicy {
    /// Never send or store cookies.
    Omit,
    /// Send cookies with every request. The default.
    #[default]
    SameOrigin,
    /// Send cookies with every request, including cross-site ones.
    Include,
}

impl CredentialsPolicy {
    fn cookies_enabled(self) -> bool {
        !matches!(self, CredentialsPolicy::Omit)
    }
}

/// Configuration for an [`ApiClient`].
///
/// All optional fields resolve to their stated defaults and, apart from
/// the middleware list, are immutable for the client's lifetime.
///
/// # Example
///
/// ```rust
/// use bagisto_storefront::api::{ApiClientConfig, CredentialsPolicy};
///
/// let config = ApiClientConfig::new("https://shop.example.com/api")
///     .with_version("v1")
///     .with_timeout(10_000)
///     .with_header("Accept", "application/json")
///     .with_credentials(CredentialsPolicy::Include);
/// assert_eq!(config.timeout_ms, 10_000);
/// ```
pub struct ApiClientConfig {
    /// Base URL of the storefront API, e.g. `https://shop.example.com/api`.
    pub base_url: String,

    /// Optional API version segment inserted after the base URL.
    pub version: Option<String>,

    /// Default per-call timeout in milliseconds. Defaults to 30000.
    pub timeout_ms: u64,

    /// Default headers applied to every call (per-call headers win).
    pub headers: HashMap<String, String>,

    /// Cookie/credential policy. Defaults to [`CredentialsPolicy::SameOrigin`].
    pub credentials: CredentialsPolicy,

    /// Middleware registered at construction, in execution order.
    pub middleware: Vec<Arc<dyn ApiMiddleware>>,
}

impl ApiClientConfig {
    /// Creates a configuration with the stated defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            version: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            headers: HashMap::new(),
            credentials: CredentialsPolicy::default(),
            middleware: Vec::new(),
        }
    }

    /// Sets the API version segment (e.g. `"v1"`).
    ///
    /// An empty string is treated as no version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.version = if version.is_empty() { None } else { Some(version) };
        self
    }

    /// Sets the default per-call timeout in milliseconds.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Adds a default header applied to every call.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the cookie/credential policy.
    pub fn with_credentials(mut self, credentials: CredentialsPolicy) -> Self {
        self.credentials = credentials;
        self
    }

    /// Registers a middleware at the end of the chain.
    pub fn with_middleware(mut self, middleware: Arc<dyn ApiMiddleware>) -> Self {
        self.middleware.push(middleware);
        self
    }
}

/// The single configured entry point for all storefront HTTP calls.
///
/// The client is built once at application start and shared (typically
/// via `Arc`) by every domain service. Its configuration is immutable;
/// only the middleware list may change, through
/// [`use_middleware`](ApiClient::use_middleware) and
/// [`remove_middleware`](ApiClient::remove_middleware), which take
/// `&mut self` and are therefore confined to setup, before the client is
/// shared; concurrent mutation during in-flight requests is impossible
/// by construction.
///
/// # Pipeline
///
/// Every call runs the request middleware in registration order, then the
/// network call, then the response middleware in reverse order; on failure
/// the error middleware runs in registration order, short-circuiting on
/// suppression. See [`middleware`](crate::api::middleware) for the exact
/// contract.
pub struct ApiClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Base URL of the storefront API.
    base_url: String,
    /// Optional version path segment.
    version: Option<String>,
    /// Default per-call timeout in milliseconds.
    timeout_ms: u64,
    /// Default headers merged beneath per-call headers.
    headers: HashMap<String, String>,
    /// Ordered middleware chain.
    middleware: Vec<Arc<dyn ApiMiddleware>>,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("bagisto-storefront/{}", crate::VERSION))
            .cookie_store(config.credentials.cookies_enabled())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            version: config.version,
            timeout_ms: config.timeout_ms,
            headers: config.headers,
            middleware: config.middleware,
        })
    }

    /// Registers a middleware at the end of the chain.
    pub fn use_middleware(&mut self, middleware: Arc<dyn ApiMiddleware>) {
        self.middleware.push(middleware);
    }

    /// Removes every middleware with the given name.
    pub fn remove_middleware(&mut self, name: &str) {
        self.middleware.retain(|mw| mw.name() != name);
    }

    /// Makes a GET request to the given path.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Some(HttpMethod::Get),
                body: None,
                ..options
            },
        )
        .await
    }

    /// Makes a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure, including body serialization problems.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = serialize_body(body)?;
        self.request(
            path,
            RequestOptions {
                method: Some(HttpMethod::Post),
                body: Some(body),
                ..options
            },
        )
        .await
    }

    /// Makes a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure, including body serialization problems.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = serialize_body(body)?;
        self.request(
            path,
            RequestOptions {
                method: Some(HttpMethod::Put),
                body: Some(body),
                ..options
            },
        )
        .await
    }

    /// Makes a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure, including body serialization problems.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = serialize_body(body)?;
        self.request(
            path,
            RequestOptions {
                method: Some(HttpMethod::Patch),
                body: Some(body),
                ..options
            },
        )
        .await
    }

    /// Makes a DELETE request to the given path.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(
            path,
            RequestOptions {
                method: Some(HttpMethod::Delete),
                body: None,
                ..options
            },
        )
        .await
    }

    /// Executes a named [`Endpoint`], resolving its path and method.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport, HTTP or
    /// pipeline failure.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        options: ExecuteOptions,
    ) -> Result<T, ApiError> {
        self.request(
            &endpoint.path,
            RequestOptions {
                method: Some(endpoint.method),
                body: options.body,
                headers: options.headers,
                path_params: options.params,
                ..Default::default()
            },
        )
        .await
    }

    /// Performs one API call through the full middleware pipeline.
    ///
    /// Steps: build the URL, construct the request context with defaults
    /// resolved and headers merged, run the request chain, perform the
    /// network call, run the response chain in reverse, and deserialize
    /// the final payload. On failure at any stage the error is normalized
    /// once and handed to the error chain.
    async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.build_request_url(path, &options.path_params, &options.params);

        let RequestOptions {
            method,
            headers: call_headers,
            params,
            path_params,
            body,
            timeout,
            skip_middleware,
            meta,
        } = options;

        // Content-Type default < client defaults < per-call headers.
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in call_headers {
            headers.insert(name, value);
        }

        let context = RequestContext {
            url,
            request_id: String::new(),
            options: RequestOptions {
                method: Some(method.unwrap_or_default()),
                headers,
                params,
                path_params,
                body,
                timeout: Some(timeout.unwrap_or(self.timeout_ms)),
                skip_middleware,
                meta,
            },
        };

        match self.perform(context).await {
            Ok(response) => serde_json::from_value(response.data).map_err(|err| {
                parse_api_error(&RawError::Other(format!(
                    "failed to decode response payload: {err}"
                )))
            }),
            Err((raw, request)) => {
                let original = parse_api_error(&raw);
                let error_context = ErrorContext {
                    error: original.clone(),
                    request,
                    retry_count: 0,
                };
                match run_error_middleware(&self.middleware, error_context).await {
                    Some(handled) => Err(handled.error),
                    None => Err(original),
                }
            }
        }
    }

    /// Runs the request chain, the network call and the response chain.
    ///
    /// On failure, returns the raw error together with the request
    /// context as it stood when the failure was raised, for the error
    /// chain to observe.
    async fn perform(
        &self,
        context: RequestContext,
    ) -> Result<ResponseContext, (RawError, RequestContext)> {
        let before_chain = context.clone();
        let context = match run_request_middleware(&self.middleware, context).await {
            Ok(context) => context,
            Err(err) => return Err((RawError::Api(err), before_chain)),
        };

        let snapshot = context.clone();
        let (data, status, headers) = match self.execute_request(&context).await {
            Ok(result) => result,
            Err(err) => return Err((err, snapshot)),
        };

        let response_context = ResponseContext {
            data,
            status,
            headers,
            request: context,
        };
        match run_response_middleware(&self.middleware, response_context).await {
            Ok(context) => Ok(context),
            Err(err) => Err((RawError::Api(err), snapshot)),
        }
    }

    /// Performs the actual network call.
    ///
    /// The body is attached only for non-GET methods; the timeout is
    /// enforced by cancelling the in-flight request. Response bodies are
    /// parsed as JSON when the content type says so, otherwise carried as
    /// text. A non-2xx status raises [`RawError::Http`] with the status,
    /// reason phrase and any structured body the server sent.
    async fn execute_request(
        &self,
        context: &RequestContext,
    ) -> Result<(Value, u16, HashMap<String, String>), RawError> {
        let options = &context.options;
        let timeout = options.timeout.unwrap_or(self.timeout_ms);

        let mut request = self
            .http
            .request(to_reqwest_method(options.method()), &context.url)
            .timeout(Duration::from_millis(timeout));

        for (name, value) in &options.headers {
            request = request.header(name, value);
        }

        if let Some(body) = &options.body {
            if options.method() != HttpMethod::Get && !body.is_null() {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let is_json = headers
            .get("content-type")
            .is_some_and(|ct| ct.contains("application/json"));

        let text = response.text().await?;
        let data = if is_json {
            serde_json::from_str(&text)
                .map_err(|err| RawError::Other(format!("invalid JSON response body: {err}")))?
        } else {
            Value::String(text)
        };

        if !status.is_success() {
            return Err(RawError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: if is_json { Some(data) } else { None },
            });
        }

        Ok((data, status.as_u16(), headers))
    }

    /// Builds the final request URL.
    ///
    /// `:name` placeholders are substituted in the order of the supplied
    /// path parameters (first occurrence each); the base URL loses one
    /// trailing slash; the optional version segment and a leading slash
    /// on the path are inserted; query parameters are appended as a
    /// URL-encoded string in insertion order.
    fn build_request_url(
        &self,
        path: &str,
        path_params: &[(String, String)],
        query_params: &[(String, String)],
    ) -> String {
        let mut interpolated = path.to_string();
        for (key, value) in path_params {
            interpolated = interpolated.replacen(&format!(":{key}"), value, 1);
        }

        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let version = self
            .version
            .as_ref()
            .map(|v| format!("/{v}"))
            .unwrap_or_default();
        let clean_path = if interpolated.starts_with('/') {
            interpolated
        } else {
            format!("/{interpolated}")
        };

        let mut url = format!("{base}{version}{clean_path}");

        if !query_params.is_empty() {
            let query_string = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(
                    query_params
                        .iter()
                        .map(|(key, value)| (key.as_str(), value.as_str())),
                )
                .finish();
            if !query_string.is_empty() {
                url.push('?');
                url.push_str(&query_string);
            }
        }

        url
    }
}

/// Options for [`ApiClient::execute`].
///
/// `params` are path parameters substituted into the endpoint's `:name`
/// placeholders, matching the registry's parametrized operations.
#[derive(Debug, Default)]
pub struct ExecuteOptions {
    /// Optional JSON body.
    pub body: Option<Value>,

    /// Path parameters for `:name` placeholders, in substitution order.
    pub params: Vec<(String, String)>,

    /// Per-call headers.
    pub headers: HashMap<String, String>,
}

fn serialize_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| {
        parse_api_error(&RawError::Other(format!(
            "failed to serialize request body: {err}"
        )))
    })
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ApiClientConfig::new(base_url)).expect("client")
    }

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_url_with_path_and_query_params() {
        let client = client("http://h/api");
        let url = client.build_request_url(
            "/orders/:id",
            &pairs(&[("id", "7")]),
            &pairs(&[("page", "2")]),
        );
        assert_eq!(url, "http://h/api/orders/7?page=2");
    }

    #[test]
    fn test_url_strips_trailing_slash_and_adds_leading_slash() {
        let client = client("http://h/api/");
        let url = client.build_request_url("products", &[], &[]);
        assert_eq!(url, "http://h/api/products");
    }

    #[test]
    fn test_url_inserts_version_segment() {
        let config = ApiClientConfig::new("http://h/api").with_version("v1");
        let client = ApiClient::new(config).expect("client");
        let url = client.build_request_url("/products", &[], &[]);
        assert_eq!(url, "http://h/api/v1/products");
    }

    #[test]
    fn test_url_without_query_params_has_no_question_mark() {
        let client = client("http://h/api");
        let url = client.build_request_url("/products", &[], &[]);
        assert_eq!(url, "http://h/api/products");
    }

    #[test]
    fn test_query_params_keep_insertion_order_and_encode() {
        let client = client("http://h/api");
        let url = client.build_request_url(
            "/products",
            &[],
            &pairs(&[("sort", "name"), ("search", "red shoe"), ("page", "1")]),
        );
        assert_eq!(
            url,
            "http://h/api/products?sort=name&search=red+shoe&page=1"
        );
    }

    #[test]
    fn test_empty_version_is_ignored() {
        let config = ApiClientConfig::new("http://h/api").with_version("");
        let client = ApiClient::new(config).expect("client");
        let url = client.build_request_url("/products", &[], &[]);
        assert_eq!(url, "http://h/api/products");
    }

    #[test]
    fn test_remove_middleware_by_name() {
        use crate::api::middleware::RequestIdMiddleware;

        let mut client = client("http://h/api");
        client.use_middleware(Arc::new(RequestIdMiddleware));
        assert_eq!(client.middleware.len(), 1);
        client.remove_middleware(RequestIdMiddleware::NAME);
        assert!(client.middleware.is_empty());
    }
}
