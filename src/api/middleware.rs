//
//  bagisto-storefront
//  api/middleware.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Middleware Pipeline
//!
//! This module defines the [`ApiMiddleware`] trait and the ordered hook
//! execution around every API call, plus the middleware shipped with the
//! SDK: request correlation ids, locale and auth header injection,
//! logging, custom headers and idempotency keys.
//!
//! ## Contract
//!
//! - **Request phase**: hooks run in registration order; each receives the
//!   current [`RequestContext`] and returns the context handed to the next.
//! - **Response phase**: hooks run in *reverse* registration order; the
//!   last-registered middleware observes the raw response first, mirroring
//!   how the first-registered middleware prepares the request first.
//! - **Error phase**: hooks run in registration order; the first hook that
//!   returns `None` suppresses further processing and the original error
//!   propagates unchanged.
//! - A middleware whose name appears in the call's `skip_middleware` list
//!   is skipped for every phase of that call.
//! - Phases are strictly sequential; later middleware must see the
//!   accumulated effect of earlier ones.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use bagisto_storefront::api::middleware::ApiMiddleware;
//! use bagisto_storefront::api::{ApiError, RequestContext};
//!
//! struct TenantMiddleware;
//!
//! #[async_trait]
//! impl ApiMiddleware for TenantMiddleware {
//!     fn name(&self) -> &str {
//!         "tenant"
//!     }
//!
//!     async fn on_request(
//!         &self,
//!         mut context: RequestContext,
//!     ) -> Result<RequestContext, ApiError> {
//!         context.set_header("X-Tenant", "default");
//!         Ok(context)
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;

use crate::api::context::{ErrorContext, RequestContext, ResponseContext};
use crate::api::error::ApiError;
use crate::util::{generate_idempotency_key, generate_request_id};

/// A named unit hooking into the request, response or error phase of a
/// single call.
///
/// Identity is the `name` string: middleware is addressed and individually
/// skippable by name, and removable from the client by name. All hooks
/// have pass-through defaults, so implementors override only the phases
/// they care about.
///
/// Hooks may perform asynchronous work; the shipped middleware are all
/// synchronous in practice but the contract allows suspension.
#[async_trait]
pub trait ApiMiddleware: Send + Sync {
    /// The unique name of this middleware, used for skip lists and removal.
    fn name(&self) -> &str;

    /// Transforms the request before it is sent.
    ///
    /// Returning an error aborts the call and enters the error phase.
    async fn on_request(&self, context: RequestContext) -> Result<RequestContext, ApiError> {
        Ok(context)
    }

    /// Transforms the response after it is received.
    ///
    /// Returning an error aborts the call and enters the error phase.
    async fn on_response(&self, context: ResponseContext) -> Result<ResponseContext, ApiError> {
        Ok(context)
    }

    /// Observes or transforms a failure.
    ///
    /// Returning `Some` passes the (possibly updated) context to the next
    /// middleware; returning `None` suppresses further processing, which
    /// makes the original error propagate unchanged.
    async fn on_error(&self, context: ErrorContext) -> Option<ErrorContext> {
        Some(context)
    }
}

/// Runs the request-phase hooks in registration order.
///
/// Middleware named in the call's skip list is not invoked. The context
/// returned by each hook becomes the input to the next.
pub async fn run_request_middleware(
    middleware: &[Arc<dyn ApiMiddleware>],
    mut context: RequestContext,
) -> Result<RequestContext, ApiError> {
    for mw in middleware {
        if context.options.skips(mw.name()) {
            continue;
        }
        context = mw.on_request(context).await?;
    }
    Ok(context)
}

/// Runs the response-phase hooks in reverse registration order.
///
/// The skip test is applied against the *request* context's skip list, the
/// same list consulted during the request phase.
pub async fn run_response_middleware(
    middleware: &[Arc<dyn ApiMiddleware>],
    mut context: ResponseContext,
) -> Result<ResponseContext, ApiError> {
    for mw in middleware.iter().rev() {
        if context.request.options.skips(mw.name()) {
            continue;
        }
        context = mw.on_response(context).await?;
    }
    Ok(context)
}

/// Runs the error-phase hooks in registration order.
///
/// Stops at the first hook that returns `None` and reports the suppression
/// to the caller, which then rethrows the original error. A `Some` result
/// updates the running context and continues to the next middleware.
pub async fn run_error_middleware(
    middleware: &[Arc<dyn ApiMiddleware>],
    mut context: ErrorContext,
) -> Option<ErrorContext> {
    for mw in middleware {
        if context.request.options.skips(mw.name()) {
            continue;
        }
        match mw.on_error(context).await {
            Some(updated) => context = updated,
            None => return None,
        }
    }
    Some(context)
}

/// Stamps every call with a correlation id.
///
/// If the context does not yet carry a `request_id`, one is generated;
/// either way the id is exposed to the server as the `X-Request-ID`
/// header.
#[derive(Debug, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "request-id";
}

#[async_trait]
impl ApiMiddleware for RequestIdMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, mut context: RequestContext) -> Result<RequestContext, ApiError> {
        if context.request_id.is_empty() {
            context.request_id = generate_request_id();
        }
        let id = context.request_id.clone();
        context.set_header("X-Request-ID", id);
        Ok(context)
    }
}

/// Injects the shopper's locale as the `Accept-Language` header.
///
/// Built over a locale getter that is read fresh on every request, so a
/// locale switch in the UI takes effect on the very next call.
pub struct LocaleMiddleware {
    get_locale: Box<dyn Fn() -> String + Send + Sync>,
}

impl LocaleMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "locale";

    /// Creates the middleware over a current-locale getter.
    pub fn new<F>(get_locale: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            get_locale: Box::new(get_locale),
        }
    }
}

#[async_trait]
impl ApiMiddleware for LocaleMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, mut context: RequestContext) -> Result<RequestContext, ApiError> {
        let locale = (self.get_locale)();
        context.set_header("Accept-Language", locale);
        Ok(context)
    }
}

/// Injects the customer's bearer token as the `Authorization` header.
///
/// Built over a token getter; when the getter returns `None` (guest
/// session) the header is left entirely absent.
pub struct AuthMiddleware {
    get_token: Box<dyn Fn() -> Option<String> + Send + Sync>,
}

impl AuthMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "auth";

    /// Creates the middleware over a token getter.
    pub fn new<F>(get_token: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            get_token: Box::new(get_token),
        }
    }
}

#[async_trait]
impl ApiMiddleware for AuthMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, mut context: RequestContext) -> Result<RequestContext, ApiError> {
        if let Some(token) = (self.get_token)() {
            context.set_header("Authorization", format!("Bearer {token}"));
        }
        Ok(context)
    }
}

/// Logs every call with its method, URL, status and duration.
///
/// Start instants are kept in a map keyed by request id; the entry is
/// evicted when the matching response or error arrives. The map is behind
/// a mutex because the middleware is shared across concurrent calls.
/// Output goes through `tracing`, so the host application controls
/// destination and filtering.
pub struct LoggerMiddleware {
    timings: Mutex<HashMap<String, Instant>>,
}

impl LoggerMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "logger";

    /// Creates the middleware with an empty timing map.
    pub fn new() -> Self {
        Self {
            timings: Mutex::new(HashMap::new()),
        }
    }

    fn lock_timings(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        self.timings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiMiddleware for LoggerMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, context: RequestContext) -> Result<RequestContext, ApiError> {
        self.lock_timings()
            .insert(context.request_id.clone(), Instant::now());
        tracing::info!(
            request_id = %context.request_id,
            "[API] {} {}",
            context.method(),
            context.url
        );
        Ok(context)
    }

    async fn on_response(&self, context: ResponseContext) -> Result<ResponseContext, ApiError> {
        let started = self.lock_timings().remove(&context.request.request_id);
        let duration_ms = started.map(|t| t.elapsed().as_millis() as u64);
        tracing::info!(
            request_id = %context.request.request_id,
            duration_ms = ?duration_ms,
            "[API] {} {} - {}",
            context.request.method(),
            context.request.url,
            context.status
        );
        Ok(context)
    }

    async fn on_error(&self, context: ErrorContext) -> Option<ErrorContext> {
        self.lock_timings().remove(&context.request.request_id);
        tracing::error!(
            request_id = %context.request.request_id,
            code = %context.error.code,
            "[API] {} {} - ERROR",
            context.request.method(),
            context.request.url
        );
        Some(context)
    }
}

/// Merges a fixed header map beneath the per-call headers.
///
/// Headers already set on the call win on conflict; the fixed map only
/// fills gaps. Useful for channel or API-key headers an application wants
/// on every request.
pub struct HeadersMiddleware {
    headers: HashMap<String, String>,
}

impl HeadersMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "custom-headers";

    /// Creates the middleware over a fixed header map.
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }
}

#[async_trait]
impl ApiMiddleware for HeadersMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, mut context: RequestContext) -> Result<RequestContext, ApiError> {
        for (name, value) in &self.headers {
            context.set_header_if_absent(name, value.clone());
        }
        Ok(context)
    }
}

/// Stamps mutating requests with an `Idempotency-Key` header.
///
/// Applies to POST/PUT/PATCH only, and only when the caller has not
/// already supplied a key of their own, so that deliberate retries can
/// reuse a key while independent calls never share one.
#[derive(Debug, Default)]
pub struct IdempotencyMiddleware;

impl IdempotencyMiddleware {
    /// The middleware's registered name.
    pub const NAME: &'static str = "idempotency";

    /// The header carrying the idempotency key.
    pub const HEADER: &'static str = "Idempotency-Key";
}

#[async_trait]
impl ApiMiddleware for IdempotencyMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_request(&self, mut context: RequestContext) -> Result<RequestContext, ApiError> {
        if context.method().is_mutating() {
            context.set_header_if_absent(Self::HEADER, generate_idempotency_key());
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::context::{HttpMethod, RequestOptions};
    use serde_json::json;

    fn blank_context() -> RequestContext {
        RequestContext {
            url: "http://localhost/api/products".to_string(),
            request_id: String::new(),
            options: RequestOptions::default(),
        }
    }

    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &str, log: Arc<Mutex<Vec<String>>>) -> Arc<dyn ApiMiddleware> {
            Arc::new(Self {
                name: name.to_string(),
                log,
            })
        }
    }

    #[async_trait]
    impl ApiMiddleware for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        async fn on_request(&self, context: RequestContext) -> Result<RequestContext, ApiError> {
            self.log.lock().unwrap().push(format!("req:{}", self.name));
            Ok(context)
        }

        async fn on_response(
            &self,
            context: ResponseContext,
        ) -> Result<ResponseContext, ApiError> {
            self.log.lock().unwrap().push(format!("res:{}", self.name));
            Ok(context)
        }

        async fn on_error(&self, context: ErrorContext) -> Option<ErrorContext> {
            self.log.lock().unwrap().push(format!("err:{}", self.name));
            Some(context)
        }
    }

    struct Suppressor {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ApiMiddleware for Suppressor {
        fn name(&self) -> &str {
            "suppressor"
        }

        async fn on_error(&self, _context: ErrorContext) -> Option<ErrorContext> {
            self.log.lock().unwrap().push("err:suppressor".to_string());
            None
        }
    }

    #[tokio::test]
    async fn test_request_order_and_response_reverse_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![
            Recorder::new("a", log.clone()),
            Recorder::new("b", log.clone()),
            Recorder::new("c", log.clone()),
        ];

        let request = run_request_middleware(&chain, blank_context()).await.unwrap();
        let response = ResponseContext {
            data: json!({}),
            status: 200,
            headers: HashMap::new(),
            request,
        };
        run_response_middleware(&chain, response).await.unwrap();

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec!["req:a", "req:b", "req:c", "res:c", "res:b", "res:a"]
        );
    }

    #[tokio::test]
    async fn test_skipped_middleware_never_runs() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = vec![Recorder::new("a", log.clone()), Recorder::new("b", log.clone())];

        let mut context = blank_context();
        context.options.skip_middleware = vec!["b".to_string()];

        let request = run_request_middleware(&chain, context).await.unwrap();
        let response = ResponseContext {
            data: json!({}),
            status: 200,
            headers: HashMap::new(),
            request: request.clone(),
        };
        run_response_middleware(&chain, response).await.unwrap();
        let error = ErrorContext {
            error: ApiError::server(),
            request,
            retry_count: 0,
        };
        run_error_middleware(&chain, error).await;

        let entries = log.lock().unwrap().clone();
        assert_eq!(entries, vec!["req:a", "res:a", "err:a"]);
    }

    #[tokio::test]
    async fn test_error_chain_short_circuits_on_none() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: Vec<Arc<dyn ApiMiddleware>> = vec![
            Recorder::new("a", log.clone()),
            Arc::new(Suppressor { log: log.clone() }),
            Recorder::new("c", log.clone()),
        ];

        let error = ErrorContext {
            error: ApiError::server(),
            request: blank_context(),
            retry_count: 0,
        };
        let handled = run_error_middleware(&chain, error).await;

        assert!(handled.is_none());
        let entries = log.lock().unwrap().clone();
        assert_eq!(entries, vec!["err:a", "err:suppressor"]);
    }

    #[tokio::test]
    async fn test_request_id_is_stamped_and_preserved() {
        let chain: Vec<Arc<dyn ApiMiddleware>> = vec![Arc::new(RequestIdMiddleware)];

        let stamped = run_request_middleware(&chain, blank_context()).await.unwrap();
        assert!(!stamped.request_id.is_empty());
        assert_eq!(
            stamped.options.headers["X-Request-ID"],
            stamped.request_id
        );

        let mut preset = blank_context();
        preset.request_id = "existing-id".to_string();
        let kept = run_request_middleware(&chain, preset).await.unwrap();
        assert_eq!(kept.request_id, "existing-id");
        assert_eq!(kept.options.headers["X-Request-ID"], "existing-id");
    }

    #[tokio::test]
    async fn test_auth_header_only_when_token_present() {
        let with_token: Vec<Arc<dyn ApiMiddleware>> =
            vec![Arc::new(AuthMiddleware::new(|| Some("t0ken".to_string())))];
        let context = run_request_middleware(&with_token, blank_context())
            .await
            .unwrap();
        assert_eq!(context.options.headers["Authorization"], "Bearer t0ken");

        let without: Vec<Arc<dyn ApiMiddleware>> =
            vec![Arc::new(AuthMiddleware::new(|| None))];
        let context = run_request_middleware(&without, blank_context())
            .await
            .unwrap();
        assert!(!context.options.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_locale_read_fresh_each_request() {
        let locale = Arc::new(Mutex::new("en".to_string()));
        let source = locale.clone();
        let chain: Vec<Arc<dyn ApiMiddleware>> = vec![Arc::new(LocaleMiddleware::new(
            move || source.lock().unwrap().clone(),
        ))];

        let first = run_request_middleware(&chain, blank_context()).await.unwrap();
        assert_eq!(first.options.headers["Accept-Language"], "en");

        *locale.lock().unwrap() = "ru".to_string();
        let second = run_request_middleware(&chain, blank_context()).await.unwrap();
        assert_eq!(second.options.headers["Accept-Language"], "ru");
    }

    #[tokio::test]
    async fn test_custom_headers_lose_to_per_call_headers() {
        let mut defaults = HashMap::new();
        defaults.insert("X-Channel".to_string(), "default".to_string());
        defaults.insert("X-Device".to_string(), "web".to_string());
        let chain: Vec<Arc<dyn ApiMiddleware>> =
            vec![Arc::new(HeadersMiddleware::new(defaults))];

        let mut context = blank_context();
        context.set_header("X-Channel", "mobile");
        let merged = run_request_middleware(&chain, context).await.unwrap();

        assert_eq!(merged.options.headers["X-Channel"], "mobile");
        assert_eq!(merged.options.headers["X-Device"], "web");
    }

    #[tokio::test]
    async fn test_idempotency_keys_for_mutating_methods_only() {
        let chain: Vec<Arc<dyn ApiMiddleware>> = vec![Arc::new(IdempotencyMiddleware)];

        let mut post = blank_context();
        post.options.method = Some(HttpMethod::Post);
        let first = run_request_middleware(&chain, post.clone()).await.unwrap();
        let second = run_request_middleware(&chain, post).await.unwrap();
        let key_a = &first.options.headers[IdempotencyMiddleware::HEADER];
        let key_b = &second.options.headers[IdempotencyMiddleware::HEADER];
        assert_ne!(key_a, key_b);

        let mut get = blank_context();
        get.options.method = Some(HttpMethod::Get);
        let context = run_request_middleware(&chain, get).await.unwrap();
        assert!(!context
            .options
            .headers
            .contains_key(IdempotencyMiddleware::HEADER));
    }

    #[tokio::test]
    async fn test_idempotency_respects_caller_key() {
        let chain: Vec<Arc<dyn ApiMiddleware>> = vec![Arc::new(IdempotencyMiddleware)];
        let mut context = blank_context();
        context.options.method = Some(HttpMethod::Put);
        context.set_header(IdempotencyMiddleware::HEADER, "caller-key");
        let kept = run_request_middleware(&chain, context).await.unwrap();
        assert_eq!(kept.options.headers[IdempotencyMiddleware::HEADER], "caller-key");
    }

    #[tokio::test]
    async fn test_logger_evicts_timing_entries() {
        let logger = Arc::new(LoggerMiddleware::new());
        let chain: Vec<Arc<dyn ApiMiddleware>> =
            vec![Arc::new(RequestIdMiddleware), logger.clone()];

        let request = run_request_middleware(&chain, blank_context()).await.unwrap();
        assert_eq!(logger.lock_timings().len(), 1);

        let response = ResponseContext {
            data: json!({}),
            status: 200,
            headers: HashMap::new(),
            request,
        };
        run_response_middleware(&chain, response).await.unwrap();
        assert!(logger.lock_timings().is_empty());
    }
}
