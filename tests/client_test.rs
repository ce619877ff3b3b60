//
//  bagisto-storefront
//  tests/client_test.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end behavior of the API client against a mock HTTP server:
//! payload decoding, error normalization, middleware ordering and skip
//! lists, timeouts and idempotency stamping.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockito::Matcher;
use serde::Deserialize;
use serde_json::{json, Value};

use bagisto_storefront::api::error::{get_field_error, parse_api_error, RawError};
use bagisto_storefront::api::middleware::{
    ApiMiddleware, IdempotencyMiddleware, LocaleMiddleware, RequestIdMiddleware,
};
use bagisto_storefront::api::{
    ApiClient, ApiClientConfig, ApiError, ErrorContext, RequestContext, RequestOptions,
    ResponseContext,
};

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.url())).expect("client")
}

#[derive(Debug, Deserialize)]
struct ProductsPage {
    data: Vec<ProductRow>,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_get_decodes_json_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"id": 1, "name": "Boots"}, {"id": 2, "name": "Laces"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = RequestOptions {
        params: vec![("page".to_string(), "2".to_string())],
        ..Default::default()
    };
    let page: ProductsPage = client.get("/products", options).await.expect("payload");

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, 1);
    assert_eq!(page.data[1].name, "Laces");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_structured_error_body_passes_through_unchanged() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/customer/register")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "code": "validation.failed",
                "status": 422,
                "request_id": "r1",
                "timestamp": "t1",
                "errors": [{"field": "email", "code": "invalid"}]
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let result: Result<Value, ApiError> = client
        .post(
            "/customer/register",
            &json!({"email": "nope"}),
            RequestOptions::default(),
        )
        .await;

    let err = result.expect_err("validation error");
    assert_eq!(err.code, "validation.failed");
    assert_eq!(err.status, 422);
    assert_eq!(err.request_id, "r1");
    assert_eq!(err.timestamp, "t1");
    assert_eq!(get_field_error(&err, "email"), Some("invalid"));

    // reapplying normalization to the thrown error is a no-op
    assert_eq!(parse_api_error(&RawError::Api(err.clone())), err);
}

#[tokio::test]
async fn test_non_json_body_surfaces_as_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/ping")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("pong")
        .create_async()
        .await;

    let client = client_for(&server);
    let body: String = client
        .get("/ping", RequestOptions::default())
        .await
        .expect("text body");
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn test_bodyless_failure_maps_to_http_code() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .get::<Value>("/broken", RequestOptions::default())
        .await
        .expect_err("server error");
    assert_eq!(err.code, "http.500");
    assert_eq!(err.status, 500);
}

#[tokio::test]
async fn test_timeout_surfaces_as_server_timeout() {
    // a listener that accepts and then stays silent past the deadline
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        drop(socket);
    });

    let client = ApiClient::new(
        ApiClientConfig::new(format!("http://{addr}")).with_timeout(300),
    )
    .expect("client");

    let err = client
        .get::<Value>("/slow", RequestOptions::default())
        .await
        .expect_err("timeout");
    assert_eq!(err.code, "server.timeout");
    assert_eq!(err.status, 503);
}

#[tokio::test]
async fn test_standard_middleware_stamp_headers_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/checkout/cart/add/3")
        .match_header("x-request-id", Matcher::Regex(".+".to_string()))
        .match_header("accept-language", "ru")
        .match_header("idempotency-key", Matcher::Regex("^idem_".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"ok": true}}"#)
        .create_async()
        .await;

    let config = ApiClientConfig::new(server.url())
        .with_middleware(Arc::new(RequestIdMiddleware))
        .with_middleware(Arc::new(LocaleMiddleware::new(|| "ru".to_string())))
        .with_middleware(Arc::new(IdempotencyMiddleware));
    let client = ApiClient::new(config).expect("client");

    let _: Value = client
        .post(
            "/checkout/cart/add/3",
            &json!({"product_id": 3, "quantity": 1}),
            RequestOptions::default(),
        )
        .await
        .expect("response");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_skipped_middleware_leaves_no_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/products")
        .match_header("accept-language", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;

    let config = ApiClientConfig::new(server.url())
        .with_middleware(Arc::new(LocaleMiddleware::new(|| "ru".to_string())));
    let client = ApiClient::new(config).expect("client");

    let options = RequestOptions {
        skip_middleware: vec![LocaleMiddleware::NAME.to_string()],
        ..Default::default()
    };
    let _: Value = client.get("/products", options).await.expect("response");
    mock.assert_async().await;
}

struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ApiMiddleware for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    async fn on_request(&self, context: RequestContext) -> Result<RequestContext, ApiError> {
        self.log.lock().unwrap().push(format!("req:{}", self.name));
        Ok(context)
    }

    async fn on_response(&self, context: ResponseContext) -> Result<ResponseContext, ApiError> {
        self.log.lock().unwrap().push(format!("res:{}", self.name));
        Ok(context)
    }
}

#[tokio::test]
async fn test_request_order_forward_response_order_reverse() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let config = ApiClientConfig::new(server.url())
        .with_middleware(Arc::new(Recorder {
            name: "a",
            log: log.clone(),
        }))
        .with_middleware(Arc::new(Recorder {
            name: "b",
            log: log.clone(),
        }))
        .with_middleware(Arc::new(Recorder {
            name: "c",
            log: log.clone(),
        }));
    let client = ApiClient::new(config).expect("client");

    let _: Value = client
        .get("/products", RequestOptions::default())
        .await
        .expect("response");

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec!["req:a", "req:b", "req:c", "res:c", "res:b", "res:a"]
    );
}

struct RetryCountProbe {
    observed: Arc<Mutex<Option<u32>>>,
}

#[async_trait]
impl ApiMiddleware for RetryCountProbe {
    fn name(&self) -> &str {
        "retry-count-probe"
    }

    async fn on_error(&self, context: ErrorContext) -> Option<ErrorContext> {
        *self.observed.lock().unwrap() = Some(context.retry_count);
        Some(context)
    }
}

#[tokio::test]
async fn test_error_middleware_observes_zero_retry_count() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/flaky")
        .with_status(503)
        .with_body("")
        .create_async()
        .await;

    let observed = Arc::new(Mutex::new(None));
    let config = ApiClientConfig::new(server.url()).with_middleware(Arc::new(RetryCountProbe {
        observed: observed.clone(),
    }));
    let client = ApiClient::new(config).expect("client");

    let err = client
        .get::<Value>("/flaky", RequestOptions::default())
        .await
        .expect_err("service unavailable");

    // no automatic retry exists; error middleware always sees attempt zero
    assert_eq!(*observed.lock().unwrap(), Some(0));
    assert_eq!(err.code, "http.503");
}

struct Suppressor;

#[async_trait]
impl ApiMiddleware for Suppressor {
    fn name(&self) -> &str {
        "suppressor"
    }

    async fn on_error(&self, _context: ErrorContext) -> Option<ErrorContext> {
        None
    }
}

struct Rewriter;

#[async_trait]
impl ApiMiddleware for Rewriter {
    fn name(&self) -> &str {
        "rewriter"
    }

    async fn on_error(&self, mut context: ErrorContext) -> Option<ErrorContext> {
        context.error.code = "rewritten".to_string();
        Some(context)
    }
}

#[tokio::test]
async fn test_suppression_propagates_the_original_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    // the suppressor sits before the rewriter, so the rewrite never runs
    let config = ApiClientConfig::new(server.url())
        .with_middleware(Arc::new(Suppressor))
        .with_middleware(Arc::new(Rewriter));
    let client = ApiClient::new(config).expect("client");

    let err = client
        .get::<Value>("/broken", RequestOptions::default())
        .await
        .expect_err("server error");
    assert_eq!(err.code, "http.500");
}

#[tokio::test]
async fn test_error_middleware_can_rewrite_the_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    let config = ApiClientConfig::new(server.url()).with_middleware(Arc::new(Rewriter));
    let client = ApiClient::new(config).expect("client");

    let err = client
        .get::<Value>("/broken", RequestOptions::default())
        .await
        .expect_err("server error");
    assert_eq!(err.code, "rewritten");
}

#[tokio::test]
async fn test_execute_resolves_endpoint_path_params() {
    use bagisto_storefront::api::endpoints::Endpoint;
    use bagisto_storefront::api::{ExecuteOptions, HttpMethod};

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/orders/7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": 7}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let endpoint = Endpoint::new("/orders/:id", HttpMethod::Get).authenticated();
    let options = ExecuteOptions {
        params: vec![("id".to_string(), "7".to_string())],
        ..Default::default()
    };
    let response: Value = client.execute(&endpoint, options).await.expect("order");

    assert_eq!(response["data"]["id"], 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_two_posts_get_distinct_idempotency_keys() {
    let mut server = mockito::Server::new_async().await;
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    struct KeyCollector {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ApiMiddleware for KeyCollector {
        fn name(&self) -> &str {
            "key-collector"
        }

        async fn on_request(&self, context: RequestContext) -> Result<RequestContext, ApiError> {
            if let Some(key) = context.options.headers.get(IdempotencyMiddleware::HEADER) {
                self.seen.lock().unwrap().push(key.clone());
            }
            Ok(context)
        }
    }

    server
        .mock("POST", "/checkout/cart/update")
        .expect(2)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {}}"#)
        .create_async()
        .await;

    let config = ApiClientConfig::new(server.url())
        .with_middleware(Arc::new(IdempotencyMiddleware))
        .with_middleware(Arc::new(KeyCollector { seen: seen.clone() }));
    let client = ApiClient::new(config).expect("client");

    let payload = json!({"qty": {"1": 2}});
    let _: Value = client
        .post("/checkout/cart/update", &payload, RequestOptions::default())
        .await
        .expect("first");
    let _: Value = client
        .post("/checkout/cart/update", &payload, RequestOptions::default())
        .await
        .expect("second");

    let keys = seen.lock().unwrap().clone();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}
