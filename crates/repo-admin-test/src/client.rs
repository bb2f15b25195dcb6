//! HTTP test client for administration routers.
//!
//! [`TestClient`] sends simulated requests through an axum router without
//! binding a socket, and [`TestResponse`] exposes the result. The client can
//! act as an authenticated user: [`TestClient::login_as`] attaches an
//! [`Identity`] to every following request, as a host authentication
//! middleware would.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use repo_admin_test::client::TestClient;
//! use axum::Router;
//! use axum::routing::get;
//!
//! async fn example() {
//!     let app = Router::new().route("/hello", get(|| async { "Hello, World!" }));
//!     let mut client = TestClient::new(app);
//!
//!     let response = client.get("/hello").await;
//!     assert_eq!(response.status_code(), 200);
//!     assert_eq!(response.text(), "Hello, World!");
//! }
//! ```

use axum::Router;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use repo_admin_core::{AdminError, AdminResult};
use repo_admin_panel::auth::Identity;

/// A test client for making simulated HTTP requests against an axum router.
pub struct TestClient {
    app: Router,
    identity: Option<Identity>,
    headers: HeaderMap,
}

impl TestClient {
    /// Creates a new anonymous test client wrapping the given router.
    pub fn new(app: Router) -> Self {
        Self {
            app,
            identity: None,
            headers: HeaderMap::new(),
        }
    }

    /// Sends following requests as `identity`.
    pub fn login_as(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Sends following requests anonymously.
    pub fn logout(&mut self) {
        self.identity = None;
    }

    /// Returns the identity requests are sent as.
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Adds a header sent with every following request.
    ///
    /// Invalid header names or values are ignored.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
    }

    /// Sends a GET request to the given path.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.request(Method::GET, path, axum::body::Body::empty())
            .await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json(&mut self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.set_header("content-type", "application/json");
        let response = self
            .request(Method::POST, path, axum::body::Body::from(body.to_string()))
            .await;
        self.headers.remove(http::header::CONTENT_TYPE);
        response
    }

    /// Sends a DELETE request to the given path.
    pub async fn delete(&mut self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, axum::body::Body::empty())
            .await
    }

    async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: axum::body::Body,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .expect("request builder should not fail");
        req.headers_mut().extend(self.headers.clone());
        if let Some(identity) = &self.identity {
            req.extensions_mut().insert(identity.clone());
        }
        self.send(req).await
    }

    /// Sends the request through the router and builds a `TestResponse`.
    async fn send(&mut self, req: Request<axum::body::Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("router should not error");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_or_else(|_| Bytes::new(), http_body_util::Collected::to_bytes);

        TestResponse {
            status,
            headers,
            body: body_bytes.to_vec(),
        }
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("identity", &self.identity)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// The response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body as raw bytes.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Returns the response body as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> AdminResult<T> {
        serde_json::from_slice(&self.body).map_err(AdminError::from)
    }

    /// Returns the `error` message of a JSON error response.
    pub fn error_message(&self) -> Option<String> {
        self.json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("error")?.as_str().map(String::from))
    }

    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the value of a header by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns `true` if the response body contains the given text.
    pub fn contains(&self, text: &str) -> bool {
        self.text().contains(text)
    }
}
