//! The single configured route to the API gateway.
//!
//! Every request built through [`Gateway::send`] picks up the session token
//! from the [`SessionStore`] at call time. Responses are classified into
//! [`GatewayError`] here so views never see raw status codes.
//!
//! A 401 is only reported. Local session state is left alone; whether to
//! log the user out is the caller's decision.

mod api;
#[cfg(feature = "native")]
pub mod native;

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::api::ErrorResponse;
use tracing::{debug, error, warn};

use crate::error::{GatewayError, TransportError};
use crate::store::SessionStore;

pub use api::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Transport-neutral description of one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body).map_err(|err| GatewayError::Other {
            status: None,
            message: format!("Failed to serialize request: {}", err),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Value for the `Authorization` header, if a token is attached.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {}", token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves an [`ApiRequest`] over the wire. Does not interpret status codes.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct Gateway {
    base_url: String,
    store: Rc<dyn SessionStore>,
    transport: Rc<dyn Transport>,
}

impl Gateway {
    pub fn new(
        base_url: impl Into<String>,
        store: Rc<dyn SessionStore>,
        transport: Rc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            transport,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send with the stored token attached when there is one. An empty
    /// store is not an error; the endpoint may be public.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        request.bearer = self.store.read();
        self.dispatch(request).await
    }

    /// Send without credentials, whatever the store holds.
    pub async fn send_public(&self, mut request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        request.bearer = None;
        self.dispatch(request).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, GatewayError> {
        let response = self.send(ApiRequest::get(self.url(path)).with_query(query)).await?;
        parse_json(&response)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self.send(ApiRequest::post(self.url(path)).json(body)?).await?;
        parse_json(&response)
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, %url, authenticated = request.bearer.is_some(), "Sending API request");

        let response = self.transport.send(request).await.map_err(|err| {
            error!(method, %url, error = %err, "API request failed to complete");
            GatewayError::from(err)
        })?;
        classify(response)
    }
}

/// Map a completed exchange onto the gateway's error taxonomy.
pub fn classify(response: ApiResponse) -> Result<ApiResponse, GatewayError> {
    if response.ok() {
        return Ok(response);
    }

    let message = error_body_message(&response.body);
    match response.status {
        401 => {
            warn!("API request returned 401 Unauthorized. Token might be invalid/expired.");
            Err(GatewayError::Unauthorized { message })
        }
        403 => {
            warn!("API request returned 403 Forbidden. User lacks permission.");
            Err(GatewayError::Forbidden { message })
        }
        status => {
            error!(status, "API request returned an error status");
            Err(GatewayError::Other {
                status: Some(status),
                message: message
                    .unwrap_or_else(|| format!("Request failed with status code {}", status)),
            })
        }
    }
}

pub fn parse_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, GatewayError> {
    serde_json::from_str(&response.body).map_err(|err| GatewayError::Other {
        status: Some(response.status),
        message: format!("Failed to parse response: {}", err),
    })
}

fn error_body_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.display_message().map(str::to_string))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::{ApiRequest, ApiResponse, Transport};
    use crate::error::TransportError;

    /// Replays canned replies and keeps every request it was given.
    #[derive(Default)]
    pub struct RecordingTransport {
        replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
        pub requests: RefCell<Vec<ApiRequest>>,
    }

    impl RecordingTransport {
        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError::new(message)));
            self
        }

        pub fn last(&self) -> ApiRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request recorded")
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::store::MemoryStore;

    fn gateway(store: Rc<MemoryStore>, transport: Rc<RecordingTransport>) -> Gateway {
        Gateway::new("http://gateway.test/api/", store, transport)
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let g = gateway(Rc::new(MemoryStore::new()), Rc::new(RecordingTransport::default()));
        assert_eq!(g.url("/products"), "http://gateway.test/api/products");
        assert_eq!(g.url("products/3"), "http://gateway.test/api/products/3");
    }

    #[tokio::test]
    async fn test_token_read_fresh_on_every_call() {
        let store = Rc::new(MemoryStore::with_token("T"));
        let transport = Rc::new(RecordingTransport::default().reply(200, "[]").reply(200, "[]"));
        let g = gateway(store.clone(), transport.clone());

        g.send(ApiRequest::get(g.url("/products"))).await.expect("should succeed");
        assert_eq!(transport.last().authorization().as_deref(), Some("Bearer T"));

        store.write("T2");
        g.send(ApiRequest::get(g.url("/products"))).await.expect("should succeed");
        assert_eq!(transport.last().bearer.as_deref(), Some("T2"));
    }

    #[tokio::test]
    async fn test_empty_store_sends_without_credential() {
        let transport = Rc::new(RecordingTransport::default().reply(200, "{}"));
        let g = gateway(Rc::new(MemoryStore::new()), transport.clone());

        g.send(ApiRequest::get(g.url("/products/1"))).await.expect("should succeed");
        assert_eq!(transport.last().bearer, None);
        assert_eq!(transport.last().authorization(), None);
    }

    #[tokio::test]
    async fn test_public_send_never_attaches_token() {
        let transport = Rc::new(RecordingTransport::default().reply(200, "{}"));
        let g = gateway(Rc::new(MemoryStore::with_token("T")), transport.clone());

        g.send_public(ApiRequest::post(g.url("/auth/login"))).await.expect("should succeed");
        assert_eq!(transport.last().bearer, None);
    }

    #[tokio::test]
    async fn test_unauthorized_leaves_session_alone() {
        let store = Rc::new(MemoryStore::with_token("T"));
        let transport = Rc::new(
            RecordingTransport::default().reply(401, r#"{"status":401,"message":"Token expired"}"#),
        );
        let g = gateway(store.clone(), transport);

        let err = g
            .send(ApiRequest::get(g.url("/inquiries/my-inquiries")))
            .await
            .expect_err("should be rejected");

        assert_eq!(
            err,
            GatewayError::Unauthorized {
                message: Some("Token expired".to_string())
            }
        );
        assert_eq!(store.read().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_status_classification() {
        let transport = Rc::new(
            RecordingTransport::default()
                .reply(403, "")
                .reply(500, r#"{"error":"Internal Server Error"}"#)
                .reply(502, "<html>bad gateway</html>")
                .fail("connection refused"),
        );
        let g = gateway(Rc::new(MemoryStore::new()), transport);
        let call = || g.send(ApiRequest::get(g.url("/inquiries")));

        assert_eq!(call().await, Err(GatewayError::Forbidden { message: None }));
        assert_eq!(
            call().await,
            Err(GatewayError::Other {
                status: Some(500),
                message: "Internal Server Error".to_string()
            })
        );
        assert_eq!(
            call().await,
            Err(GatewayError::Other {
                status: Some(502),
                message: "Request failed with status code 502".to_string()
            })
        );
        assert_eq!(
            call().await,
            Err(GatewayError::NetworkFailure("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let transport = Rc::new(RecordingTransport::default().reply(200, "not json"));
        let g = gateway(Rc::new(MemoryStore::new()), transport);

        let err = g
            .get_json::<Vec<String>>("/products", Vec::new())
            .await
            .expect_err("should fail to parse");
        assert!(matches!(err, GatewayError::Other { status: Some(200), .. }));
    }
}
