use async_trait::async_trait;
use shared::api::{
    AuthResponse, ContactRequest, CreateInquiryRequest, InquiryResponse, LoginRequest, Product,
    ProductQuery, RegisterRequest,
};

use super::{parse_json, ApiRequest, Gateway};
use crate::controller::AuthApi;
use crate::error::GatewayError;

/// Typed endpoints of the API gateway.
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /auth/login`. Public.
    pub async fn login_user(&self, credentials: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        let request = ApiRequest::post(self.gateway.url("/auth/login")).json(credentials)?;
        let response = self.gateway.send_public(request).await?;
        parse_json(&response)
    }

    /// `POST /auth/register`. Public; the confirmation body is not used.
    pub async fn register_user(&self, details: &RegisterRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post(self.gateway.url("/auth/register")).json(details)?;
        self.gateway.send_public(request).await?;
        Ok(())
    }

    /// `GET /products`, with `search` only when the term is non-empty.
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, GatewayError> {
        let products: Option<Vec<Product>> = self.gateway.get_json("/products", query.pairs()).await?;
        Ok(products.unwrap_or_default())
    }

    pub async fn fetch_product(&self, product_id: i64) -> Result<Product, GatewayError> {
        self.gateway
            .get_json(&format!("/products/{}", product_id), Vec::new())
            .await
    }

    /// `POST /inquiries`. Requires a session.
    pub async fn submit_inquiry(
        &self,
        inquiry: &CreateInquiryRequest,
    ) -> Result<InquiryResponse, GatewayError> {
        self.gateway.post_json("/inquiries", inquiry).await
    }

    pub async fn fetch_my_inquiries(&self) -> Result<Vec<InquiryResponse>, GatewayError> {
        self.gateway.get_json("/inquiries/my-inquiries", Vec::new()).await
    }

    /// `POST /contact`.
    pub async fn send_contact(&self, message: &ContactRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post(self.gateway.url("/contact")).json(message)?;
        self.gateway.send(request).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        self.login_user(credentials).await
    }

    async fn register(&self, details: &RegisterRequest) -> Result<(), GatewayError> {
        self.register_user(details).await
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::gateway::testing::RecordingTransport;
    use crate::gateway::Method;
    use crate::store::MemoryStore;

    fn client(token: Option<&str>, transport: Rc<RecordingTransport>) -> ApiClient {
        let store = match token {
            Some(token) => MemoryStore::with_token(token),
            None => MemoryStore::new(),
        };
        ApiClient::new(Gateway::new("http://gateway.test/api", Rc::new(store), transport))
    }

    #[tokio::test]
    async fn test_login_posts_credentials_without_token() {
        let transport = Rc::new(RecordingTransport::default().reply(200, r#"{"token":"abc"}"#));
        let api = client(Some("stale"), transport.clone());

        let response = api
            .login_user(&LoginRequest::new("alice", "pw"))
            .await
            .expect("should log in");

        assert_eq!(response.token.as_deref(), Some("abc"));
        let sent = transport.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://gateway.test/api/auth/login");
        assert_eq!(sent.bearer, None);
        assert_eq!(sent.body.expect("body")["username"], "alice");
    }

    #[tokio::test]
    async fn test_products_search_param() {
        let transport = Rc::new(
            RecordingTransport::default()
                .reply(200, r#"[{"id":1,"name":"Kale"}]"#)
                .reply(200, "null"),
        );
        let api = client(None, transport.clone());

        let products = api
            .fetch_products(&ProductQuery::search("kale"))
            .await
            .expect("should list products");
        assert_eq!(products.len(), 1);
        assert_eq!(
            transport.last().query,
            vec![("search".to_string(), "kale".to_string())]
        );

        let products = api
            .fetch_products(&ProductQuery::default())
            .await
            .expect("should list products");
        assert!(products.is_empty());
        assert!(transport.last().query.is_empty());
    }

    #[tokio::test]
    async fn test_inquiry_carries_session_token() {
        let transport = Rc::new(RecordingTransport::default().reply(
            201,
            r#"{"id":9,"productId":42,"userId":"alice","subject":"Bulk","message":"Hi",
                "createdAt":"2025-01-02T03:04:05Z"}"#,
        ));
        let api = client(Some("T"), transport.clone());

        let inquiry = api
            .submit_inquiry(&CreateInquiryRequest {
                product_id: 42,
                subject: "Bulk".to_string(),
                message: "Hi".to_string(),
            })
            .await
            .expect("should submit");

        assert_eq!(inquiry.id, 9);
        let sent = transport.last();
        assert_eq!(sent.url, "http://gateway.test/api/inquiries");
        assert_eq!(sent.authorization().as_deref(), Some("Bearer T"));
    }

    #[tokio::test]
    async fn test_my_inquiries_requires_session() {
        let transport = Rc::new(
            RecordingTransport::default()
                .reply(
                    200,
                    r#"[{"id":3,"productId":42,"userId":"alice","subject":"Bulk","message":"Hi",
                        "createdAt":"2025-01-02T03:04:05Z"}]"#,
                )
                .reply(401, ""),
        );
        let api = client(Some("T"), transport.clone());

        let inquiries = api.fetch_my_inquiries().await.expect("should list inquiries");
        assert_eq!(inquiries.len(), 1);
        assert_eq!(inquiries[0].product_id, 42);
        let sent = transport.last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "http://gateway.test/api/inquiries/my-inquiries");
        assert_eq!(sent.authorization().as_deref(), Some("Bearer T"));

        let err = api.fetch_my_inquiries().await.expect_err("should be rejected");
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_register_surfaces_conflict_message() {
        let transport = Rc::new(RecordingTransport::default().reply(
            400,
            r#"{"status":400,"error":"Registration Conflict","message":"Username taken"}"#,
        ));
        let api = client(None, transport);

        let err = api
            .register_user(&RegisterRequest {
                username: "taken".to_string(),
                email: "taken@example.com".to_string(),
                password: "long-enough".to_string(),
            })
            .await
            .expect_err("should fail");
        assert_eq!(err.server_message(), Some("Username taken"));
    }
}
