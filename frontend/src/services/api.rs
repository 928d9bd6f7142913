use async_trait::async_trait;
use client_core::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use gloo_net::http::{Method as HttpMethod, RequestBuilder};

/// Browser `fetch` transport.
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(authorization) = request.authorization() {
            builder = builder.header("Authorization", &authorization);
        }

        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::new(format!("Failed to build request: {:?}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Request failed: {:?}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response: {:?}", e)))?;

        Ok(ApiResponse { status, body })
    }
}
