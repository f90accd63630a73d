//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{transport_codes, BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartPart, UploadRequest},
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - Multipart uploads
/// - TLS support by default
///
/// Each call performs exactly one attempt. Failures before a response is
/// received are mapped to [`BridgeError::Transport`] with a URL-error code.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("courier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    /// Encode bridge multipart parts into a reqwest form
    fn build_form(parts: Vec<MultipartPart>) -> Result<Form> {
        let mut form = Form::new();

        for part in parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File {
                    name,
                    file_name,
                    mime_type,
                    data,
                } => {
                    let file = Part::bytes(data.to_vec())
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|e| {
                            BridgeError::Encoding(format!(
                                "Invalid MIME type '{}' for field '{}': {}",
                                mime_type, name, e
                            ))
                        })?;
                    form.part(name, file)
                }
            };
        }

        Ok(form)
    }

    /// Send a prepared request and collect the full response
    async fn send(&self, req: reqwest::RequestBuilder, url: &str) -> Result<HttpResponse> {
        let response = req.send().await.map_err(|e| {
            let err = Self::map_transport_error(&e);
            warn!(url = %url, error = %e, "HTTP request failed");
            err
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        debug!(url = %url, status = status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Map a reqwest failure onto a platform URL-error code
    fn map_transport_error(e: &reqwest::Error) -> BridgeError {
        let code = if e.is_timeout() {
            transport_codes::TIMED_OUT
        } else if e.is_connect() {
            transport_codes::CANNOT_CONNECT_TO_HOST
        } else if e.is_builder() {
            transport_codes::BAD_URL
        } else if e.is_body() || e.is_decode() || e.is_request() {
            transport_codes::NETWORK_CONNECTION_LOST
        } else {
            transport_codes::UNKNOWN
        };

        BridgeError::transport(code, e.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "Executing HTTP request");

        let url = request.url.clone();
        let req = self.build_request(request);
        self.send(req, &url).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<HttpResponse> {
        debug!(
            url = %request.url,
            parts = request.form.parts().len(),
            "Uploading multipart form"
        );

        let form = Self::build_form(request.form.into_parts())?;

        let mut req = self.client.post(&request.url).multipart(form);
        for (key, value) in request.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        self.send(req, &request.url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::http::MultipartForm;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_http_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Post),
            reqwest::Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_build_form_rejects_invalid_mime() {
        let form = MultipartForm::new()
            .text("email", "a@b.com")
            .file("image", "file.jpeg", "not a mime", Bytes::from_static(b"x"));

        let err = ReqwestHttpClient::build_form(form.into_parts()).unwrap_err();
        assert!(matches!(err, BridgeError::Encoding(_)));
    }

    #[test]
    fn test_build_form_accepts_media_types() {
        let form = MultipartForm::new()
            .file("image", "file.jpeg", "image/jpeg", Bytes::from_static(b"a"))
            .file("video", "file.mp4", "video/mp4", Bytes::from_static(b"b"))
            .file("audio", "file.m4a", "audio/m4a", Bytes::from_static(b"c"));

        assert!(ReqwestHttpClient::build_form(form.into_parts()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_url_transport_error() {
        let client = ReqwestHttpClient::new().unwrap();
        let err = client
            .execute(HttpRequest::new(HttpMethod::Get, "not a url"))
            .await
            .unwrap_err();

        assert_eq!(err.transport_code(), Some(transport_codes::BAD_URL));
    }
}
