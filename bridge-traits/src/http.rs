//! HTTP Client Abstraction
//!
//! Provides async HTTP operations: plain requests and multipart uploads.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// Content type used for form-encoded request bodies
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Whether parameters for this method travel in the URL query rather
    /// than in the request body.
    pub fn encodes_parameters_in_url(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Head | HttpMethod::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attach a form-encoded body (`key=value&...`)
    pub fn form(mut self, encoded: impl Into<String>) -> Self {
        self.body = Some(Bytes::from(encoded.into()));
        self.headers
            .insert("Content-Type".to_string(), FORM_URLENCODED.to_string());
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    /// Plain form field
    Text { name: String, value: String },
    /// File attachment
    File {
        name: String,
        file_name: String,
        mime_type: String,
        data: Bytes,
    },
}

impl MultipartPart {
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Ordered multipart form, described as plain data.
///
/// Platform clients turn this into their native multipart encoder; invalid
/// parts (e.g. an unparseable MIME type) must surface as
/// [`BridgeError::Encoding`](crate::error::BridgeError::Encoding).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        });
        self
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<MultipartPart> {
        self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value of the first text field with the given name
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            MultipartPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All file parts, in insertion order
    pub fn files(&self) -> impl Iterator<Item = &MultipartPart> {
        self.parts
            .iter()
            .filter(|part| matches!(part, MultipartPart::File { .. }))
    }
}

/// Multipart upload request. Uploads are always sent as `POST`.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub form: MultipartForm,
    pub timeout: Option<Duration>,
}

impl UploadRequest {
    pub fn new(url: impl Into<String>, form: MultipartForm) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            form,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

/// Async HTTP client trait
///
/// This trait abstracts HTTP operations to allow platform-specific implementations.
/// Implementations perform exactly one attempt per call and report failures
/// that happen before a response is obtained as [`BridgeError::Transport`](crate::error::BridgeError::Transport)
/// carrying a platform URL-error code. A response with any HTTP status is a
/// successful round-trip and is returned as `Ok`.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch_data(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/data")
///         .header("Authorization", "Token abc");
///
///     let response = client.execute(request).await?;
///     Ok(String::from_utf8_lossy(&response.body).into_owned())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a plain HTTP request
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`](crate::error::BridgeError::Transport) if:
    /// - The URL is invalid
    /// - Network connection fails
    /// - Request times out
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Upload a multipart form
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Encoding`](crate::error::BridgeError::Encoding) if the form cannot be encoded and
    /// [`BridgeError::Transport`](crate::error::BridgeError::Transport) for the same conditions as
    /// [`execute`](HttpClient::execute).
    async fn upload(&self, request: UploadRequest) -> Result<HttpResponse>;
}
