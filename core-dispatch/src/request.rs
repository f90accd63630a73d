//! Request descriptors and their translation into bridge requests.

use bridge_traits::http::{HttpMethod, HttpRequest, MultipartForm, UploadRequest};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::encoding::{append_query, encode_form, form_field_value};
use crate::payload::{MediaPayload, PayloadSet};

/// Request parameters, encoded in key order
pub type Parameters = BTreeMap<String, Value>;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// `Authorization` header value for a session token. An empty token still
/// produces `"Token "`.
pub fn authorization_value(token: &str) -> String {
    format!("Token {}", token)
}

/// Everything needed to issue one web-service call.
///
/// Built fresh per call and consumed by
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
///
/// # Example
///
/// ```ignore
/// use core_dispatch::{HttpMethod, RequestDescriptor};
///
/// let login = RequestDescriptor::new("https://api.example.com/login")
///     .parameter("email", "a@b.com")
///     .parameter("password", "secret")
///     .needs_auth(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub parameters: Parameters,
    pub payloads: PayloadSet,
    pub needs_auth: bool,
    pub show_loading: bool,
}

impl RequestDescriptor {
    /// `POST` with no parameters or payloads, authenticated, with loading indicator
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            parameters: Parameters::new(),
            payloads: PayloadSet::default(),
            needs_auth: true,
            show_loading: true,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn payloads(mut self, payloads: PayloadSet) -> Self {
        self.payloads = payloads;
        self
    }

    /// Replace the payload of one media kind
    pub fn payload(mut self, payload: MediaPayload) -> Self {
        self.payloads.set(payload);
        self
    }

    pub fn needs_auth(mut self, needs_auth: bool) -> Self {
        self.needs_auth = needs_auth;
        self
    }

    pub fn show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = show_loading;
        self
    }

    pub fn is_multipart(&self) -> bool {
        self.payloads.is_multipart()
    }

    /// Plain request: parameters go into the query for `GET`/`HEAD`/`DELETE`
    /// and into a form body otherwise.
    pub fn to_http_request(&self, headers: HashMap<String, String>) -> HttpRequest {
        let mut request = HttpRequest::new(self.method, self.url.clone()).headers(headers);

        let encoded = encode_form(&self.parameters);
        if encoded.is_empty() {
            return request;
        }

        if self.method.encodes_parameters_in_url() {
            request.url = append_query(&self.url, &encoded);
            request
        } else {
            request.form(encoded)
        }
    }

    /// Multipart upload: text fields for every parameter, then the non-empty
    /// media entries. Always sent as `POST` whatever `method` says.
    pub fn to_upload_request(&self, headers: HashMap<String, String>) -> UploadRequest {
        let mut form = MultipartForm::new();

        for (key, value) in &self.parameters {
            form = form.text(key.clone(), form_field_value(value));
        }

        for attachment in self.payloads.attachments() {
            form = form.file(
                attachment.field,
                attachment.kind.file_name(),
                attachment.kind.mime_type(),
                attachment.data.clone(),
            );
        }

        UploadRequest::new(self.url.clone(), form).headers(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::MediaKind;
    use bridge_traits::http::{MultipartPart, FORM_URLENCODED};
    use bytes::Bytes;
    use serde_json::json;

    fn auth_headers() -> HashMap<String, String> {
        HashMap::from([(
            AUTHORIZATION_HEADER.to_string(),
            authorization_value("abc"),
        )])
    }

    #[test]
    fn test_descriptor_defaults() {
        let request = RequestDescriptor::new("https://api.example.com/feed");

        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.parameters.is_empty());
        assert!(request.needs_auth);
        assert!(request.show_loading);
        assert!(!request.is_multipart());
    }

    #[test]
    fn test_authorization_value() {
        assert_eq!(authorization_value("abc"), "Token abc");
        assert_eq!(authorization_value(""), "Token ");
    }

    #[test]
    fn test_post_parameters_become_form_body() {
        let request = RequestDescriptor::new("https://api.example.com/login")
            .parameter("password", "secret")
            .parameter("email", "a@b.com")
            .to_http_request(auth_headers());

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.example.com/login");
        assert_eq!(
            request.body,
            Some(Bytes::from("email=a%40b.com&password=secret"))
        );
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some(FORM_URLENCODED)
        );
        assert_eq!(
            request.headers.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Token abc")
        );
    }

    #[test]
    fn test_get_parameters_become_query() {
        let request = RequestDescriptor::new("https://api.example.com/feed")
            .method(HttpMethod::Get)
            .parameter("page", 2)
            .parameter("unread", true)
            .to_http_request(HashMap::new());

        assert_eq!(request.url, "https://api.example.com/feed?page=2&unread=1");
        assert!(request.body.is_none());
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_no_parameters_no_body() {
        let request = RequestDescriptor::new("https://api.example.com/logout")
            .method(HttpMethod::Put)
            .to_http_request(HashMap::new());

        assert!(request.body.is_none());
        assert_eq!(request.url, "https://api.example.com/logout");
    }

    #[test]
    fn test_upload_request_parts() {
        let image = MediaPayload::new(
            MediaKind::Image,
            vec![Bytes::from_static(b"jpg"), Bytes::new()],
            ["avatar", "cover"],
        )
        .unwrap();

        let upload = RequestDescriptor::new("https://api.example.com/profile")
            .method(HttpMethod::Put)
            .parameter("name", "Ann")
            .parameter("age", 30)
            .payload(image)
            .payload(MediaPayload::single(MediaKind::Audio, &b"m4a"[..]))
            .to_upload_request(auth_headers());

        assert_eq!(upload.url, "https://api.example.com/profile");
        assert_eq!(upload.form.text_value("name"), Some("Ann"));
        assert_eq!(upload.form.text_value("age"), Some("30"));
        assert_eq!(
            upload.headers.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Token abc")
        );

        let files: Vec<_> = upload.form.files().cloned().collect();
        assert_eq!(
            files,
            vec![
                MultipartPart::File {
                    name: "avatar".to_string(),
                    file_name: "file.jpeg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                    data: Bytes::from_static(b"jpg"),
                },
                MultipartPart::File {
                    name: "audio".to_string(),
                    file_name: "file.m4a".to_string(),
                    mime_type: "audio/m4a".to_string(),
                    data: Bytes::from_static(b"m4a"),
                },
            ]
        );
    }

    #[test]
    fn test_parameters_merge() {
        let extra: Parameters = serde_json::from_value(json!({"b": 2, "c": 3})).unwrap();
        let request = RequestDescriptor::new("https://api.example.com")
            .parameter("a", 1)
            .parameter("b", 1)
            .parameters(extra);

        assert_eq!(request.parameters.len(), 3);
        assert_eq!(request.parameters["b"], json!(2));
    }
}
