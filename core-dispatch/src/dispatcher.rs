//! The request dispatcher.

use bridge_traits::{
    error::{transport_codes, BridgeError},
    http::{HttpClient, HttpMethod, HttpResponse},
    network::NetworkMonitor,
    ui::UiNotifier,
};
use core_runtime::config::{CoreConfig, DispatchMessages};
use core_runtime::logging::redact_if_sensitive;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::envelope::{ErrorEnvelope, ResponseEnvelope};
use crate::error::{DispatchError, Result};
use crate::identity::IdentityProvider;
use crate::request::{authorization_value, Parameters, RequestDescriptor, AUTHORIZATION_HEADER};

/// Issues one web-service call per [`dispatch`](Dispatcher::dispatch) and
/// normalizes the outcome into a [`ResponseEnvelope`].
///
/// The dispatcher holds no per-call state. Concurrent calls are independent;
/// two of them may show and hide the same loading indicator.
///
/// # Example
///
/// ```ignore
/// let envelope = dispatcher
///     .dispatch(
///         RequestDescriptor::new("https://api.example.com/login")
///             .parameter("email", "a@b.com")
///             .parameter("password", "secret")
///             .needs_auth(false),
///     )
///     .await?;
///
/// if envelope.is_success() {
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    http: Arc<dyn HttpClient>,
    network: Arc<dyn NetworkMonitor>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn UiNotifier>,
    messages: DispatchMessages,
    request_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(
        http: Arc<dyn HttpClient>,
        network: Arc<dyn NetworkMonitor>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn UiNotifier>,
    ) -> Self {
        Self {
            http,
            network,
            identity,
            notifier,
            messages: DispatchMessages::default(),
            request_timeout: None,
        }
    }

    /// Wire a dispatcher from the bridges and messages of a [`CoreConfig`]
    pub fn from_config(config: &CoreConfig, identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            Arc::clone(&config.http_client),
            Arc::clone(&config.network_monitor),
            identity,
            Arc::clone(&config.ui_notifier),
        )
        .with_messages(config.messages.clone())
        .with_request_timeout(config.request_timeout)
    }

    pub fn with_messages(mut self, messages: DispatchMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Per-request timeout handed to the transport
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Send `request` and deliver exactly one outcome.
    ///
    /// - Unreachable network: the "internet not available" toast is shown
    ///   once and [`DispatchError::Offline`] is returned without touching
    ///   the transport.
    /// - Transport failure: `Ok(Failure)` carrying the native error code.
    /// - JSON body: `Ok(Success)` whatever the HTTP status.
    /// - Empty body on `204`/`205` or a `HEAD` request: `Ok(Success(null))`.
    /// - Any other empty body, or a body that is not JSON: `Ok(Failure)`
    ///   with [`CANNOT_PARSE_RESPONSE`](transport_codes::CANNOT_PARSE_RESPONSE).
    /// - Multipart encoding failure: [`DispatchError::Encoding`].
    ///
    /// When `show_loading` is set, the loading indicator is hidden again on
    /// every path after it was shown.
    #[instrument(skip(self, request), fields(url = %request.url, method = %request.method))]
    pub async fn dispatch(&self, request: RequestDescriptor) -> Result<ResponseEnvelope> {
        debug!(
            parameters = ?redacted(&request.parameters),
            multipart = request.is_multipart(),
            "Dispatching request"
        );

        if !self.network.is_connected().await {
            warn!("Network unreachable, request skipped");
            self.notifier.show_toast(&self.messages.internet_not_available);
            return Err(DispatchError::Offline);
        }

        let _loading = request
            .show_loading
            .then(|| LoadingGuard::show(self.notifier.as_ref()));

        let headers = self.headers_for(&request).await;

        let (sent_method, outcome) = if request.is_multipart() {
            let mut upload = request.to_upload_request(headers);
            upload.timeout = self.request_timeout;
            debug!(parts = upload.form.parts().len(), "Sending multipart upload");
            (HttpMethod::Post, self.http.upload(upload).await)
        } else {
            let mut outbound = request.to_http_request(headers);
            outbound.timeout = self.request_timeout;
            (request.method, self.http.execute(outbound).await)
        };

        match outcome {
            Ok(response) => Ok(self.envelope_from_response(sent_method, response)),
            Err(err) => self.envelope_from_error(err),
        }
    }

    async fn headers_for(&self, request: &RequestDescriptor) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if request.needs_auth {
            let token = self.identity.token().await;
            headers.insert(
                AUTHORIZATION_HEADER.to_string(),
                authorization_value(&token),
            );
        }
        headers
    }

    fn envelope_from_response(
        &self,
        method: HttpMethod,
        response: HttpResponse,
    ) -> ResponseEnvelope {
        if response.body.is_empty() {
            if allows_empty_body(method, response.status) {
                debug!(status = response.status, "Response has no content");
                return ResponseEnvelope::Success(Value::Null);
            }
            warn!(status = response.status, "Response body is empty");
            return self.failure(transport_codes::CANNOT_PARSE_RESPONSE);
        }

        match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => {
                debug!(status = response.status, "Response parsed");
                ResponseEnvelope::Success(value)
            }
            Err(e) => {
                warn!(status = response.status, error = %e, "Response is not valid JSON");
                self.failure(transport_codes::CANNOT_PARSE_RESPONSE)
            }
        }
    }

    fn envelope_from_error(&self, err: BridgeError) -> Result<ResponseEnvelope> {
        match err {
            BridgeError::Encoding(message) => {
                error!(error = %message, "Multipart encoding failed");
                Err(DispatchError::Encoding(message))
            }
            BridgeError::Transport { code, message } => {
                warn!(code = code, error = %message, "Transport failed");
                Ok(self.failure(code))
            }
            other => {
                warn!(error = %other, "Request failed");
                Ok(self.failure(transport_codes::UNKNOWN))
            }
        }
    }

    fn failure(&self, code: i64) -> ResponseEnvelope {
        ResponseEnvelope::Failure(ErrorEnvelope::new(
            code,
            self.messages.something_went_wrong.clone(),
        ))
    }
}

/// Hides the loading indicator when dropped.
struct LoadingGuard<'a> {
    notifier: &'a dyn UiNotifier,
}

impl<'a> LoadingGuard<'a> {
    fn show(notifier: &'a dyn UiNotifier) -> Self {
        notifier.show_loading();
        Self { notifier }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.notifier.hide_loading();
    }
}

/// `204 No Content`, `205 Reset Content` and `HEAD` replies carry no body by definition
fn allows_empty_body(method: HttpMethod, status: u16) -> bool {
    method == HttpMethod::Head || matches!(status, 204 | 205)
}

fn redacted(parameters: &Parameters) -> BTreeMap<&str, String> {
    parameters
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.as_str(), redact_if_sensitive(key, &text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacted_parameters() {
        let parameters: Parameters = serde_json::from_value(json!({
            "password": "secret",
            "email": "ann@example.com",
            "page": 2,
        }))
        .unwrap();

        let shown = redacted(&parameters);
        assert_eq!(shown["password"], "[REDACTED]");
        assert_eq!(shown["page"], "2");
        assert!(!shown["email"].contains("example.com"));

        let accented: Parameters =
            serde_json::from_value(json!({"email": "été@example.com"})).unwrap();
        assert_eq!(redacted(&accented)["email"], "é***@[REDACTED]");
    }

    struct CountingNotifier(std::sync::Mutex<Vec<&'static str>>);

    impl UiNotifier for CountingNotifier {
        fn show_loading(&self) {
            self.0.lock().unwrap().push("show");
        }

        fn hide_loading(&self) {
            self.0.lock().unwrap().push("hide");
        }

        fn show_toast(&self, _message: &str) {
            self.0.lock().unwrap().push("toast");
        }
    }

    #[test]
    fn test_empty_body_allowed_only_without_content() {
        assert!(allows_empty_body(HttpMethod::Delete, 204));
        assert!(allows_empty_body(HttpMethod::Post, 205));
        assert!(allows_empty_body(HttpMethod::Head, 200));
        assert!(!allows_empty_body(HttpMethod::Get, 200));
        assert!(!allows_empty_body(HttpMethod::Post, 500));
    }

    #[test]
    fn test_loading_guard_hides_on_drop() {
        let notifier = CountingNotifier(std::sync::Mutex::new(Vec::new()));
        {
            let _guard = LoadingGuard::show(&notifier);
            assert_eq!(*notifier.0.lock().unwrap(), vec!["show"]);
        }
        assert_eq!(*notifier.0.lock().unwrap(), vec!["show", "hide"]);
    }
}
