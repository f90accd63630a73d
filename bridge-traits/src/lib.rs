//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the request dispatcher and
//! platform-specific implementations. Each trait represents a capability that
//! the core requires but that must be implemented differently per platform
//! (desktop, iOS, Android).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Plain requests and multipart uploads
//! - [`NetworkMonitor`](network::NetworkMonitor) - Reachability detection
//!
//! ### Storage
//! - [`SettingsStore`](storage::SettingsStore) - Persisted key-value state (token, user id)
//!
//! ### Platform Integration
//! - [`UiNotifier`](ui::UiNotifier) - Loading indicator and toast messages
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | iOS      | host-provided       | 📋 Planned |
//! | Android  | host-provided       | 📋 Planned |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Transport failures carry a platform URL-error code in
//! [`BridgeError::Transport`](error::BridgeError::Transport) so the core can
//! pass it through to callers verbatim.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent usage
//! across async tasks.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse, UploadRequest};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient;
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//!
//!     async fn upload(&self, request: UploadRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod log;
pub mod network;
pub mod storage;
pub mod ui;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart,
    UploadRequest,
};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use network::{NetworkInfo, NetworkMonitor, NetworkStatus};
pub use storage::SettingsStore;
pub use ui::{NoopNotifier, UiNotifier};
