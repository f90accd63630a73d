//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides implementations of the bridge traits using
//! desktop-appropriate libraries:
//! - `HttpClient` using `reqwest` (plain and multipart requests)
//! - `SettingsStore` using SQLite-backed key-value store
//! - `NetworkMonitor` using a TCP reachability probe
//! - `UiNotifier` emitting `tracing` events
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopNetworkMonitor, ReqwestHttpClient};
//! use bridge_traits::NetworkMonitor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http_client = ReqwestHttpClient::new()?;
//!     let monitor = DesktopNetworkMonitor::new();
//!
//!     if monitor.is_connected().await {
//!         // Use in core configuration
//!     }
//!     Ok(())
//! }
//! ```

mod http;
mod network;
mod settings;
mod ui;

pub use http::ReqwestHttpClient;
pub use network::{DesktopNetworkMonitor, DEFAULT_PROBE_ADDR, DEFAULT_PROBE_TIMEOUT};
pub use settings::SqliteSettingsStore;
pub use ui::TracingNotifier;
