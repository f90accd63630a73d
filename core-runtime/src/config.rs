//! # Core Configuration Module
//!
//! Provides configuration management for the request dispatcher core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds all bridges and settings the dispatcher needs. It
//! enforces fail-fast validation so that a missing bridge is reported when
//! the host starts, not on the first request.
//!
//! ## Required Dependencies
//!
//! - `SettingsStore` - Persisted session state (auth token, user id, device token)
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP transport (desktop default: reqwest)
//! - `NetworkMonitor` - Reachability check (desktop default: TCP probe)
//! - `UiNotifier` - Loading indicator and toasts (desktop default: tracing events)
//!
//! When the `desktop-shims` feature is enabled, the desktop adapters are
//! injected automatically if not provided. The default `SettingsStore` also
//! needs a [`settings_path`](CoreConfigBuilder::settings_path).
//!
//! ## Usage
//!
//! ### Basic Configuration with Desktop Defaults
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .settings_path("/path/to/settings.db")
//!     .build()?;
//! ```
//!
//! ### Configuration with Custom Bridges
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, DispatchMessages};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = CoreConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .network_monitor(Arc::new(MyReachability))
//!     .ui_notifier(Arc::new(MyHud))
//!     .settings_store(Arc::new(MyUserDefaults))
//!     .messages(DispatchMessages::new("Oops.", "You are offline."))
//!     .request_timeout(Duration::from_secs(60))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, NetworkMonitor, SettingsStore, UiNotifier};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout for the desktop HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound accepted for [`CoreConfigBuilder::request_timeout`]
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// User-facing strings the dispatcher shows or embeds in failure envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchMessages {
    /// Message placed in every transport failure envelope
    pub something_went_wrong: String,
    /// Toast shown when a call is skipped because the network is unreachable
    pub internet_not_available: String,
}

impl DispatchMessages {
    pub fn new(
        something_went_wrong: impl Into<String>,
        internet_not_available: impl Into<String>,
    ) -> Self {
        Self {
            something_went_wrong: something_went_wrong.into(),
            internet_not_available: internet_not_available.into(),
        }
    }

    /// Both messages must be non-blank
    pub fn validate(&self) -> Result<()> {
        if self.something_went_wrong.trim().is_empty() {
            return Err(Error::Config(
                "'something went wrong' message cannot be empty".to_string(),
            ));
        }

        if self.internet_not_available.trim().is_empty() {
            return Err(Error::Config(
                "'internet not available' message cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DispatchMessages {
    fn default() -> Self {
        Self::new(
            "Something went wrong. Please try again.",
            "Internet connection not available.",
        )
    }
}

/// Core configuration for the request dispatcher.
///
/// This struct holds all bridges and settings required to build a
/// dispatcher. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// HTTP transport
    pub http_client: Arc<dyn HttpClient>,

    /// Reachability check consulted before every call
    pub network_monitor: Arc<dyn NetworkMonitor>,

    /// Loading indicator and toast presenter
    pub ui_notifier: Arc<dyn UiNotifier>,

    /// Persisted key-value store holding the session identity
    pub settings_store: Arc<dyn SettingsStore>,

    /// Location of the default SQLite settings database, if one was requested
    pub settings_path: Option<PathBuf>,

    /// User-facing dispatcher messages
    pub messages: DispatchMessages,

    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("http_client", &"HttpClient { ... }")
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("ui_notifier", &"UiNotifier { ... }")
            .field("settings_store", &"SettingsStore { ... }")
            .field("settings_path", &self.settings_path)
            .field("messages", &self.messages)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder();
    /// ```
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Request timeout is within 1 s ..= 300 s
    /// - Dispatcher messages are not blank
    pub fn validate(&self) -> Result<()> {
        validate_values(self.request_timeout, &self.messages)
    }
}

fn validate_values(request_timeout: Duration, messages: &DispatchMessages) -> Result<()> {
    if request_timeout < Duration::from_secs(1) {
        return Err(Error::Config(
            "Request timeout must be at least 1 second".to_string(),
        ));
    }

    if request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(Error::Config(
            "Request timeout exceeds maximum of 300 seconds".to_string(),
        ));
    }

    messages.validate()
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required to reach web services. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Mobile: inject the platform HTTP stack (URLSession/OkHttp)."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn network_monitor_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "NetworkMonitor".to_string(),
        message: "NetworkMonitor implementation is required for reachability checks. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default DesktopNetworkMonitor. \
                 Mobile: inject platform reachability (NWPathMonitor/ConnectivityManager)."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn ui_notifier_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "UiNotifier".to_string(),
        message: "UiNotifier implementation is required for loading indicators and toasts. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default TracingNotifier. \
                 Headless hosts: inject bridge_traits::NoopNotifier."
            .to_string(),
    }
}

fn settings_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "SettingsStore".to_string(),
        message: "SettingsStore implementation is required for the session token and user identifiers. \
                 Desktop: enable the 'desktop-shims' feature and set .settings_path() to use the default SqliteSettingsStore. \
                 Mobile: inject platform-native settings (UserDefaults/DataStore)."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(timeout)?);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    use bridge_desktop::DesktopNetworkMonitor;

    let monitor: Arc<dyn NetworkMonitor> = Arc::new(DesktopNetworkMonitor::new());
    Ok(monitor)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    Err(network_monitor_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_ui_notifier() -> Result<Arc<dyn UiNotifier>> {
    use bridge_desktop::TracingNotifier;

    let notifier: Arc<dyn UiNotifier> = Arc::new(TracingNotifier::new());
    Ok(notifier)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_ui_notifier() -> Result<Arc<dyn UiNotifier>> {
    Err(ui_notifier_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_settings_store(settings_path: Option<&PathBuf>) -> Result<Arc<dyn SettingsStore>> {
    use bridge_desktop::SqliteSettingsStore;
    use std::thread;
    use tokio::runtime::{Builder, Handle};

    let path = settings_path.cloned().ok_or_else(settings_store_missing_error)?;

    let init_store = |path: PathBuf| -> Result<SqliteSettingsStore> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::Internal(format!(
                    "Failed to create Tokio runtime for default settings store: {}",
                    e
                ))
            })?;

        Ok(runtime.block_on(SqliteSettingsStore::new(path))?)
    };

    // block_on panics inside a runtime, so initialize on a dedicated thread there.
    let store = match Handle::try_current() {
        Ok(_) => thread::spawn(move || init_store(path))
            .join()
            .map_err(|_| {
                Error::Internal(
                    "Worker thread panicked while creating default SettingsStore".to_string(),
                )
            })??,
        Err(_) => init_store(path)?,
    };

    let store: Arc<dyn SettingsStore> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_settings_store(
    _settings_path: Option<&PathBuf>,
) -> Result<Arc<dyn SettingsStore>> {
    Err(settings_store_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
/// The builder validates required dependencies and provides helpful error
/// messages.
#[derive(Default)]
pub struct CoreConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    ui_notifier: Option<Arc<dyn UiNotifier>>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    settings_path: Option<PathBuf>,
    messages: Option<DispatchMessages>,
    request_timeout: Option<Duration>,
}

impl CoreConfigBuilder {
    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the network monitor implementation.
    ///
    /// If not provided, the desktop TCP probe is used when the
    /// `desktop-shims` feature is enabled.
    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    /// Sets the UI notifier implementation.
    pub fn ui_notifier(mut self, notifier: Arc<dyn UiNotifier>) -> Self {
        self.ui_notifier = Some(notifier);
        self
    }

    /// Sets the settings store implementation.
    ///
    /// The settings store holds the values sent with authenticated requests
    /// (`token`, `user_id`, `DeviceToken`).
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_runtime::config::CoreConfig;
    /// use std::sync::Arc;
    ///
    /// let builder = CoreConfig::builder()
    ///     .settings_store(Arc::new(MySettingsStore));
    /// ```
    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Sets the SQLite file backing the default settings store.
    ///
    /// Ignored when a settings store is injected.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder()
    ///     .settings_path("/path/to/settings.db");
    /// ```
    pub fn settings_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Sets the user-facing dispatcher messages.
    ///
    /// Default: English strings from [`DispatchMessages::default`]
    pub fn messages(mut self, messages: DispatchMessages) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Sets the per-request timeout.
    ///
    /// Default: 30 seconds. Must be between 1 and 300 seconds.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - A bridge is missing and no platform default is available
    /// - Configuration values are invalid
    pub fn build(self) -> Result<CoreConfig> {
        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let messages = self.messages.unwrap_or_default();

        // Validate plain values before any default bridge is constructed.
        validate_values(request_timeout, &messages)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout)?,
        };

        let network_monitor = match self.network_monitor {
            Some(monitor) => monitor,
            None => provide_default_network_monitor()?,
        };

        let ui_notifier = match self.ui_notifier {
            Some(notifier) => notifier,
            None => provide_default_ui_notifier()?,
        };

        let settings_store = match self.settings_store {
            Some(store) => store,
            None => provide_default_settings_store(self.settings_path.as_ref())?,
        };

        let config = CoreConfig {
            http_client,
            network_monitor,
            ui_notifier,
            settings_store,
            settings_path: self.settings_path,
            messages,
            request_timeout,
        };

        config.validate()?;

        Ok(config)
    }
}
