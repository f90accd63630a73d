//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP, reachability,
//! settings, UI notifications) into a ready [`Dispatcher`]. Desktop apps
//! typically enable the `desktop-shims` feature, which lets
//! [`CoreConfig`](core_runtime::CoreConfig) fall back to the adapters from
//! `bridge-desktop` for every bridge the host does not inject.

pub mod error;

pub use error::{CoreError, Result};

pub use core_dispatch::{
    DispatchError, Dispatcher, HttpMethod, IdentityProvider, MediaKind, MediaPayload,
    PayloadSet, RequestDescriptor, ResponseEnvelope, SettingsIdentity, StaticIdentity,
};
pub use core_runtime::{CoreConfig, CoreConfigBuilder, DispatchMessages};

use std::sync::Arc;

use core_dispatch::identity::{TOKEN_KEY, USER_ID_KEY};
use core_runtime::Error as RuntimeError;
use tracing::{debug, info};

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    config: Arc<CoreConfig>,
    dispatcher: Dispatcher,
}

impl CoreService {
    /// Create a service whose identity is read from the configured settings
    /// store.
    pub fn new(config: CoreConfig) -> Self {
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(SettingsIdentity::new(Arc::clone(&config.settings_store)));
        Self::with_identity(config, identity)
    }

    /// Create a service with a host-managed identity provider.
    pub fn with_identity(config: CoreConfig, identity: Arc<dyn IdentityProvider>) -> Self {
        let dispatcher = Dispatcher::from_config(&config, identity);
        debug!(config = ?config, "Core service initialized");
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Send one web-service call. See [`Dispatcher::dispatch`].
    pub async fn dispatch(&self, request: RequestDescriptor) -> Result<ResponseEnvelope> {
        Ok(self.dispatcher.dispatch(request).await?)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Persist the session returned by a login call.
    ///
    /// Subsequent authenticated calls pick the token up immediately when the
    /// service reads identity from the settings store.
    pub async fn store_session(&self, token: &str, user_id: &str) -> Result<()> {
        let store = &self.config.settings_store;
        store
            .set_string(TOKEN_KEY, token)
            .await
            .map_err(RuntimeError::from)?;
        store
            .set_string(USER_ID_KEY, user_id)
            .await
            .map_err(RuntimeError::from)?;
        info!(user_id = user_id, "Session stored");
        Ok(())
    }

    /// Forget the persisted token and user id.
    pub async fn clear_session(&self) -> Result<()> {
        let store = &self.config.settings_store;
        store.delete(TOKEN_KEY).await.map_err(RuntimeError::from)?;
        store.delete(USER_ID_KEY).await.map_err(RuntimeError::from)?;
        info!("Session cleared");
        Ok(())
    }
}

/// Convenience bootstrapper for desktop hosts.
///
/// Every bridge falls back to its desktop adapter; settings live in a SQLite
/// file at `settings_path`.
///
/// ```no_run
/// # #[cfg(feature = "desktop-shims")]
/// # async fn example() -> core_service::Result<()> {
/// use core_service::{bootstrap_desktop, RequestDescriptor};
///
/// let core = bootstrap_desktop("courier-settings.db")?;
/// let envelope = core
///     .dispatch(RequestDescriptor::new("https://api.example.com/feed"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop(settings_path: impl Into<std::path::PathBuf>) -> Result<CoreService> {
    let config = CoreConfig::builder().settings_path(settings_path).build()?;
    Ok(CoreService::new(config))
}
