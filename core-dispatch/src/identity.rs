//! Session identity read at call time.
//!
//! The dispatcher never caches identity: every authenticated call asks the
//! provider again, so a token written after login is picked up immediately.

use async_trait::async_trait;
use bridge_traits::storage::SettingsStore;
use std::sync::Arc;
use tracing::warn;

/// Settings key holding the session token
pub const TOKEN_KEY: &str = "token";
/// Settings key holding the logged-in user id
pub const USER_ID_KEY: &str = "user_id";
/// Settings key holding the push device token
pub const DEVICE_TOKEN_KEY: &str = "DeviceToken";

/// Source of the current session identity.
///
/// Missing values are reported as empty strings, never as errors.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn token(&self) -> String;

    async fn user_id(&self) -> String;

    async fn device_token(&self) -> String;
}

/// Identity backed by the persisted settings store.
pub struct SettingsIdentity {
    store: Arc<dyn SettingsStore>,
}

impl SettingsIdentity {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> String {
        match self.store.get_string(key).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read identity value, using empty string");
                String::new()
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for SettingsIdentity {
    async fn token(&self) -> String {
        self.read(TOKEN_KEY).await
    }

    async fn user_id(&self) -> String {
        self.read(USER_ID_KEY).await
    }

    async fn device_token(&self) -> String {
        self.read(DEVICE_TOKEN_KEY).await
    }
}

/// Fixed identity, for hosts that manage the session themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    pub token: String,
    pub user_id: String,
    pub device_token: String,
}

impl StaticIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_device_token(mut self, device_token: impl Into<String>) -> Self {
        self.device_token = device_token.into();
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn token(&self) -> String {
        self.token.clone()
    }

    async fn user_id(&self) -> String {
        self.user_id.clone()
    }

    async fn device_token(&self) -> String {
        self.device_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, String>>,
        broken: bool,
    }

    #[async_trait]
    impl SettingsStore for MemoryStore {
        async fn set_string(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get_string(&self, key: &str) -> Result<Option<String>> {
            if self.broken {
                return Err(BridgeError::DatabaseError("disk I/O error".to_string()));
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }

        async fn list_keys(&self) -> Result<Vec<String>> {
            Ok(self.values.lock().unwrap().keys().cloned().collect())
        }

        async fn clear_all(&self) -> Result<()> {
            self.values.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_settings_identity_reads_keys() {
        let store = Arc::new(MemoryStore::default());
        store.set_string("token", "abc").await.unwrap();
        store.set_string("user_id", "42").await.unwrap();
        store.set_string("DeviceToken", "apns-1").await.unwrap();

        let identity = SettingsIdentity::new(store);
        assert_eq!(identity.token().await, "abc");
        assert_eq!(identity.user_id().await, "42");
        assert_eq!(identity.device_token().await, "apns-1");
    }

    #[tokio::test]
    async fn test_settings_identity_missing_is_empty() {
        let identity = SettingsIdentity::new(Arc::new(MemoryStore::default()));
        assert_eq!(identity.token().await, "");
        assert_eq!(identity.device_token().await, "");
    }

    #[tokio::test]
    async fn test_settings_identity_reads_fresh_values() {
        let store = Arc::new(MemoryStore::default());
        let identity = SettingsIdentity::new(store.clone());
        assert_eq!(identity.token().await, "");

        store.set_string("token", "after-login").await.unwrap();
        assert_eq!(identity.token().await, "after-login");
    }

    #[tokio::test]
    async fn test_settings_identity_store_failure_is_empty() {
        let store = Arc::new(MemoryStore {
            broken: true,
            ..MemoryStore::default()
        });
        let identity = SettingsIdentity::new(store);
        assert_eq!(identity.user_id().await, "");
    }

    #[tokio::test]
    async fn test_static_identity() {
        let identity = StaticIdentity::new("t")
            .with_user_id("7")
            .with_device_token("d");

        assert_eq!(identity.token().await, "t");
        assert_eq!(identity.user_id().await, "7");
        assert_eq!(identity.device_token().await, "d");
        assert_eq!(StaticIdentity::default().token().await, "");
    }
}
