//! Network Monitoring Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    network::{NetworkInfo, NetworkMonitor, NetworkStatus},
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Address probed when no other target is configured (public DNS over TCP)
pub const DEFAULT_PROBE_ADDR: &str = "8.8.8.8:53";

/// How long the probe waits for the TCP handshake
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Desktop network monitor implementation
///
/// Reachability is decided by a TCP connect to a well-known address. A
/// refused connection or a timed-out handshake means the network is not
/// reachable.
///
/// Note: Platform-specific implementations (Linux netlink, macOS SystemConfiguration,
/// Windows WinAPI) would be more robust but require additional dependencies.
pub struct DesktopNetworkMonitor {
    probe_addr: String,
    probe_timeout: Duration,
}

impl DesktopNetworkMonitor {
    /// Create a new network monitor probing the default address
    pub fn new() -> Self {
        Self::with_probe(DEFAULT_PROBE_ADDR, DEFAULT_PROBE_TIMEOUT)
    }

    /// Create a monitor probing a custom `host:port`
    pub fn with_probe(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            probe_addr: addr.into(),
            probe_timeout: timeout,
        }
    }

    /// Create a monitor probing a resolved socket address
    pub fn with_socket_addr(addr: SocketAddr, timeout: Duration) -> Self {
        Self::with_probe(addr.to_string(), timeout)
    }

    /// Check network connectivity by opening a TCP connection to the probe target
    async fn check_connectivity(&self) -> NetworkStatus {
        match tokio::time::timeout(
            self.probe_timeout,
            tokio::net::TcpStream::connect(self.probe_addr.as_str()),
        )
        .await
        {
            Ok(Ok(_)) => NetworkStatus::Connected,
            Ok(Err(e)) => {
                debug!(target_addr = %self.probe_addr, error = %e, "Reachability probe failed");
                NetworkStatus::Disconnected
            }
            Err(_) => {
                debug!(target_addr = %self.probe_addr, "Reachability probe timed out");
                NetworkStatus::Disconnected
            }
        }
    }
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkMonitor for DesktopNetworkMonitor {
    async fn get_network_info(&self) -> Result<NetworkInfo> {
        let status = self.check_connectivity().await;
        debug!(status = ?status, "Network status probed");

        Ok(NetworkInfo { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_reachable_probe_reports_connected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let monitor = DesktopNetworkMonitor::with_socket_addr(addr, Duration::from_secs(2));
        let info = monitor.get_network_info().await.unwrap();

        assert_eq!(info, NetworkInfo::connected());
        assert!(monitor.is_connected().await);
    }

    #[tokio::test]
    async fn test_refused_probe_reports_disconnected() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let monitor = DesktopNetworkMonitor::with_socket_addr(addr, Duration::from_secs(2));
        assert!(!monitor.is_connected().await);
        assert_eq!(
            monitor.get_network_info().await.unwrap().status,
            NetworkStatus::Disconnected
        );
    }
}
