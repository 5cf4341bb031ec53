//! Connectivity probe
//!
//! The link-layer "online" flag only says a network interface is up, not
//! that anything is reachable, so the probe combines both: a cheap local
//! interface check that can short-circuit to offline, followed by a bounded
//! HEAD request against a known resource. Every failure path collapses to
//! `false`; the probe never returns an error.

use std::time::Duration;
use tracing::debug;

use crate::config::ConnectivityConfig;

/// Local link-layer state, injectable for tests.
pub trait LinkState: Send + Sync {
    /// Whether any usable network interface is up.
    fn is_up(&self) -> bool;
}

/// Reads interface operstates from `/sys/class/net`.
///
/// When the answer cannot be determined (non-Linux, sysfs missing) this
/// reports "up" so the HEAD probe makes the real decision.
pub struct SysfsLinkState;

impl LinkState for SysfsLinkState {
    fn is_up(&self) -> bool {
        let entries = match std::fs::read_dir("/sys/class/net") {
            Ok(entries) => entries,
            Err(_) => return true,
        };

        let mut saw_interface = false;
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name == "lo" {
                continue;
            }
            saw_interface = true;
            let operstate = entry.path().join("operstate");
            if let Ok(state) = std::fs::read_to_string(operstate) {
                let state = state.trim();
                // "unknown" is common for wireless and virtual interfaces
                // that are in fact carrying traffic
                if state == "up" || state == "unknown" {
                    return true;
                }
            }
        }

        !saw_interface
    }
}

/// Fixed answer, for tests.
pub struct FixedLinkState(pub bool);

impl LinkState for FixedLinkState {
    fn is_up(&self) -> bool {
        self.0
    }
}

/// Reachability checker with a bounded round-trip.
pub struct ConnectivityProbe {
    client: reqwest::Client,
    probe_url: String,
    timeout: Duration,
    link: Box<dyn LinkState>,
}

impl ConnectivityProbe {
    pub fn new(config: &ConnectivityConfig) -> Self {
        Self::with_link_state(config, Box::new(SysfsLinkState))
    }

    pub fn with_link_state(config: &ConnectivityConfig, link: Box<dyn LinkState>) -> Self {
        Self {
            client: reqwest::Client::new(),
            probe_url: config.probe_url.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            link,
        }
    }

    /// Resolve current reachability.
    ///
    /// No interface up short-circuits to `false` without touching the
    /// network. Otherwise a HEAD request must come back 2xx within the
    /// timeout; abort, error, and non-2xx all mean `false`.
    pub async fn check_online_status(&self) -> bool {
        if !self.link.is_up() {
            debug!("link down, skipping reachability probe");
            return false;
        }

        let response = self
            .client
            .head(&self.probe_url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .timeout(self.timeout)
            .send()
            .await;

        match response {
            Ok(response) => {
                let online = response.status().is_success();
                debug!(status = %response.status(), online, "probe completed");
                online
            }
            Err(e) => {
                debug!(error = %e, "probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn probe_config(url: &str, timeout_ms: u64) -> ConnectivityConfig {
        ConnectivityConfig {
            probe_url: url.to_string(),
            timeout_ms,
        }
    }

    /// Minimal HTTP server answering every request with `status_line`.
    async fn serve_status(listener: TcpListener, status_line: &'static str) {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!("{}\r\ncontent-length: 0\r\n\r\n", status_line);
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    }

    #[tokio::test]
    async fn test_online_when_probe_returns_2xx() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_status(listener, "HTTP/1.1 200 OK"));

        let config = probe_config(&format!("http://{}/favicon.ico", addr), 2000);
        let probe = ConnectivityProbe::with_link_state(&config, Box::new(FixedLinkState(true)));

        assert!(probe.check_online_status().await);
    }

    #[tokio::test]
    async fn test_offline_on_non_2xx() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_status(listener, "HTTP/1.1 503 Service Unavailable"));

        let config = probe_config(&format!("http://{}/favicon.ico", addr), 2000);
        let probe = ConnectivityProbe::with_link_state(&config, Box::new(FixedLinkState(true)));

        assert!(!probe.check_online_status().await);
    }

    #[tokio::test]
    async fn test_hanging_endpoint_resolves_at_timeout() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    return;
                };
                // Hold the socket open without responding
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    drop(socket);
                });
            }
        });

        let config = probe_config(&format!("http://{}/favicon.ico", addr), 300);
        let probe = ConnectivityProbe::with_link_state(&config, Box::new(FixedLinkState(true)));

        let start = Instant::now();
        assert!(!probe.check_online_status().await);
        let elapsed = start.elapsed();

        // Resolved by the timeout, not by the server's 10s hang
        assert!(elapsed >= Duration::from_millis(250), "{:?}", elapsed);
        assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn test_link_down_short_circuits() {
        // URL is never contacted: an unroutable port would otherwise hang
        let config = probe_config("http://127.0.0.1:1/favicon.ico", 5000);
        let probe = ConnectivityProbe::with_link_state(&config, Box::new(FixedLinkState(false)));

        let start = Instant::now();
        assert!(!probe.check_online_status().await);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_connection_refused_is_offline() {
        // Bind then drop to get a port with no listener
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = probe_config(&format!("http://{}/favicon.ico", addr), 2000);
        let probe = ConnectivityProbe::with_link_state(&config, Box::new(FixedLinkState(true)));

        assert!(!probe.check_online_status().await);
    }
}
