//! TCP reachability probe against a mail server's submission port.
//!
//! This is a connect-and-close test, not an SMTP handshake: no protocol
//! bytes are sent or read, so a success only means *something* is listening.
//! Outcomes are not cached; reachability is more time-variant than DNS.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::debug;

/// Error messages are truncated to keep reasons display-friendly.
const MAX_ERROR_LEN: usize = 30;

pub const SMTP_PORT: u16 = 25;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    pub reason: String,
}

impl ProbeOutcome {
    fn accessible() -> Self {
        Self {
            reachable: true,
            reason: "SMTP port accessible".to_string(),
        }
    }

    fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            reachable: false,
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, host: &str, port: u16) -> ProbeOutcome;
}

/// Prober backed by a real TCP connect with a bounded timeout.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: u16) -> ProbeOutcome {
        let target = format!("{host}:{port}");

        let addrs: Vec<SocketAddr> = match timeout(self.timeout, lookup_host(&target)).await {
            Err(_) => return ProbeOutcome::unreachable("Connection timeout"),
            Ok(Err(err)) => {
                debug!(host, %err, "mail server name did not resolve");
                return ProbeOutcome::unreachable("Cannot resolve server");
            }
            Ok(Ok(addrs)) => addrs.collect(),
        };
        if addrs.is_empty() {
            return ProbeOutcome::unreachable("Cannot resolve server");
        }

        match timeout(self.timeout, TcpStream::connect(addrs.as_slice())).await {
            Ok(Ok(stream)) => {
                // Close immediately: reachability is all we wanted to learn.
                drop(stream);
                debug!(host, port, "mail server accepted the connection");
                ProbeOutcome::accessible()
            }
            Ok(Err(err)) if err.kind() == std::io::ErrorKind::ConnectionRefused => {
                ProbeOutcome::unreachable("SMTP port not accessible")
            }
            Ok(Err(err)) => {
                ProbeOutcome::unreachable(format!("Connection error: {}", truncate(&err.to_string())))
            }
            Err(_) => ProbeOutcome::unreachable("Connection timeout"),
        }
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn open_port_is_accessible() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let outcome = TcpProber::default().probe("127.0.0.1", port).await;
        assert!(outcome.reachable);
        assert_eq!(outcome.reason, "SMTP port accessible");
    }

    #[tokio::test]
    async fn closed_port_is_not_accessible() {
        // Bind then drop to find a port with nothing listening on it.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let outcome = TcpProber::default().probe("127.0.0.1", port).await;
        assert!(!outcome.reachable);
        assert_eq!(outcome.reason, "SMTP port not accessible");
    }

    #[test]
    fn truncate_bounds_long_messages() {
        let long = "x".repeat(100);
        assert_eq!(truncate(&long).len(), MAX_ERROR_LEN);
        assert_eq!(truncate("short"), "short");
    }
}
