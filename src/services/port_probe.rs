use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::models::Reachability;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Why a connection attempt did not complete
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no connection within {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(#[from] io::Error),
}

/// Decides whether something accepts TCP connections on `host:port`
#[async_trait]
pub trait PortProbe: Send + Sync {
    async fn probe(&self, host: &str, port: u16) -> Reachability;
}

/// Liveness check by plain TCP connect, bounded by a fixed timeout.
///
/// No bytes are exchanged: the stream is dropped as soon as the handshake
/// completes.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn connect(&self, host: &str, port: u16) -> Result<(), ProbeError> {
        self.attempt(TcpStream::connect((host, port))).await
    }

    /// Races one connection attempt against the timeout
    pub(crate) async fn attempt<F>(&self, connecting: F) -> Result<(), ProbeError>
    where
        F: Future<Output = io::Result<TcpStream>>,
    {
        match timeout(self.timeout, connecting).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(ProbeError::Connect(e)),
            Err(_elapsed) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}

pub(crate) fn reachability(host: &str, port: u16, result: Result<(), ProbeError>) -> Reachability {
    match result {
        Ok(()) => Reachability::Running,
        Err(e) => {
            log::debug!("{}:{} is stopped: {}", host, port, e);
            Reachability::Stopped
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl PortProbe for TcpProbe {
    async fn probe(&self, host: &str, port: u16) -> Reachability {
        reachability(host, port, self.connect(host, port).await)
    }
}
