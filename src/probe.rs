//! Single-port TCP connect probing and banner grabbing

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Ports that speak HTTP and get an active request instead of a passive read
const HTTP_PORTS: [u16; 5] = [80, 443, 8080, 8000, 8888];

const HTTP_PROBE: &[u8] = b"GET / HTTP/1.0\r\n\r\n";
const HTTP_READ_LIMIT: usize = 4096;
const PASSIVE_READ_LIMIT: usize = 1024;

/// Port state as observed by a connect probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortState {
    Open,
    Closed,
}

impl std::fmt::Display for PortState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortState::Open => write!(f, "OPEN"),
            PortState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Result of probing a single port
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortReport {
    pub port: u16,
    pub state: PortState,
    pub service: Option<String>,
    pub banner: Option<String>,
}

impl PortReport {
    pub fn closed(port: u16) -> Self {
        Self {
            port,
            state: PortState::Closed,
            service: None,
            banner: None,
        }
    }

    pub fn open(port: u16) -> Self {
        Self {
            port,
            state: PortState::Open,
            service: None,
            banner: None,
        }
    }

    pub fn with_service(mut self, service: String) -> Self {
        self.service = Some(service);
        self
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// Banner acquisition keeps "nothing sent" and "read failed" apart internally;
/// both present as an absent banner in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerOutcome {
    Banner(String),
    Empty,
    Failed(String),
}

impl BannerOutcome {
    pub fn into_banner(self) -> Option<String> {
        match self {
            BannerOutcome::Banner(text) => Some(text),
            BannerOutcome::Empty | BannerOutcome::Failed(_) => None,
        }
    }
}

/// TCP connect prober with a fixed per-operation timeout
#[derive(Debug, Clone, Copy)]
pub struct ConnectProbe {
    timeout: Duration,
}

impl ConnectProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Probe one port: connect, optionally grab a banner, always close.
    ///
    /// Connect timeout, refusal, and unreachability all yield a Closed report.
    /// The connect phase blocks at most `timeout`, banner acquisition at most
    /// one further `timeout`.
    pub async fn probe(&self, target: IpAddr, port: u16, want_banner: bool) -> PortReport {
        let addr = SocketAddr::new(target, port);

        let stream = match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                log::trace!("port {} closed: {}", port, e);
                return PortReport::closed(port);
            }
            Err(_) => {
                log::trace!("port {} timed out after {:?}", port, self.timeout);
                return PortReport::closed(port);
            }
        };

        let mut report = PortReport::open(port);

        if want_banner {
            // one timeout window for the whole banner exchange, so a probe
            // never blocks past connect + one further timeout interval
            let outcome = match timeout(self.timeout, grab_banner(stream, port)).await {
                Ok(outcome) => outcome,
                Err(_) => BannerOutcome::Failed("banner acquisition timed out".to_string()),
            };
            if let BannerOutcome::Failed(ref reason) = outcome {
                log::debug!("banner grab failed on port {}: {}", port, reason);
            }
            report.banner = outcome.into_banner();
        }

        report
    }
}

/// Grab a banner from an already-open connection, consuming it.
///
/// HTTP-like ports get a minimal HTTP/1.0 request and have the `Server:`
/// header extracted; everything else gets one passive read. Failures never
/// escalate past a missing banner; the caller bounds the whole exchange
/// with a timeout.
async fn grab_banner(mut stream: TcpStream, port: u16) -> BannerOutcome {
    if HTTP_PORTS.contains(&port) {
        if let Err(e) = stream.write_all(HTTP_PROBE).await {
            return BannerOutcome::Failed(e.to_string());
        }

        let mut buf = vec![0u8; HTTP_READ_LIMIT];
        match stream.read(&mut buf).await {
            Ok(n) => {
                let response = String::from_utf8_lossy(&buf[..n]);
                match extract_server_header(&response) {
                    Some(server) => BannerOutcome::Banner(server),
                    None => BannerOutcome::Empty,
                }
            }
            Err(e) => BannerOutcome::Failed(e.to_string()),
        }
    } else {
        let mut buf = vec![0u8; PASSIVE_READ_LIMIT];
        match stream.read(&mut buf).await {
            Ok(n) => {
                let text = String::from_utf8_lossy(&buf[..n]).trim().to_string();
                if text.is_empty() {
                    BannerOutcome::Empty
                } else {
                    BannerOutcome::Banner(text)
                }
            }
            Err(e) => BannerOutcome::Failed(e.to_string()),
        }
    }
}

/// Case-insensitive `Server:` header scan over CRLF-split response lines
fn extract_server_header(response: &str) -> Option<String> {
    for line in response.split("\r\n") {
        if line.to_lowercase().starts_with("server:") {
            return line.splitn(2, ':').nth(1).map(|v| v.trim().to_string());
        }
    }
    None
}
