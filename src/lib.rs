//! portspectre - concurrent TCP connect scanner
//!
//! Scans a target host's ports with bounded concurrency, optionally grabs
//! service banners, and can guess the remote OS from an ICMP echo TTL.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod output;
pub mod ports;
pub mod probe;
pub mod scanner;
pub mod services;

// Re-export commonly used types
pub use config::{ConcurrencyMode, ScanConfig, SpeedProfile};
pub use error::ScanError;
pub use fingerprint::OsFingerprinter;
pub use ports::parse_port_spec;
pub use probe::{ConnectProbe, PortReport, PortState};
pub use scanner::{ReportSink, ScanEngine, ScanStats, ScanSummary};
pub use services::ServiceTable;

pub type Result<T> = std::result::Result<T, ScanError>;
