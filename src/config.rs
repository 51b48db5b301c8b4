//! Configuration for scanning operations

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Named timeout presets controlling the per-port connect/read timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedProfile {
    Slow,
    Normal,
    Fast,
    Aggressive,
}

impl SpeedProfile {
    /// Connect/read timeout for this profile
    pub fn timeout(&self) -> Duration {
        match self {
            SpeedProfile::Slow => Duration::from_millis(1500),
            SpeedProfile::Normal => Duration::from_millis(700),
            SpeedProfile::Fast => Duration::from_millis(300),
            SpeedProfile::Aggressive => Duration::from_millis(50),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpeedProfile::Slow => "slow",
            SpeedProfile::Normal => "normal",
            SpeedProfile::Fast => "fast",
            SpeedProfile::Aggressive => "aggressive",
        }
    }
}

impl std::str::FromStr for SpeedProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slow" => Ok(SpeedProfile::Slow),
            "normal" => Ok(SpeedProfile::Normal),
            "fast" => Ok(SpeedProfile::Fast),
            "aggressive" => Ok(SpeedProfile::Aggressive),
            other => Err(format!("Unknown speed profile: {}", other)),
        }
    }
}

/// How probes are dispatched across the port list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// One probe at a time, results in input order
    Sequential,
    /// One task per port, admission capped by `max_concurrency`
    BoundedParallel,
}

/// Main configuration structure for a scan session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Resolved target address (IPv4, as text)
    pub target: String,

    /// List of ports to scan, already validated
    pub ports: Vec<u16>,

    /// Per-port connect/read timeout in milliseconds
    pub timeout_ms: u64,

    /// Probe dispatch mode
    pub mode: ConcurrencyMode,

    /// Ceiling on concurrently outstanding probes in parallel mode
    pub max_concurrency: usize,

    /// Attempt banner grabbing on open ports
    pub grab_banner: bool,

    /// Annotate results with well-known service names
    pub show_services: bool,

    /// Suppress CLOSED results from output and the save buffer
    pub open_only: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: "127.0.0.1".to_string(),
            ports: Vec::new(),
            timeout_ms: SpeedProfile::Normal.timeout().as_millis() as u64,
            mode: ConcurrencyMode::Sequential,
            max_concurrency: 200,
            grab_banner: false,
            show_services: false,
            open_only: false,
        }
    }
}

impl ScanConfig {
    pub fn new(target: String) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_profile(mut self, profile: SpeedProfile) -> Self {
        self.timeout_ms = profile.timeout().as_millis() as u64;
        self
    }

    pub fn with_mode(mut self, mode: ConcurrencyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_concurrency(mut self, ceiling: usize) -> Self {
        self.max_concurrency = ceiling;
        self
    }

    pub fn with_banner_grab(mut self, enabled: bool) -> Self {
        self.grab_banner = enabled;
        self
    }

    pub fn with_services(mut self, enabled: bool) -> Self {
        self.show_services = enabled;
        self
    }

    pub fn with_open_only(mut self, enabled: bool) -> Self {
        self.open_only = enabled;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the configuration before any network I/O
    pub fn validate(&self) -> crate::Result<()> {
        if self.ports.is_empty() {
            return Err(crate::ScanError::Config("No ports to scan".to_string()));
        }
        if self.max_concurrency == 0 {
            return Err(crate::ScanError::Config(
                "Concurrency ceiling must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(crate::ScanError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
