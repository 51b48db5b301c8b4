//! Scanner module containing the scan engine and result aggregation

pub mod engine;

use crate::probe::PortReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use engine::ScanEngine;

/// Sink receiving each result as it is produced, in completion order.
///
/// The engine serializes calls: a report is never interleaved with another
/// port's report.
pub trait ReportSink: Send {
    fn report(&mut self, report: &PortReport);
}

/// Sink that discards everything
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&mut self, _report: &PortReport) {}
}

/// Counters collected over one scan session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Ports that accepted a connection
    pub open: usize,

    /// Ports that refused, timed out, or were unreachable
    pub closed: usize,

    /// Total probes run (always the size of the port list)
    pub probes_run: usize,

    /// Highest number of concurrently outstanding probes observed
    pub peak_concurrency: usize,
}

/// Complete result of one scan session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Target that was scanned
    pub target: String,

    /// One report per requested port, in completion order
    pub reports: Vec<PortReport>,

    /// Session counters
    pub stats: ScanStats,

    /// Total scan duration
    pub duration: Duration,
}

impl ScanSummary {
    /// Ports that accepted a connection, in completion order
    pub fn open_ports(&self) -> Vec<u16> {
        self.reports
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.port)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::PortReport;

    #[test]
    fn test_open_ports_filter() {
        let summary = ScanSummary {
            target: "127.0.0.1".to_string(),
            reports: vec![
                PortReport::open(22),
                PortReport::closed(23),
                PortReport::open(80),
            ],
            stats: ScanStats::default(),
            duration: Duration::from_millis(5),
        };
        assert_eq!(summary.open_ports(), vec![22, 80]);
    }
}
