//! Scan engine: dispatches connect probes and collects their results

use crate::config::{ConcurrencyMode, ScanConfig};
use crate::probe::{ConnectProbe, PortReport};
use crate::scanner::{ReportSink, ScanStats, ScanSummary};
use crate::services::ServiceTable;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};

/// Shared, lock-guarded result state for one scan session.
///
/// Holding the sink and the buffer behind one mutex keeps the
/// "report to sink, then append" step atomic across probes. Network I/O
/// never runs under this lock.
struct Collector {
    sink: Box<dyn ReportSink>,
    reports: Vec<PortReport>,
    open_only: bool,
}

impl Collector {
    fn record(&mut self, report: PortReport) {
        if report.is_open() || !self.open_only {
            self.sink.report(&report);
        }
        self.reports.push(report);
    }
}

/// Tracks outstanding probes so the concurrency ceiling is observable
#[derive(Default)]
struct InflightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InflightGauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Main scanning engine
pub struct ScanEngine {
    config: ScanConfig,
    target: IpAddr,
    probe: ConnectProbe,
    services: ServiceTable,
}

impl ScanEngine {
    /// Create a new scan engine with the given configuration.
    ///
    /// The target in the configuration must already be a resolved address;
    /// name resolution is the caller's concern and fails before this point.
    pub fn new(config: ScanConfig) -> crate::Result<Self> {
        config.validate()?;

        let target: IpAddr = config
            .target
            .parse()
            .map_err(|_| crate::ScanError::HostResolution(config.target.clone()))?;

        let probe = ConnectProbe::new(config.timeout_duration());

        Ok(Self {
            config,
            target,
            probe,
            services: ServiceTable::new(),
        })
    }

    /// Probe every configured port and return one report per port.
    ///
    /// Every result is handed to `sink` the moment it is produced. The call
    /// does not return until all dispatched probes have completed; closed
    /// ports suppressed by `open_only` still count toward completion.
    pub async fn scan(&self, sink: Box<dyn ReportSink>) -> crate::Result<ScanSummary> {
        let start_time = Instant::now();
        let total = self.config.ports.len();

        let collector = Arc::new(Mutex::new(Collector {
            sink,
            reports: Vec::with_capacity(total),
            open_only: self.config.open_only,
        }));
        let gauge = Arc::new(InflightGauge::default());

        match self.config.mode {
            ConcurrencyMode::Sequential => {
                self.scan_sequential(&collector, &gauge).await;
            }
            ConcurrencyMode::BoundedParallel => {
                self.scan_parallel(&collector, &gauge).await;
            }
        }

        let reports = {
            let mut collector = collector.lock().await;
            std::mem::take(&mut collector.reports)
        };

        let stats = ScanStats {
            open: reports.iter().filter(|r| r.is_open()).count(),
            closed: reports.iter().filter(|r| !r.is_open()).count(),
            probes_run: reports.len(),
            peak_concurrency: gauge.peak(),
        };

        log::info!(
            "scan of {} finished: {} open, {} closed in {:?}",
            self.config.target,
            stats.open,
            stats.closed,
            start_time.elapsed()
        );

        Ok(ScanSummary {
            target: self.config.target.clone(),
            reports,
            stats,
            duration: start_time.elapsed(),
        })
    }

    async fn scan_sequential(&self, collector: &Arc<Mutex<Collector>>, gauge: &Arc<InflightGauge>) {
        for &port in &self.config.ports {
            gauge.enter();
            let report = self.probe_port(port).await;
            gauge.exit();

            let mut collector = collector.lock().await;
            collector.record(report);
        }
    }

    async fn scan_parallel(&self, collector: &Arc<Mutex<Collector>>, gauge: &Arc<InflightGauge>) {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut handles = Vec::with_capacity(self.config.ports.len());

        for &port in &self.config.ports {
            // admission: permit acquired before the task exists, so the
            // ceiling bounds outstanding probes structurally
            let permit = semaphore.clone().acquire_owned().await.unwrap();
            let collector = collector.clone();
            let gauge = gauge.clone();
            let probe = self.probe;
            let target = self.target;
            let want_banner = self.config.grab_banner;
            let service = self.service_for(port);

            let handle = tokio::spawn(async move {
                let _permit = permit;

                gauge.enter();
                let mut report = probe.probe(target, port, want_banner).await;
                gauge.exit();

                if report.is_open() {
                    report.service = service;
                }

                let mut collector = collector.lock().await;
                collector.record(report);
            });

            handles.push(handle);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                log::error!("probe task failed: {}", e);
            }
        }
    }

    async fn probe_port(&self, port: u16) -> PortReport {
        let mut report = self
            .probe
            .probe(self.target, port, self.config.grab_banner)
            .await;
        if report.is_open() {
            report.service = self.service_for(port);
        }
        report
    }

    fn service_for(&self, port: u16) -> Option<String> {
        if self.config.show_services {
            Some(self.services.lookup(port).to_string())
        } else {
            None
        }
    }
}
