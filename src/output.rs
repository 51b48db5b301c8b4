//! Terminal reporting and plain-text result persistence

use crate::probe::{PortReport, PortState};
use crate::scanner::ReportSink;
use chrono::Local;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared handle onto the session's plain-text output lines.
///
/// The terminal sink appends as results arrive; the CLI reads it back for
/// `--save` after the scan completes.
#[derive(Debug, Clone, Default)]
pub struct SaveBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl SaveBuffer {
    pub fn push_line(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Write the session's lines to `path`, replacing any previous contents
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "# portspectre scan, {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        for line in self.lines.lock().unwrap().iter() {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

/// Sink that prints each result and records a color-free copy for saving
pub struct TerminalSink {
    buffer: SaveBuffer,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            buffer: SaveBuffer::default(),
        }
    }

    /// Handle onto the save buffer, valid after the sink moves into the engine
    pub fn buffer(&self) -> SaveBuffer {
        self.buffer.clone()
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for TerminalSink {
    fn report(&mut self, report: &PortReport) {
        let mut line = format!("Port {}: {}", report.port, report.state);
        if let Some(ref service) = report.service {
            line.push_str(&format!(" ({})", service));
        }

        match report.state {
            PortState::Open => println!("{}", format!("[+] {}", line).green()),
            PortState::Closed => println!("{}", format!("[-] {}", line).red()),
        }
        self.buffer.push_line(line);

        if let Some(ref banner) = report.banner {
            println!("    {}", format!("Banner: {}", banner).yellow());
            self.buffer.push_line(format!("Banner: {}", banner));
        }
    }
}
