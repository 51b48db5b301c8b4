//! Well-known service name lookup

use std::collections::HashMap;

/// Static mapping from well-known port numbers to service names
#[derive(Debug, Clone)]
pub struct ServiceTable {
    tcp_services: HashMap<u16, &'static str>,
}

impl ServiceTable {
    pub fn new() -> Self {
        let mut tcp_services = HashMap::new();

        tcp_services.insert(21, "ftp");
        tcp_services.insert(22, "ssh");
        tcp_services.insert(23, "telnet");
        tcp_services.insert(25, "smtp");
        tcp_services.insert(53, "dns");
        tcp_services.insert(80, "http");
        tcp_services.insert(110, "pop3");
        tcp_services.insert(143, "imap");
        tcp_services.insert(443, "https");
        tcp_services.insert(3306, "mysql");
        tcp_services.insert(3389, "rdp");
        tcp_services.insert(5900, "vnc");
        tcp_services.insert(8080, "http-proxy");

        Self { tcp_services }
    }

    /// Service name for a port, "unknown" for anything unmapped
    pub fn lookup(&self, port: u16) -> &'static str {
        self.tcp_services.get(&port).copied().unwrap_or("unknown")
    }
}

impl Default for ServiceTable {
    fn default() -> Self {
        Self::new()
    }
}
