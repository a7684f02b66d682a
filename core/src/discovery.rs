//! # Management Endpoint Discovery
//!
//! Implements the scan stage: run the probe, read its report, return the
//! classified hosts.

use tracing::info;

use tinydash_common::config::{IPMI_PORT, PROXMOX_PORT};
use tinydash_common::error::DiscoveryError;
use tinydash_common::network::host::Host;
use tinydash_common::scanning::NetworkScanner;
use tinydash_common::success;

use crate::scanner::report;

/// Application service for the scan stage.
///
/// Delegates the raw probe to a [`NetworkScanner`] and owns the interpretation
/// of its report.
pub struct DiscoveryService {
    scanner: Box<dyn NetworkScanner>,
}

impl DiscoveryService {
    pub fn new(scanner: Box<dyn NetworkScanner>) -> Self {
        Self { scanner }
    }

    /// Scans `target` and returns every host with an open management port, in
    /// the order the scanner reported them.
    ///
    /// The target is handed to the scanner as is; an invalid range surfaces as a
    /// scanner failure.
    pub fn perform_discovery(&self, target: &str) -> Result<Vec<Host>, DiscoveryError> {
        info!("Scanning {target} for IPMI (UDP:{IPMI_PORT}) and Proxmox (TCP:{PROXMOX_PORT})...");

        let xml = self.scanner.scan(target)?;
        let hosts = report::parse_report(&xml)?;

        for host in &hosts {
            success!("Found [{}] at {}", host.capability_list(), host.addr());
        }

        Ok(hosts)
    }
}
