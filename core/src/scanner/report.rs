//! Reader for nmap's XML report (`-oX`).
//!
//! Only the parts needed for classification are modelled; everything else in
//! the document is skipped.

use serde::Deserialize;
use tracing::warn;

use tinydash_common::config::{IPMI_PORT, PROXMOX_PORT};
use tinydash_common::error::DiscoveryError;
use tinydash_common::network::host::{Capability, Host};

#[derive(Debug, Deserialize)]
struct NmapRun {
    #[serde(rename = "host", default)]
    hosts: Vec<ReportHost>,
}

#[derive(Debug, Deserialize)]
struct ReportHost {
    #[serde(rename = "address", default)]
    addresses: Vec<ReportAddress>,
    ports: Option<ReportPorts>,
}

#[derive(Debug, Deserialize)]
struct ReportAddress {
    #[serde(rename = "@addr")]
    addr: String,
    #[serde(rename = "@addrtype", default)]
    addrtype: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportPorts {
    #[serde(rename = "port", default)]
    ports: Vec<ReportPort>,
}

#[derive(Debug, Deserialize)]
struct ReportPort {
    #[serde(rename = "@protocol")]
    protocol: String,
    #[serde(rename = "@portid")]
    portid: u16,
    state: Option<ReportState>,
}

#[derive(Debug, Deserialize)]
struct ReportState {
    #[serde(rename = "@state")]
    state: String,
}

impl ReportHost {
    /// The first network-layer address. Hardware (`mac`) addresses are never used.
    fn network_addr(&self) -> Option<&str> {
        self.addresses
            .iter()
            .find(|address| address.addrtype.as_deref() != Some("mac"))
            .map(|address| address.addr.as_str())
    }

    fn capabilities(&self) -> Vec<Capability> {
        self.ports
            .iter()
            .flat_map(|ports| ports.ports.iter())
            .filter_map(ReportPort::capability)
            .collect()
    }
}

impl ReportPort {
    fn is_open(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.state == "open")
    }

    fn capability(&self) -> Option<Capability> {
        if !self.is_open() {
            return None;
        }

        match (self.protocol.as_str(), self.portid) {
            ("udp", IPMI_PORT) => Some(Capability::Ipmi),
            ("tcp", PROXMOX_PORT) => Some(Capability::Proxmox),
            _ => None,
        }
    }
}

/// Parses an nmap XML report into classified hosts, in report order.
///
/// A host is kept only when at least one of its open ports matches a management
/// probe. Hosts without a network address are skipped with a warning.
pub fn parse_report(xml: &str) -> Result<Vec<Host>, DiscoveryError> {
    let run: NmapRun = quick_xml::de::from_str(xml)?;

    let mut hosts = Vec::new();
    for report_host in run.hosts {
        let capabilities = report_host.capabilities();
        if capabilities.is_empty() {
            continue;
        }

        let Some(addr) = report_host.network_addr() else {
            warn!("Skipping a host with open management ports but no address");
            continue;
        };

        hosts.push(Host::new(addr, capabilities));
    }

    Ok(hosts)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
