//! # Discovered Host Model
//!
//! A host is an address plus the management capabilities found open on it.
//! Records are built once while reading the scanner report and never change
//! afterwards.

use std::collections::BTreeSet;
use std::fmt;

/// Management endpoint recognised on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Baseboard controller answering on the IPMI UDP port.
    Ipmi,
    /// Proxmox VE node serving its web interface.
    Proxmox,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Ipmi => f.write_str("IPMI"),
            Capability::Proxmox => f.write_str("PROXMOX"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    addr: String,
    capabilities: BTreeSet<Capability>,
}

impl Host {
    pub fn new(addr: impl Into<String>, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            addr: addr.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Address exactly as the scanner reported it.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn capabilities(&self) -> &BTreeSet<Capability> {
        &self.capabilities
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_ipmi(&self) -> bool {
        self.has(Capability::Ipmi)
    }

    pub fn is_proxmox(&self) -> bool {
        self.has(Capability::Proxmox)
    }

    /// The address with every non-alphanumeric character replaced by `-`.
    ///
    /// Used to build container and dashboard entry names (`10.0.0.5` -> `10-0-0-5`).
    pub fn safe_name(&self) -> String {
        self.addr
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect()
    }

    /// Capabilities joined for display, e.g. `IPMI, PROXMOX`.
    pub fn capability_list(&self) -> String {
        self.capabilities
            .iter()
            .map(Capability::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    }
}
