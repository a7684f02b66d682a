//! Dashboard documents: the service list (`services.yaml`) and the layout
//! settings (`settings.yaml`).

use serde::Serialize;

use tinydash_common::config::PROXMOX_PORT;
use tinydash_common::network::host::Host;

use super::ConsoleProxy;
use super::document::{Named, OrderedMap};

pub const PROXMOX_GROUP: &str = "Proxmox Cluster";
pub const MANAGEMENT_GROUP: &str = "Management Plane";

const DASHBOARD_TITLE: &str = "Tiny Dashboard";
const PROXMOX_COLUMNS: u8 = 3;
const MANAGEMENT_COLUMNS: u8 = 4;

pub type ServicesFile = Vec<ServiceGroup>;
pub type ServiceGroup = Named<Vec<ServiceEntry>>;
pub type ServiceEntry = Named<ServiceLink>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceLink {
    pub icon: String,
    pub href: String,
    pub description: String,
}

impl ServiceLink {
    fn new(icon: &str, href: String, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            href,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsFile {
    pub title: String,
    pub layout: OrderedMap<GroupLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub style: String,
    pub columns: u8,
}

impl GroupLayout {
    fn row(columns: u8) -> Self {
        Self {
            style: "row".to_string(),
            columns,
        }
    }
}

fn proxmox_entry(host: &Host) -> ServiceEntry {
    Named::new(
        format!("Node {}", host.safe_name()),
        ServiceLink::new(
            "proxmox",
            format!("https://{}:{PROXMOX_PORT}", host.addr()),
            "Proxmox Node",
        ),
    )
}

/// Direct link to the controller, then the link to its local console proxy.
fn management_entries(proxy: &ConsoleProxy<'_>) -> [ServiceEntry; 2] {
    let safe_name = proxy.host.safe_name();
    [
        Named::new(
            format!("IPMI {safe_name} (Direct)"),
            ServiceLink::new(
                "mdi-server",
                format!("https://{}", proxy.host.addr()),
                "Direct Management",
            ),
        ),
        Named::new(
            format!("IPMI {safe_name} (Console)"),
            ServiceLink::new(
                "mdi-console",
                format!("http://localhost:{}", proxy.local_port),
                "KVM Console (Proxy)",
            ),
        ),
    ]
}

/// Builds the service list. A group only appears when it has at least one host.
pub fn build_services(hosts: &[Host], proxies: &[ConsoleProxy<'_>]) -> ServicesFile {
    let mut groups = Vec::new();

    let proxmox: Vec<ServiceEntry> = hosts
        .iter()
        .filter(|host| host.is_proxmox())
        .map(proxmox_entry)
        .collect();
    if !proxmox.is_empty() {
        groups.push(Named::new(PROXMOX_GROUP, proxmox));
    }

    let management: Vec<ServiceEntry> = proxies.iter().flat_map(management_entries).collect();
    if !management.is_empty() {
        groups.push(Named::new(MANAGEMENT_GROUP, management));
    }

    groups
}

/// Static layout; independent of what was discovered.
pub fn build_settings() -> SettingsFile {
    let mut layout = OrderedMap::new();
    layout.insert(PROXMOX_GROUP, GroupLayout::row(PROXMOX_COLUMNS));
    layout.insert(MANAGEMENT_GROUP, GroupLayout::row(MANAGEMENT_COLUMNS));

    SettingsFile {
        title: DASHBOARD_TITLE.to_string(),
        layout,
    }
}
