use crate::terminal::colors;
use colored::*;
use tinydash_common::network::host::{Capability, Host};

type Detail = (String, ColoredString);

pub fn capability_to_colored(capability: Capability) -> ColoredString {
    match capability {
        Capability::Ipmi => capability.to_string().color(colors::IPMI).bold(),
        Capability::Proxmox => capability.to_string().color(colors::PROXMOX).bold(),
    }
}

/// Tree details for one host: its address and the management endpoints it exposes.
pub fn host_to_details(host: &Host) -> Vec<Detail> {
    let sep: String = ", ".color(colors::SEPARATOR).to_string();
    let tags: String = host
        .capabilities()
        .iter()
        .map(|capability| capability_to_colored(*capability).to_string())
        .collect::<Vec<String>>()
        .join(sep.as_str());

    vec![
        ("Addr".to_string(), host.addr().color(colors::ADDRESS)),
        ("Tags".to_string(), tags.normal()),
    ]
}
