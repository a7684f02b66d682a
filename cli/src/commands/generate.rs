use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{info, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, format, print};
use tinydash_common::config::{Config, IPMI_PORT, PROXMOX_PORT};
use tinydash_common::network::host::Host;
use tinydash_common::scanning::NetworkScanner;
use tinydash_common::success;
use tinydash_core::discovery::DiscoveryService;
use tinydash_core::emitter::ConfigEmitter;

/// Scans `cidr`, then writes the compose and dashboard files for what was found.
///
/// Nothing is written when the scan or its report fails.
pub fn generate(
    cidr: &str,
    cfg: &Config,
    scanner: Box<dyn NetworkScanner>,
) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();

    let hosts: Vec<Host> = scan(cidr, cfg, scanner)?;
    discovery_ends(&hosts);

    print::header("generating configuration");
    let emitter = ConfigEmitter::from_config(cfg);
    let written: Vec<PathBuf> = emitter
        .emit(&hosts)
        .context("failed to write dashboard configuration")?;

    let templated: usize = written.len() - emitter.layout().placeholder_files().len();
    print_summary(&hosts, templated, start_time.elapsed());
    success!("Dashboard generation complete.");
    Ok(())
}

fn scan(cidr: &str, cfg: &Config, scanner: Box<dyn NetworkScanner>) -> anyhow::Result<Vec<Host>> {
    if cfg.elevate {
        warn!("UDP probing needs raw sockets; running nmap through sudo");
    }
    // The spinner redraws over anything printed to the terminal, sudo's prompt included.
    scanner
        .prepare()
        .context("could not obtain privileges for the scan")?;

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_message(&format!(
        "Probing {} on UDP:{IPMI_PORT} and TCP:{PROXMOX_PORT}...",
        cidr.bold()
    ));
    let guard = span.enter();

    let service = DiscoveryService::new(scanner);
    let result = service.perform_discovery(cidr);

    drop(guard);
    drop(span);

    result.with_context(|| format!("discovery of {cidr} failed"))
}

fn discovery_ends(hosts: &[Host]) {
    if hosts.is_empty() {
        print::header("zero hosts detected");
        info!("No IPMI or Proxmox hosts found.");
        return;
    }

    print::header("management endpoints");
    for (idx, host) in hosts.iter().enumerate() {
        print::tree_head(idx, &host.safe_name());
        print::as_tree_one_level(format::host_to_details(host));
    }
}

/// One line: distinct hosts, how many carry each tag, and templated files written.
fn print_summary(hosts: &[Host], templated: usize, total_time: Duration) {
    let ipmi: usize = hosts.iter().filter(|host| host.is_ipmi()).count();
    let proxmox: usize = hosts.iter().filter(|host| host.is_proxmox()).count();

    let total: ColoredString = format!("{} hosts", hosts.len()).bold().color(colors::ACCENT);
    let ipmi: ColoredString = format!("{ipmi} IPMI").bold().color(colors::IPMI);
    let proxmox: ColoredString = format!("{proxmox} Proxmox").bold().color(colors::PROXMOX);
    let files: ColoredString = format!("{templated} files").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    print::fat_separator();
    print::centerln(
        &format!("{total} ({ipmi}, {proxmox}), {files} generated in {total_time}")
            .color(colors::TEXT_DEFAULT)
            .to_string(),
    );
    print::fat_separator();
}
