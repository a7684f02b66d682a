use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use serde_yaml::Value;
use tinydash_common::config::PROXY_BASE_PORT;
use tinydash_common::network::host::Host;
use tinydash_core::discovery::DiscoveryService;
use tinydash_core::emitter::{ConfigEmitter, OutputLayout};

use crate::utils::{files_under, nmap_report, ScriptedScanner};

const IMAGE: &str = "ipmi-kvm-docker:latest";

/// Runs both stages the way the command line does: nothing is emitted unless
/// discovery succeeded.
fn run(scanner: ScriptedScanner, target: &str, root: &Path) -> anyhow::Result<Vec<Host>> {
    let service = DiscoveryService::new(Box::new(scanner));
    let hosts = service.perform_discovery(target)?;

    let emitter = ConfigEmitter::new(OutputLayout::new(root), IMAGE);
    emitter.emit(&hosts)?;
    Ok(hosts)
}

fn read_yaml(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_yaml::from_str(&text).unwrap()
}

fn proxy_services(compose: &Value) -> Vec<(String, u16)> {
    compose["services"]
        .as_mapping()
        .unwrap()
        .iter()
        .filter_map(|(name, service)| {
            let name = name.as_str()?;
            let mapping = service["ports"][0].as_str()?;
            let (local, _) = mapping.split_once(':')?;
            name.starts_with("kvm-")
                .then(|| (name.to_string(), local.parse().unwrap()))
        })
        .collect()
}

fn group_names(services: &Value) -> Vec<String> {
    services
        .as_sequence()
        .unwrap()
        .iter()
        .flat_map(|group| group.as_mapping().unwrap().keys())
        .map(|key| key.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn ipmi_hosts_get_one_proxy_each_in_discovery_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("tiny-dashboard");
    let report = nmap_report(&[
        ("10.0.0.21", vec![("udp", 623, "open")]),
        ("10.0.0.7", vec![("tcp", 8006, "open")]),
        ("10.0.0.3", vec![("udp", 623, "open")]),
        ("10.0.0.8", vec![("tcp", 8006, "open"), ("udp", 623, "closed")]),
        ("10.0.0.12", vec![("udp", 623, "open")]),
    ]);

    let hosts = run(ScriptedScanner::replaying(report), "10.0.0.0/24", &root).unwrap();
    assert_eq!(hosts.len(), 5);

    let layout = OutputLayout::new(&root);
    let compose = read_yaml(&layout.compose_file());
    let proxies = proxy_services(&compose);

    assert_eq!(
        proxies,
        [
            ("kvm-10-0-0-21".to_string(), PROXY_BASE_PORT),
            ("kvm-10-0-0-3".to_string(), PROXY_BASE_PORT + 1),
            ("kvm-10-0-0-12".to_string(), PROXY_BASE_PORT + 2),
        ]
    );
    assert_eq!(compose["services"]["homepage"]["container_name"].as_str(), Some("homepage"));
    assert_eq!(compose["services"]["kvm-10-0-0-3"]["image"].as_str(), Some(IMAGE));

    let services = read_yaml(&layout.services_file());
    assert_eq!(group_names(&services), ["Proxmox Cluster", "Management Plane"]);

    let nodes = services[0]["Proxmox Cluster"].as_sequence().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes[0]["Node 10-0-0-7"]["href"].as_str(),
        Some("https://10.0.0.7:8006")
    );

    let management = services[1]["Management Plane"].as_sequence().unwrap();
    assert_eq!(management.len(), 6);
    assert_eq!(
        management[3]["IPMI 10-0-0-3 (Console)"]["href"].as_str(),
        Some("http://localhost:8082")
    );
}

#[test]
fn consecutive_addresses_get_consecutive_ports() {
    let dir = tempfile::tempdir().unwrap();
    let report = nmap_report(&[
        ("10.0.0.5", vec![("udp", 623, "open")]),
        ("10.0.0.6", vec![("udp", 623, "open")]),
    ]);

    run(ScriptedScanner::replaying(report), "10.0.0.0/29", dir.path()).unwrap();

    let compose = read_yaml(&OutputLayout::new(dir.path()).compose_file());
    assert_eq!(
        proxy_services(&compose),
        [
            ("kvm-10-0-0-5".to_string(), 8081),
            ("kvm-10-0-0-6".to_string(), 8082),
        ]
    );
}

#[test]
fn host_on_both_probes_appears_in_both_groups() {
    let dir = tempfile::tempdir().unwrap();
    let report = nmap_report(&[(
        "192.168.10.4",
        vec![("udp", 623, "open"), ("tcp", 8006, "open")],
    )]);

    let hosts = run(ScriptedScanner::replaying(report), "192.168.10.0/24", dir.path()).unwrap();
    assert!(hosts[0].is_ipmi() && hosts[0].is_proxmox());

    let layout = OutputLayout::new(dir.path());
    let services = read_yaml(&layout.services_file());
    assert_eq!(group_names(&services), ["Proxmox Cluster", "Management Plane"]);

    let compose = read_yaml(&layout.compose_file());
    assert_eq!(proxy_services(&compose), [("kvm-192-168-10-4".to_string(), 8081)]);
}

#[test]
fn empty_network_still_generates_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("tiny-dashboard");

    let hosts = run(ScriptedScanner::replaying(nmap_report(&[])), "10.9.0.0/24", &root).unwrap();
    assert!(hosts.is_empty());

    let layout = OutputLayout::new(&root);
    let services = fs::read_to_string(layout.services_file()).unwrap();
    assert!(!services.contains("Proxmox Cluster"));
    assert!(!services.contains("Management Plane"));
    assert!(group_names(&serde_yaml::from_str(&services).unwrap()).is_empty());

    let settings = read_yaml(&layout.settings_file());
    assert_eq!(settings["layout"]["Management Plane"]["columns"].as_u64(), Some(4));

    let compose = read_yaml(&layout.compose_file());
    assert!(proxy_services(&compose).is_empty());
    assert_eq!(files_under(&root).len(), 5);
}

#[test]
fn rerun_with_same_report_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    let report = nmap_report(&[
        ("10.0.0.5", vec![("udp", 623, "open")]),
        ("10.0.0.7", vec![("tcp", 8006, "open")]),
    ]);

    run(ScriptedScanner::replaying(report.clone()), "10.0.0.0/24", dir.path()).unwrap();
    let first: Vec<String> = [layout.compose_file(), layout.services_file(), layout.settings_file()]
        .iter()
        .map(|path| fs::read_to_string(path).unwrap())
        .collect();
    let [widgets, _] = layout.placeholder_files();
    let first_touch = fs::metadata(&widgets).unwrap().modified().unwrap();

    thread::sleep(Duration::from_millis(20));
    run(ScriptedScanner::replaying(report), "10.0.0.0/24", dir.path()).unwrap();
    let second: Vec<String> = [layout.compose_file(), layout.services_file(), layout.settings_file()]
        .iter()
        .map(|path| fs::read_to_string(path).unwrap())
        .collect();
    let second_touch = fs::metadata(&widgets).unwrap().modified().unwrap();

    assert_eq!(first, second);
    assert!(second_touch > first_touch);
    assert_eq!(fs::read_to_string(&widgets).unwrap(), "");
}

#[test]
fn malformed_report_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("tiny-dashboard");
    let full = nmap_report(&[("10.0.0.5", vec![("udp", 623, "open")])]);
    let truncated = &full[..full.find("portid=").unwrap()];

    let result = run(ScriptedScanner::replaying(truncated), "10.0.0.0/24", &root);

    assert!(result.is_err());
    assert!(!root.exists());
}

#[test]
fn malformed_report_leaves_previous_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    let good = nmap_report(&[("10.0.0.5", vec![("udp", 623, "open")])]);
    run(ScriptedScanner::replaying(good), "10.0.0.0/24", dir.path()).unwrap();
    let before: Vec<(String, std::time::SystemTime)> = files_under(dir.path())
        .iter()
        .map(|path| {
            (
                fs::read_to_string(path).unwrap(),
                fs::metadata(path).unwrap().modified().unwrap(),
            )
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    let result = run(ScriptedScanner::replaying("<nmaprun><host>"), "10.0.0.0/24", dir.path());
    assert!(result.is_err());

    let after: Vec<(String, std::time::SystemTime)> = files_under(dir.path())
        .iter()
        .map(|path| {
            (
                fs::read_to_string(path).unwrap(),
                fs::metadata(path).unwrap().modified().unwrap(),
            )
        })
        .collect();
    assert_eq!(before, after);
    assert!(layout.compose_file().exists());
}

#[test]
fn scanner_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("tiny-dashboard");
    let scanner = ScriptedScanner::missing();
    let targets = scanner.targets.clone();

    let err = run(scanner, "300.1.2.0/24", &root).unwrap_err();

    assert!(err.to_string().contains("nmap"));
    assert_eq!(*targets.borrow(), ["300.1.2.0/24"]);
    assert!(!root.exists());
}
