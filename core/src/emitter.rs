//! # Configuration Emitter
//!
//! Turns a list of discovered hosts into the files the dashboard stack reads:
//!
//! * `docker-compose.yml` with the dashboard plus one console proxy per IPMI host,
//! * `config/services.yaml` with the dashboard's service groups,
//! * `config/settings.yaml` with the static group layout,
//! * empty `config/widgets.yaml` and `config/bookmarks.yaml`.
//!
//! Rendering is pure and deterministic: the same hosts and image always produce
//! byte-identical documents. Writing is a separate step so nothing touches the
//! filesystem until every document encoded successfully.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use tinydash_common::config::{Config, PROXY_BASE_PORT};
use tinydash_common::error::EmitError;
use tinydash_common::network::host::Host;
use tinydash_common::success;

pub mod compose;
pub mod dashboard;
pub mod document;
pub mod layout;

pub use layout::OutputLayout;

/// YAML document start marker the dashboard's sample files carry.
const DOCUMENT_START: &str = "---\n";

/// A console proxy container provisioned for one IPMI host.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleProxy<'a> {
    pub host: &'a Host,
    pub service_name: String,
    pub local_port: u16,
}

impl<'a> ConsoleProxy<'a> {
    pub fn new(host: &'a Host, local_port: u16) -> Self {
        Self {
            host,
            service_name: format!("kvm-{}", host.safe_name()),
            local_port,
        }
    }
}

/// Local port of the `index`-th console proxy, counting from zero.
pub fn proxy_port(index: usize) -> Option<u16> {
    u16::try_from(index)
        .ok()
        .and_then(|offset| PROXY_BASE_PORT.checked_add(offset))
}

/// One proxy per IPMI host in discovery order, on consecutive ports from the base.
pub fn allocate_proxies(hosts: &[Host]) -> Result<Vec<ConsoleProxy<'_>>, EmitError> {
    hosts
        .iter()
        .filter(|host| host.is_ipmi())
        .enumerate()
        .map(|(index, host)| {
            proxy_port(index)
                .map(|port| ConsoleProxy::new(host, port))
                .ok_or(EmitError::PortsExhausted(index))
        })
        .collect()
}

/// The encoded text of every templated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    pub compose: String,
    pub services: String,
    pub settings: String,
}

pub struct ConfigEmitter {
    layout: OutputLayout,
    image: String,
}

impl ConfigEmitter {
    pub fn new(layout: OutputLayout, image: impl Into<String>) -> Self {
        Self {
            layout,
            image: image.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(OutputLayout::new(&cfg.output_root), cfg.image.clone())
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn render(&self, hosts: &[Host]) -> Result<RenderedConfig, EmitError> {
        let proxies = allocate_proxies(hosts)?;

        let compose = compose::build(&proxies, &self.image);
        let services = dashboard::build_services(hosts, &proxies);
        let settings = dashboard::build_settings();

        Ok(RenderedConfig {
            compose: encode("docker-compose.yml", &compose)?,
            services: format!("{DOCUMENT_START}{}", encode("services.yaml", &services)?),
            settings: format!("{DOCUMENT_START}{}", encode("settings.yaml", &settings)?),
        })
    }

    /// Writes the rendered files, creating the config directory when missing.
    ///
    /// Templated files are overwritten; placeholder files are created empty or,
    /// when they exist, only have their modification time refreshed.
    pub fn write(&self, rendered: &RenderedConfig) -> Result<Vec<PathBuf>, EmitError> {
        let config_dir = self.layout.config_dir();
        fs::create_dir_all(&config_dir).map_err(|source| EmitError::Io {
            path: config_dir,
            source,
        })?;

        let templated = [
            (self.layout.compose_file(), &rendered.compose),
            (self.layout.services_file(), &rendered.services),
            (self.layout.settings_file(), &rendered.settings),
        ];

        let mut written = Vec::with_capacity(templated.len() + 2);
        for (path, contents) in templated {
            fs::write(&path, contents).map_err(|source| EmitError::Io {
                path: path.clone(),
                source,
            })?;
            success!("Generated {}", path.display());
            written.push(path);
        }

        for path in self.layout.placeholder_files() {
            touch(&path)?;
            written.push(path);
        }

        Ok(written)
    }

    pub fn emit(&self, hosts: &[Host]) -> Result<Vec<PathBuf>, EmitError> {
        let rendered = self.render(hosts)?;
        self.write(&rendered)
    }
}

fn encode<T: Serialize>(document: &'static str, value: &T) -> Result<String, EmitError> {
    serde_yaml::to_string(value).map_err(|source| EmitError::Encode { document, source })
}

fn touch(path: &Path) -> Result<(), EmitError> {
    let io_err = |source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.set_modified(SystemTime::now()).map_err(io_err)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
