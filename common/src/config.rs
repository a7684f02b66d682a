use std::path::PathBuf;

/// UDP port answered by IPMI (RMCP) controllers.
pub const IPMI_PORT: u16 = 623;

/// TCP port of the Proxmox VE web interface.
pub const PROXMOX_PORT: u16 = 8006;

/// First local port handed out to a console proxy container.
pub const PROXY_BASE_PORT: u16 = 8081;

/// Port the console proxy image listens on inside its container.
pub const PROXY_CONTAINER_PORT: u16 = 8080;

pub const DEFAULT_IMAGE: &str = "ipmi-kvm-docker:latest";

/// Directory holding the generated compose file and the dashboard `config/` folder.
pub const DEFAULT_OUTPUT_ROOT: &str = "tiny-dashboard";

#[derive(Debug, Clone)]
pub struct Config {
    /// Image reference used for every console proxy container.
    pub image: String,

    /// Root directory all generated files are written under.
    pub output_root: PathBuf,

    /// Prefixes the scanner invocation with `sudo`.
    ///
    /// The UDP probe needs raw sockets, so this is only turned off when the
    /// process already runs as root.
    pub elevate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            elevate: true,
        }
    }
}
