pub mod generate;

use clap::Parser;
use tinydash_common::config::{Config, DEFAULT_IMAGE};

#[derive(Parser)]
#[command(name = "tinydash")]
#[command(version)]
#[command(about = "Generate Tiny Dashboard configuration from IPMI and Proxmox hosts found on a network.")]
pub struct CommandLine {
    /// Network CIDR to scan (e.g., 192.168.1.0/24)
    pub cidr: String,

    /// Docker image to use for KVM proxies
    #[arg(long, default_value = DEFAULT_IMAGE)]
    pub image: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self, is_root: bool) -> Config {
        Config {
            image: self.image.clone(),
            elevate: !is_root,
            ..Config::default()
        }
    }
}
