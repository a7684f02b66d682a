//! A blocking **nmap** adapter.
//!
//! Probes UDP on the IPMI port and TCP (SYN) on the Proxmox port in a single
//! run, keeping only hosts with at least one open target port, and collects the
//! XML report from stdout.
//!
//! The UDP probe needs raw sockets, so the command is prefixed with `sudo`
//! unless the process already runs as root.

use std::process::{Command, Stdio};

use tracing::debug;

use tinydash_common::config::{IPMI_PORT, PROXMOX_PORT};
use tinydash_common::error::DiscoveryError;
use tinydash_common::scanning::NetworkScanner;

const NMAP: &str = "nmap";
const SUDO: &str = "sudo";

pub struct NmapScanner {
    program: String,
    elevate: bool,
}

impl NmapScanner {
    pub fn new(elevate: bool) -> Self {
        Self {
            program: NMAP.to_string(),
            elevate,
        }
    }

    /// Uses another scanner binary in place of `nmap` from `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Builds the probe command. The target is passed through untouched.
    fn command(&self, target: &str) -> Command {
        let mut command = if self.elevate {
            let mut sudo = Command::new(SUDO);
            sudo.arg(&self.program);
            sudo
        } else {
            Command::new(&self.program)
        };

        command
            .arg("-p")
            .arg(probe_ports())
            .args(["-sU", "-sS", "--open", "-oX", "-"])
            .arg(target);
        command
    }

    /// `sudo -v`, when the scan is elevated.
    fn credentials_command(&self) -> Option<Command> {
        if !self.elevate {
            return None;
        }
        let mut sudo = Command::new(SUDO);
        sudo.arg("-v");
        Some(sudo)
    }

    fn launcher(&self) -> &str {
        if self.elevate { SUDO } else { &self.program }
    }
}

/// Port specification covering both management probes, e.g. `U:623,T:8006`.
pub fn probe_ports() -> String {
    format!("U:{IPMI_PORT},T:{PROXMOX_PORT}")
}

impl NetworkScanner for NmapScanner {
    fn prepare(&self) -> Result<(), DiscoveryError> {
        let Some(mut command) = self.credentials_command() else {
            return Ok(());
        };
        debug!("running {:?}", command);

        let status = command
            .status()
            .map_err(|source| DiscoveryError::Spawn {
                program: SUDO.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(DiscoveryError::ScanFailed {
                status,
                stderr: "sudo could not confirm credentials".to_string(),
            });
        }
        Ok(())
    }

    fn scan(&self, target: &str) -> Result<String, DiscoveryError> {
        let mut command = self.command(target);
        debug!("running {:?}", command);

        // sudo may need the terminal to ask for a password.
        let output = command
            .stdin(Stdio::inherit())
            .output()
            .map_err(|source| DiscoveryError::Spawn {
                program: self.launcher().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::ScanFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
