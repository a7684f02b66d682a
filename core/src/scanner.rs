//! Everything that talks to the external scanner.
//!
//! The [`nmap`] submodule owns the process boundary: building the probe command,
//! running it to completion and handing back its XML. The [`report`] submodule
//! turns that XML into classified [`Host`](tinydash_common::network::host::Host)
//! records.
//!
//! Higher level code should go through the
//! [`NetworkScanner`](tinydash_common::scanning::NetworkScanner) trait rather than
//! [`NmapScanner`] directly, so a scripted scanner can stand in during tests.

pub mod nmap;
pub mod report;

pub use nmap::NmapScanner;
