//! # tinydash common
//!
//! Types shared by every crate of the workspace: the discovered [`network::host::Host`]
//! model, the run [`config::Config`], error types, the [`scanning::NetworkScanner`]
//! seam and the logging macros.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod scanning;

#[doc(hidden)]
pub use tracing as __tracing;
