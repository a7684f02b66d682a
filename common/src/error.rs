use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures of the scan stage. All of them abort the run before any file is written.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "scanner exited with {status}: {stderr}\nEnsure you have sudo privileges for UDP scanning."
    )]
    ScanFailed { status: ExitStatus, stderr: String },

    #[error("scanner output is not valid UTF-8: {0}")]
    NonUtf8Output(#[from] std::string::FromUtf8Error),

    #[error("failed to parse scanner XML: {0}")]
    MalformedReport(#[from] quick_xml::de::DeError),
}

/// Failures of the emit stage.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {document}: {source}")]
    Encode {
        document: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("ran out of local ports after {0} console proxies")]
    PortsExhausted(usize),
}
