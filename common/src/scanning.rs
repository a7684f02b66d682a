use crate::error::DiscoveryError;

/// Runs the two-port management probe against a target range.
///
/// Implementations hand back the scanner's raw XML report untouched; turning it
/// into hosts is the discovery service's job.
pub trait NetworkScanner {
    /// Settles anything that needs the terminal (a sudo password prompt, say)
    /// before progress output takes it over.
    fn prepare(&self) -> Result<(), DiscoveryError> {
        Ok(())
    }

    fn scan(&self, target: &str) -> Result<String, DiscoveryError>;
}
