//! Event targets shared between the library crates and the terminal formatter.

/// Target of confirmation events, rendered with the success marker.
pub const SUCCESS_TARGET: &str = "tinydash::success";

/// Target of raw terminal lines, rendered without any marker.
pub const PRINT_TARGET: &str = "tinydash::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::logging::SUCCESS_TARGET, $($arg)*)
    };
}
