//! Convenience macros for polyhash tracing.
//!
//! These wrap the standard tracing macros with a fixed target and level per
//! subsystem so `POLYHASH_LOG=polyhash::dispatch=debug` style filters work.
//! Callers must depend on `tracing` themselves.

/// Target for backend selection events.
pub const DISPATCH_TARGET: &str = "polyhash::dispatch";

/// Target for configuration loading events.
pub const CONFIG_TARGET: &str = "polyhash::config";

/// Target for kernel fallback events.
pub const KERNEL_TARGET: &str = "polyhash::kernel";

/// Target for byte source events (mapping, region setup).
pub const SOURCE_TARGET: &str = "polyhash::source";

/// Emit a backend selection trace.
///
/// # Example
/// ```ignore
/// trace_dispatch!(backend = %backend, "selected hash backend");
/// ```
#[macro_export]
macro_rules! trace_dispatch {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "polyhash::dispatch", $($arg)*);
    };
}

/// Emit a configuration trace.
///
/// # Example
/// ```ignore
/// trace_config!(backend = %config.backend(), "loaded hash configuration");
/// ```
#[macro_export]
macro_rules! trace_config {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "polyhash::config", $($arg)*);
    };
}

/// Emit a configuration warning (ignored or unsupported values).
///
/// # Example
/// ```ignore
/// warn_config!(variable = "POLYHASH_BACKEND", "ignoring value");
/// ```
#[macro_export]
macro_rules! warn_config {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "polyhash::config", $($arg)*);
    };
}

/// Emit a kernel trace.
///
/// # Example
/// ```ignore
/// trace_kernel!(backend = %backend, "kernel unavailable");
/// ```
#[macro_export]
macro_rules! trace_kernel {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "polyhash::kernel", $($arg)*);
    };
}

/// Emit a byte source trace.
///
/// # Example
/// ```ignore
/// trace_source!(len, "mapped file region");
/// ```
#[macro_export]
macro_rules! trace_source {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "polyhash::source", $($arg)*);
    };
}
