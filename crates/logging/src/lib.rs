#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logging` gives every crate in the workspace the same tracing targets and
//! the same way of installing a subscriber.
//!
//! # Design
//!
//! - Target macros ([`trace_dispatch!`], [`trace_config!`], [`warn_config!`],
//!   [`trace_kernel!`], [`trace_source!`]) fix the target and level for each
//!   subsystem. They expand to `::tracing` macros, so emitting crates depend
//!   on `tracing` directly and pay nothing when no subscriber is installed.
//! - [`LogConfig`] describes the subscriber: the environment variable holding
//!   filter directives (`POLYHASH_LOG` by default), the fallback directive,
//!   ANSI colours and target display.
//! - With the `tracing` feature, `init_tracing` and `try_init_tracing`
//!   install a registry with an `EnvFilter` and a stderr fmt layer.
//!
//! # Examples
//!
//! ```
//! use logging::{DISPATCH_TARGET, LogConfig};
//!
//! let config = LogConfig::new().with_default_directive(format!("{DISPATCH_TARGET}=debug"));
//! assert_eq!(config.default_directive(), "polyhash::dispatch=debug");
//! ```

mod config;
mod tracing_macros;

#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
mod tracing_bridge;

pub use config::{DEFAULT_DIRECTIVE, LOG_ENV, LogConfig};
pub use tracing_macros::{CONFIG_TARGET, DISPATCH_TARGET, KERNEL_TARGET, SOURCE_TARGET};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{init_tracing, try_init_tracing};
