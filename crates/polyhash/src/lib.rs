#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod accumulator;
pub mod coefficients;
mod config;
mod error;
mod kernel;
mod reduce;
mod scalar;
mod source;
mod strategy;
mod widening;

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub mod parallel;

pub use coefficients::{CoefficientTable, power_of_31};
pub use config::{BACKEND_ENV, BackendPreference, HashConfig, WIDENING_ENV};
pub use error::{
    ConfigError, ParseBackendError, ParseVariantError, ParseWideningError, SourceError,
    WindowError,
};
pub use kernel::Backend;
pub use scalar::{SEED, scalar_hash, scalar_hash_with};
#[cfg(unix)]
#[cfg_attr(docsrs, doc(cfg(unix)))]
pub use source::MappedRegion;
pub use source::{ByteSource, ByteWindow, RawRegion};
pub use strategy::{
    HashStrategy, HashStrategySelector, HashVariant, ReferenceStrategy, ScalarStrategy,
    VectorizedCopyStrategy, VectorizedStrategy,
};
pub use widening::ByteWidening;

/// Hashes the bytes exposed by `source`.
///
/// Equivalent to starting at `h = 1` and applying `h = 31 * h + byte` for every
/// byte (bytes widened as unsigned, 32-bit wrapping arithmetic), computed with
/// the fastest backend available to the process. Safe to call concurrently.
///
/// # Examples
///
/// ```
/// use polyhash::{ByteWindow, hash};
///
/// assert_eq!(hash(&[0u8; 0]), 1);
/// assert_eq!(hash(b"abc"), 126_145);
///
/// let buffer = [0u8, 0, b'a', b'b', b'c'];
/// let window = ByteWindow::with_range(&buffer, 2, 3).unwrap();
/// assert_eq!(hash(&window), 126_145);
/// ```
#[must_use]
pub fn hash<S: ByteSource + ?Sized>(source: &S) -> u32 {
    kernel::global().hash(source, ByteWidening::Unsigned)
}

/// Hashes `source` with an explicit backend preference and byte widening.
///
/// # Examples
///
/// ```
/// use polyhash::{ByteWidening, HashConfig, hash_with};
///
/// let signed = HashConfig::new().with_widening(ByteWidening::Signed);
/// assert_eq!(hash_with(&[0xFFu8], &signed), 30);
/// assert_eq!(hash_with(&[0xFFu8], &HashConfig::new()), 286);
/// ```
#[must_use]
pub fn hash_with<S: ByteSource + ?Sized>(source: &S, config: &HashConfig) -> u32 {
    kernel::run(config.resolve(), source, config.widening())
}

/// Backend used by [`hash`] in this process.
///
/// Chosen once, on first use, from [`BACKEND_ENV`] and the CPU's features.
#[must_use]
pub fn active_backend() -> Backend {
    kernel::global().backend()
}

/// Reports whether an architecture SIMD kernel (AVX2 or NEON) can run here.
#[must_use]
pub fn simd_acceleration_available() -> bool {
    matches!(Backend::detect(), Backend::Avx2 | Backend::Neon)
}
