//! Hash kernels and runtime backend selection.
//!
//! Every backend implements the same block algorithm (see
//! [`coefficients`](crate::coefficients)) and returns exactly what the scalar
//! recurrence would. Architecture kernels are tried first; when a kernel is not
//! compiled in or the CPU lacks the feature, the portable lane-parallel kernel
//! runs instead.

mod dispatcher;
#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon;
mod portable;
#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
mod x86;

use core::fmt;
use core::str::FromStr;

use logging::trace_kernel;

use crate::error::ParseBackendError;
use crate::scalar::scalar_hash_with;
use crate::source::ByteSource;
use crate::widening::ByteWidening;

pub(crate) use dispatcher::global;

/// Implementation strategy for the block loop.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Backend {
    /// Sequential recurrence, four bytes per step.
    Scalar,
    /// Lane-parallel accumulation on plain integer arrays, 8 lanes.
    Portable,
    /// AVX2, 8 lanes of 32 bits.
    Avx2,
    /// ARM NEON, 4 lanes of 32 bits.
    Neon,
}

impl Backend {
    /// Every backend, in the order listed above.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Scalar, Self::Portable, Self::Avx2, Self::Neon]
    }

    /// Number of 32-bit lanes per accumulator.
    #[must_use]
    pub const fn lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Portable | Self::Avx2 => 8,
            Self::Neon => 4,
        }
    }

    /// Bytes consumed per outer iteration.
    #[must_use]
    pub const fn block_size(self) -> usize {
        4 * self.lanes()
    }

    /// Lowercase name used in configuration strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Portable => "portable",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }

    /// Reports whether this backend can run on the current CPU with the
    /// features this crate was built with.
    #[must_use]
    pub fn is_supported(self) -> bool {
        match self {
            Self::Scalar | Self::Portable => true,
            Self::Avx2 => avx2_available(),
            Self::Neon => neon_available(),
        }
    }

    /// Picks the fastest supported backend.
    #[must_use]
    pub fn detect() -> Self {
        if avx2_available() {
            Self::Avx2
        } else if neon_available() {
            Self::Neon
        } else {
            Self::Portable
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|backend| trimmed.eq_ignore_ascii_case(backend.name()))
            .ok_or_else(|| ParseBackendError::new(s))
    }
}

/// Hashes `source` with `backend`.
///
/// Architecture backends that cannot run here degrade to the portable kernel.
pub(crate) fn run<S: ByteSource + ?Sized>(
    backend: Backend,
    source: &S,
    widening: ByteWidening,
) -> u32 {
    let accelerated = match backend {
        Backend::Scalar => return scalar_hash_with(source.as_bytes(), widening),
        Backend::Portable => None,
        Backend::Avx2 => avx2_kernel(source.as_bytes(), widening),
        Backend::Neon => neon_kernel(source.as_bytes(), widening),
    };

    accelerated.unwrap_or_else(|| {
        if backend != Backend::Portable {
            trace_kernel!(backend = %backend, "kernel unavailable, using portable lanes");
        }
        portable::hash(source, widening)
    })
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
fn avx2_kernel(bytes: &[u8], widening: ByteWidening) -> Option<u32> {
    x86::try_hash(bytes, widening)
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64"))))]
#[inline]
fn avx2_kernel(_bytes: &[u8], _widening: ByteWidening) -> Option<u32> {
    None
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[inline]
fn neon_kernel(bytes: &[u8], widening: ByteWidening) -> Option<u32> {
    neon::try_hash(bytes, widening)
}

#[cfg(not(all(feature = "simd", target_arch = "aarch64")))]
#[inline]
fn neon_kernel(_bytes: &[u8], _widening: ByteWidening) -> Option<u32> {
    None
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
#[inline]
fn avx2_available() -> bool {
    x86::simd_available()
}

#[cfg(not(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64"))))]
#[inline]
fn avx2_available() -> bool {
    false
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
#[inline]
fn neon_available() -> bool {
    neon::simd_available()
}

#[cfg(not(all(feature = "simd", target_arch = "aarch64")))]
#[inline]
fn neon_available() -> bool {
    false
}
