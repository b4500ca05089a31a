//! Interchangeable hash implementations behind one capability.
//!
//! Benchmarks and embedders pick an implementation by [`HashVariant`] tag and get
//! back a boxed [`HashStrategy`]. Every variant returns the same value for the
//! same bytes and widening; they differ only in how the bytes are walked.
//!
//! # Examples
//!
//! ```
//! use polyhash::{HashStrategySelector, HashVariant};
//!
//! let data = b"the same bytes, four ways".to_vec();
//! let hashes: Vec<u32> = HashVariant::all()
//!     .iter()
//!     .map(|&variant| HashStrategySelector::for_variant(variant).hash(&data))
//!     .collect();
//! assert!(hashes.windows(2).all(|pair| pair[0] == pair[1]));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::config::{BackendPreference, HashConfig};
use crate::error::ParseVariantError;
use crate::kernel::{self, Backend};
use crate::scalar::{reference_hash, scalar_hash_with};
use crate::source::ByteSource;
use crate::widening::ByteWidening;

/// Tag naming a hash implementation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum HashVariant {
    /// Byte-at-a-time fold, the definition of the hash.
    Reference,
    /// Sequential recurrence unrolled four bytes per step.
    Scalar,
    /// Lane-parallel kernel reading the source in place.
    Vectorized,
    /// Lane-parallel kernel over a freshly allocated copy of the source.
    VectorizedCopy,
}

impl HashVariant {
    /// Every variant.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Reference,
            Self::Scalar,
            Self::Vectorized,
            Self::VectorizedCopy,
        ]
    }

    /// Tag used in configuration strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Scalar => "scalar",
            Self::Vectorized => "vectorized",
            Self::VectorizedCopy => "vectorized-copy",
        }
    }

    /// Returns `true` for the lane-parallel variants.
    #[must_use]
    pub const fn is_vectorized(self) -> bool {
        matches!(self, Self::Vectorized | Self::VectorizedCopy)
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|variant| normalized.eq_ignore_ascii_case(variant.name()))
            .ok_or_else(|| ParseVariantError::new(s))
    }
}

/// A `hash(bytes) -> u32` implementation.
pub trait HashStrategy: Send + Sync {
    /// Which variant this is.
    fn variant(&self) -> HashVariant;

    /// Widening applied to every byte.
    fn widening(&self) -> ByteWidening;

    /// Hashes the bytes exposed by `source`.
    fn hash(&self, source: &dyn ByteSource) -> u32;
}

/// [`HashVariant::Reference`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReferenceStrategy {
    widening: ByteWidening,
}

impl ReferenceStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(widening: ByteWidening) -> Self {
        Self { widening }
    }
}

impl HashStrategy for ReferenceStrategy {
    fn variant(&self) -> HashVariant {
        HashVariant::Reference
    }

    fn widening(&self) -> ByteWidening {
        self.widening
    }

    fn hash(&self, source: &dyn ByteSource) -> u32 {
        reference_hash(source.as_bytes(), self.widening)
    }
}

/// [`HashVariant::Scalar`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScalarStrategy {
    widening: ByteWidening,
}

impl ScalarStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new(widening: ByteWidening) -> Self {
        Self { widening }
    }
}

impl HashStrategy for ScalarStrategy {
    fn variant(&self) -> HashVariant {
        HashVariant::Scalar
    }

    fn widening(&self) -> ByteWidening {
        self.widening
    }

    fn hash(&self, source: &dyn ByteSource) -> u32 {
        scalar_hash_with(source.as_bytes(), self.widening)
    }
}

/// [`HashVariant::Vectorized`]: runs a lane-parallel backend directly over the
/// source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VectorizedStrategy {
    backend: Backend,
    widening: ByteWidening,
}

impl VectorizedStrategy {
    /// Uses `backend`. [`Backend::Scalar`] is replaced by portable lanes, and
    /// unsupported architecture backends degrade to portable lanes at hash
    /// time.
    #[must_use]
    pub const fn new(backend: Backend, widening: ByteWidening) -> Self {
        Self {
            backend: lane_parallel(backend),
            widening,
        }
    }

    /// Uses the process-wide backend.
    #[must_use]
    pub fn detected(widening: ByteWidening) -> Self {
        Self::new(kernel::global().backend(), widening)
    }

    /// Backend this strategy runs.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }
}

impl HashStrategy for VectorizedStrategy {
    fn variant(&self) -> HashVariant {
        HashVariant::Vectorized
    }

    fn widening(&self) -> ByteWidening {
        self.widening
    }

    fn hash(&self, source: &dyn ByteSource) -> u32 {
        kernel::run(self.backend, source, self.widening)
    }
}

/// [`HashVariant::VectorizedCopy`]: copies the source into an owned buffer and
/// hashes the copy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VectorizedCopyStrategy {
    inner: VectorizedStrategy,
}

impl VectorizedCopyStrategy {
    /// Uses `backend` over the copied bytes.
    #[must_use]
    pub const fn new(backend: Backend, widening: ByteWidening) -> Self {
        Self {
            inner: VectorizedStrategy::new(backend, widening),
        }
    }

    /// Uses the process-wide backend.
    #[must_use]
    pub fn detected(widening: ByteWidening) -> Self {
        Self {
            inner: VectorizedStrategy::detected(widening),
        }
    }

    /// Backend this strategy runs.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.inner.backend
    }
}

impl HashStrategy for VectorizedCopyStrategy {
    fn variant(&self) -> HashVariant {
        HashVariant::VectorizedCopy
    }

    fn widening(&self) -> ByteWidening {
        self.inner.widening
    }

    fn hash(&self, source: &dyn ByteSource) -> u32 {
        let copy: Vec<u8> = source.as_bytes().to_vec();
        kernel::run(self.inner.backend, &copy, self.inner.widening)
    }
}

/// Builds strategies from variant tags.
#[derive(Clone, Copy, Debug)]
pub struct HashStrategySelector;

impl HashStrategySelector {
    /// Strategy for `variant` with unsigned widening and the process-wide backend.
    #[must_use]
    pub fn for_variant(variant: HashVariant) -> Box<dyn HashStrategy> {
        Self::with_config(variant, &HashConfig::new())
    }

    /// Strategy for `variant` honouring `config`'s backend and widening.
    #[must_use]
    pub fn with_config(variant: HashVariant, config: &HashConfig) -> Box<dyn HashStrategy> {
        let widening = config.widening();
        match variant {
            HashVariant::Reference => Box::new(ReferenceStrategy::new(widening)),
            HashVariant::Scalar => Box::new(ScalarStrategy::new(widening)),
            HashVariant::Vectorized => Box::new(VectorizedStrategy::new(
                vectorized_backend(config),
                widening,
            )),
            HashVariant::VectorizedCopy => Box::new(VectorizedCopyStrategy::new(
                vectorized_backend(config),
                widening,
            )),
        }
    }
}

fn vectorized_backend(config: &HashConfig) -> Backend {
    let backend = match config.backend() {
        BackendPreference::Auto => kernel::global().backend(),
        BackendPreference::Force(_) => config.resolve(),
    };
    lane_parallel(backend)
}

/// Vectorized variants never run the sequential recurrence.
const fn lane_parallel(backend: Backend) -> Backend {
    match backend {
        Backend::Scalar => Backend::Portable,
        other => other,
    }
}
