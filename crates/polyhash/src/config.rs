//! Backend and widening configuration.
//!
//! The process-wide dispatcher reads [`HashConfig::from_env`] once. Embedders
//! that want explicit control build a [`HashConfig`] and pass it to
//! [`hash_with`](crate::hash_with).

use core::fmt;
use core::str::FromStr;

use logging::{trace_config, warn_config};

use crate::error::{ConfigError, ParseBackendError};
use crate::kernel::Backend;
use crate::widening::ByteWidening;

/// Environment variable naming the backend (`auto`, `scalar`, `portable`,
/// `avx2` or `neon`).
pub const BACKEND_ENV: &str = "POLYHASH_BACKEND";

/// Environment variable naming the byte widening (`unsigned` or `signed`).
pub const WIDENING_ENV: &str = "POLYHASH_WIDENING";

/// Which backend a configuration asks for.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BackendPreference {
    /// Use the fastest backend the CPU supports.
    #[default]
    Auto,
    /// Use this backend when supported, otherwise fall back to detection.
    Force(Backend),
}

impl BackendPreference {
    /// Resolves the preference against the running CPU.
    #[must_use]
    pub fn resolve(self) -> Backend {
        match self {
            Self::Auto => Backend::detect(),
            Self::Force(backend) if backend.is_supported() => backend,
            Self::Force(backend) => {
                let detected = Backend::detect();
                warn_config!(
                    requested = %backend,
                    fallback = %detected,
                    "requested hash backend is not supported on this CPU"
                );
                detected
            }
        }
    }
}

impl From<Backend> for BackendPreference {
    fn from(backend: Backend) -> Self {
        Self::Force(backend)
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Force(backend) => fmt::Display::fmt(backend, f),
        }
    }
}

impl FromStr for BackendPreference {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<Backend>().map(Self::Force)
    }
}

/// Hashing configuration: backend preference and byte widening.
///
/// # Examples
///
/// ```
/// use polyhash::{Backend, BackendPreference, ByteWidening, HashConfig};
///
/// let config = HashConfig::new()
///     .with_backend(Backend::Scalar)
///     .with_widening(ByteWidening::Signed);
/// assert_eq!(config.backend(), BackendPreference::Force(Backend::Scalar));
/// assert_eq!(config.resolve(), Backend::Scalar);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HashConfig {
    backend: BackendPreference,
    widening: ByteWidening,
}

impl HashConfig {
    /// Automatic backend, unsigned widening.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backend: BackendPreference::Auto,
            widening: ByteWidening::Unsigned,
        }
    }

    /// Sets the backend preference.
    pub fn with_backend(mut self, backend: impl Into<BackendPreference>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Sets the byte widening.
    pub const fn with_widening(mut self, widening: ByteWidening) -> Self {
        self.widening = widening;
        self
    }

    /// Requested backend.
    #[must_use]
    pub const fn backend(&self) -> BackendPreference {
        self.backend
    }

    /// Byte widening.
    #[must_use]
    pub const fn widening(&self) -> ByteWidening {
        self.widening
    }

    /// Backend that will actually run.
    #[must_use]
    pub fn resolve(&self) -> Backend {
        self.backend.resolve()
    }

    /// Reads [`BACKEND_ENV`] and [`WIDENING_ENV`], logging and ignoring any
    /// value that does not parse.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup_lenient(|name| std::env::var(name).ok())
    }

    /// Reads [`BACKEND_ENV`] and [`WIDENING_ENV`], failing on invalid values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(value) = lookup(BACKEND_ENV) {
            config.backend = value.parse().map_err(|source| ConfigError::Backend {
                variable: BACKEND_ENV,
                source,
            })?;
        }

        if let Some(value) = lookup(WIDENING_ENV) {
            config.widening = value.parse().map_err(|source| ConfigError::Widening {
                variable: WIDENING_ENV,
                source,
            })?;
        }

        trace_config!(
            backend = %config.backend,
            widening = %config.widening,
            "loaded hash configuration"
        );
        Ok(config)
    }

    /// Like [`from_lookup`](Self::from_lookup) but keeps the default for any
    /// variable that fails to parse.
    pub fn from_lookup_lenient<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(value) = lookup(BACKEND_ENV) {
            match value.parse() {
                Ok(backend) => config.backend = backend,
                Err(err) => {
                    warn_config!(variable = BACKEND_ENV, error = %err, "ignoring value");
                }
            }
        }

        if let Some(value) = lookup(WIDENING_ENV) {
            match value.parse() {
                Ok(widening) => config.widening = widening,
                Err(err) => {
                    warn_config!(variable = WIDENING_ENV, error = %err, "ignoring value");
                }
            }
        }

        trace_config!(
            backend = %config.backend,
            widening = %config.widening,
            "loaded hash configuration"
        );
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_auto_and_unsigned() {
        let config = HashConfig::default();
        assert_eq!(config, HashConfig::new());
        assert_eq!(config.backend(), BackendPreference::Auto);
        assert_eq!(config.widening(), ByteWidening::Unsigned);
    }

    #[test]
    fn preference_parses_auto_and_backend_names() {
        assert_eq!("auto".parse(), Ok(BackendPreference::Auto));
        assert_eq!(
            " AVX2 ".parse(),
            Ok(BackendPreference::Force(Backend::Avx2))
        );
        assert_eq!(
            "portable".parse(),
            Ok(BackendPreference::Force(Backend::Portable))
        );
        let err = "sse4".parse::<BackendPreference>().unwrap_err();
        assert_eq!(err.input(), "sse4");
    }

    #[test]
    fn preference_display_round_trips() {
        for pref in [
            BackendPreference::Auto,
            BackendPreference::Force(Backend::Scalar),
            BackendPreference::Force(Backend::Neon),
        ] {
            assert_eq!(pref.to_string().parse(), Ok(pref));
        }
    }

    #[test]
    fn lookup_reads_both_variables() {
        let config =
            HashConfig::from_lookup(lookup(&[(BACKEND_ENV, "scalar"), (WIDENING_ENV, "signed")]))
                .unwrap();
        assert_eq!(config.backend(), BackendPreference::Force(Backend::Scalar));
        assert_eq!(config.widening(), ByteWidening::Signed);
    }

    #[test]
    fn lookup_without_variables_keeps_defaults() {
        let config = HashConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HashConfig::new());
    }

    #[test]
    fn strict_lookup_names_the_bad_variable() {
        let err = HashConfig::from_lookup(lookup(&[(WIDENING_ENV, "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Widening {
                variable: WIDENING_ENV,
                ..
            }
        ));

        let err = HashConfig::from_lookup(lookup(&[(BACKEND_ENV, "gpu")])).unwrap_err();
        assert!(err.to_string().contains(BACKEND_ENV));
    }

    #[test]
    fn lenient_lookup_ignores_bad_values() {
        let config = HashConfig::from_lookup_lenient(lookup(&[
            (BACKEND_ENV, "gpu"),
            (WIDENING_ENV, "signed"),
        ]));
        assert_eq!(config.backend(), BackendPreference::Auto);
        assert_eq!(config.widening(), ByteWidening::Signed);
    }

    #[test]
    fn always_supported_backends_resolve_to_themselves() {
        assert_eq!(
            HashConfig::new().with_backend(Backend::Scalar).resolve(),
            Backend::Scalar
        );
        assert_eq!(
            HashConfig::new().with_backend(Backend::Portable).resolve(),
            Backend::Portable
        );
    }

    #[test]
    fn unsupported_backend_falls_back_to_detection() {
        for &backend in Backend::all() {
            let resolved = BackendPreference::Force(backend).resolve();
            if backend.is_supported() {
                assert_eq!(resolved, backend);
            } else {
                assert_eq!(resolved, Backend::detect());
            }
            assert!(resolved.is_supported());
        }
    }
}
