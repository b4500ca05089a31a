//! Subscriber configuration.

/// Environment variable consulted for filter directives.
pub const LOG_ENV: &str = "POLYHASH_LOG";

/// Directive used when the environment does not provide one.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Settings for the subscriber installed by `init_tracing`.
///
/// # Example
///
/// ```
/// use logging::LogConfig;
///
/// let config = LogConfig::new()
///     .with_default_directive("polyhash=debug")
///     .with_ansi(false);
/// assert_eq!(config.default_directive(), "polyhash=debug");
/// assert_eq!(config.env_var(), "POLYHASH_LOG");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LogConfig {
    default_directive: String,
    env_var: String,
    ansi: bool,
    with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LogConfig {
    /// `warn` by default, overridable through `POLYHASH_LOG`, with ANSI colours
    /// and event targets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_owned(),
            env_var: LOG_ENV.to_owned(),
            ansi: true,
            with_target: true,
        }
    }

    /// Replaces the fallback filter directive.
    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Reads directives from a different environment variable.
    #[must_use]
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Enables or disables ANSI colours.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Enables or disables printing the event target.
    #[must_use]
    pub const fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Fallback filter directive.
    #[must_use]
    pub fn default_directive(&self) -> &str {
        &self.default_directive
    }

    /// Environment variable holding filter directives.
    #[must_use]
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Whether ANSI colours are emitted.
    #[must_use]
    pub const fn ansi(&self) -> bool {
        self.ansi
    }

    /// Whether event targets are printed.
    #[must_use]
    pub const fn shows_target(&self) -> bool {
        self.with_target
    }

    /// Builds the filter from the environment, falling back to
    /// [`default_directive`](Self::default_directive).
    #[cfg(feature = "tracing")]
    #[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
    #[must_use]
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        self.filter_from(std::env::var(&self.env_var).ok().as_deref())
    }

    /// Builds the filter from explicit directives; invalid or missing
    /// directives fall back to [`default_directive`](Self::default_directive).
    #[cfg(feature = "tracing")]
    #[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
    #[must_use]
    pub fn filter_from(&self, directives: Option<&str>) -> tracing_subscriber::EnvFilter {
        use tracing_subscriber::EnvFilter;

        directives
            .and_then(|value| EnvFilter::try_new(value).ok())
            .unwrap_or_else(|| EnvFilter::new(&self.default_directive))
    }
}
