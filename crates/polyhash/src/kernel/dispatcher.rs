//! Process-wide backend selection.

use std::sync::OnceLock;

use logging::trace_dispatch;

use crate::config::HashConfig;
use crate::source::ByteSource;
use crate::widening::ByteWidening;

use super::{Backend, run};

/// Holds the backend chosen for this process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Dispatcher {
    backend: Backend,
}

impl Dispatcher {
    /// Resolves `config` against the running CPU.
    pub(crate) fn from_config(config: &HashConfig) -> Self {
        let backend = config.resolve();
        trace_dispatch!(
            backend = %backend,
            lanes = backend.lanes(),
            block_size = backend.block_size(),
            "selected hash backend"
        );
        Self { backend }
    }

    pub(crate) const fn backend(&self) -> Backend {
        self.backend
    }

    #[inline]
    pub(crate) fn hash<S: ByteSource + ?Sized>(&self, source: &S, widening: ByteWidening) -> u32 {
        run(self.backend, source, widening)
    }
}

/// Dispatcher configured from the environment on first use.
pub(crate) fn global() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(|| Dispatcher::from_config(&HashConfig::from_env()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_dispatcher_is_consistent() {
        let first = global();
        let second = global();
        assert!(core::ptr::eq(first, second));
        assert!(first.backend().is_supported());
    }

    #[test]
    fn forced_scalar_dispatcher_hashes_sequentially() {
        let dispatcher = Dispatcher::from_config(&HashConfig::new().with_backend(Backend::Scalar));
        assert_eq!(dispatcher.backend(), Backend::Scalar);
        assert_eq!(dispatcher.hash(&b"abc"[..], ByteWidening::Unsigned), 126_145);
    }
}
