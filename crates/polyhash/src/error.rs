//! Error types shared by byte sources and configuration parsing.

use thiserror::Error;

/// A read against a [`ByteSource`](crate::ByteSource) fell outside its bounds.
///
/// The panicking accessors ([`read_block`](crate::ByteSource::read_block) and
/// [`read_byte`](crate::ByteSource::read_byte)) render this same message; the
/// `try_` variants return it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SourceError {
    /// `offset + width` exceeds the number of bytes the source exposes.
    #[error("read of {width} byte(s) at offset {offset} exceeds source length {len}")]
    OutOfBounds {
        /// First byte requested.
        offset: usize,
        /// Number of bytes requested.
        width: usize,
        /// Bytes available in the source.
        len: usize,
    },
}

/// Cursor or limit adjustments that would leave a [`ByteWindow`](crate::ByteWindow)
/// inconsistent with its backing buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum WindowError {
    /// The requested `offset..offset + len` range is not inside the buffer.
    #[error("window of {len} byte(s) at offset {offset} exceeds buffer capacity {capacity}")]
    RangeOutOfBounds {
        /// Start of the requested window.
        offset: usize,
        /// Length of the requested window.
        len: usize,
        /// Length of the backing buffer.
        capacity: usize,
    },
    /// The cursor would move past the limit.
    #[error("position {position} is beyond limit {limit}")]
    PositionOutOfRange {
        /// Requested cursor position.
        position: usize,
        /// Current limit.
        limit: usize,
    },
    /// The limit would move past the end of the backing buffer.
    #[error("limit {limit} is beyond buffer capacity {capacity}")]
    LimitOutOfRange {
        /// Requested limit.
        limit: usize,
        /// Length of the backing buffer.
        capacity: usize,
    },
}

/// Unknown backend name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown hash backend {input:?}; expected one of auto, scalar, portable, avx2, neon")]
pub struct ParseBackendError {
    input: String,
}

impl ParseBackendError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Unknown hash variant tag.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error(
    "unknown hash variant {input:?}; expected one of reference, scalar, vectorized, vectorized-copy"
)]
pub struct ParseVariantError {
    input: String,
}

impl ParseVariantError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Unknown byte widening name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown byte widening {input:?}; expected unsigned or signed")]
pub struct ParseWideningError {
    input: String,
}

impl ParseWideningError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A configuration variable held a value that could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The backend variable named an unknown backend.
    #[error("invalid {variable} value: {source}")]
    Backend {
        /// Environment variable that was read.
        variable: &'static str,
        /// Parse failure.
        #[source]
        source: ParseBackendError,
    },
    /// The widening variable named an unknown mode.
    #[error("invalid {variable} value: {source}")]
    Widening {
        /// Environment variable that was read.
        variable: &'static str,
        /// Parse failure.
        #[source]
        source: ParseWideningError,
    },
}
