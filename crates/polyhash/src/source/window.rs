use crate::error::WindowError;

use super::ByteSource;

/// A view into a larger buffer with its own read cursor and limit.
///
/// Only the bytes in `position..limit` are exposed through [`ByteSource`], so a
/// window hashes exactly like a slice of those bytes. Hashing never moves the
/// cursor; callers advance it themselves.
///
/// # Examples
///
/// ```
/// use polyhash::{ByteSource, ByteWindow};
///
/// let buffer = b"header:payload";
/// let mut window = ByteWindow::new(buffer);
/// window.advance(7).unwrap();
/// assert_eq!(window.as_bytes(), b"payload");
///
/// let sliced = window.slice();
/// assert_eq!(sliced.position(), 0);
/// assert_eq!(sliced.capacity(), 7);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByteWindow<'a> {
    buf: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> ByteWindow<'a> {
    /// Creates a window spanning the whole buffer with the cursor at zero.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            position: 0,
            limit: buf.len(),
        }
    }

    /// Creates a window over `buf[offset..offset + len]`.
    ///
    /// The result is rebased: its cursor is zero and its capacity is `len`.
    pub fn with_range(buf: &'a [u8], offset: usize, len: usize) -> Result<Self, WindowError> {
        let region = offset
            .checked_add(len)
            .and_then(|end| buf.get(offset..end))
            .ok_or(WindowError::RangeOutOfBounds {
                offset,
                len,
                capacity: buf.len(),
            })?;
        Ok(Self::new(region))
    }

    /// Current read cursor, relative to the start of the backing buffer.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// End of the readable range, relative to the start of the backing buffer.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Length of the backing buffer.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes between the cursor and the limit.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns `true` while the cursor is before the limit.
    #[inline]
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the cursor to `position`.
    pub fn set_position(&mut self, position: usize) -> Result<(), WindowError> {
        if position > self.limit {
            return Err(WindowError::PositionOutOfRange {
                position,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit to `limit`, pulling the cursor back if it would end up
    /// past the new limit.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), WindowError> {
        if limit > self.buf.len() {
            return Err(WindowError::LimitOutOfRange {
                limit,
                capacity: self.buf.len(),
            });
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Moves the cursor forward by `count` bytes.
    pub fn advance(&mut self, count: usize) -> Result<(), WindowError> {
        let target = self
            .position
            .checked_add(count)
            .ok_or(WindowError::PositionOutOfRange {
                position: usize::MAX,
                limit: self.limit,
            })?;
        self.set_position(target)
    }

    /// Resets the cursor to zero, keeping the limit.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Returns a new window over the remaining bytes with its own cursor at zero.
    #[must_use]
    pub fn slice(&self) -> ByteWindow<'a> {
        ByteWindow::new(&self.buf[self.position..self.limit])
    }
}

impl<'a> From<&'a [u8]> for ByteWindow<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl ByteSource for ByteWindow<'_> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.buf[self.position..self.limit]
    }
}
