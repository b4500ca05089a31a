//! Read-only views over the bytes a kernel hashes.
//!
//! Owned buffers, positioned windows and foreign memory regions all implement
//! [`ByteSource`]. Kernels only ever read through this trait (or the contiguous
//! slice it exposes), so a given run of bytes hashes identically whatever its
//! storage.

mod region;
mod window;

pub use region::RawRegion;
#[cfg(unix)]
pub use region::MappedRegion;
pub use window::ByteWindow;

use crate::error::SourceError;

/// Uniform read-only access to a contiguous run of bytes.
///
/// Only [`as_bytes`](Self::as_bytes) is required. Lane loads widen every byte to
/// an unsigned `0..=255` value in a 32-bit lane, in linear address order: lane 0
/// of a block is the byte at the lowest offset.
///
/// # Panics
///
/// [`read_block`](Self::read_block) and [`read_byte`](Self::read_byte) panic when
/// the requested range is out of bounds. Kernels never issue such reads; use the
/// `try_` variants to probe a source.
///
/// # Examples
///
/// ```
/// use polyhash::ByteSource;
///
/// let bytes = [0x01u8, 0x80, 0xFF, 0x10];
/// let mut lanes = [0u32; 4];
/// bytes.read_block(0, &mut lanes);
/// assert_eq!(lanes, [1, 128, 255, 16]);
/// assert_eq!(bytes.read_byte(2), 255);
/// assert!(bytes.try_read_byte(4).is_err());
/// ```
pub trait ByteSource {
    /// The bytes exposed by this source.
    fn as_bytes(&self) -> &[u8];

    /// Number of bytes exposed by this source.
    #[inline]
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` when the source exposes no bytes.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens `lanes.len()` bytes starting at `offset` into `lanes`.
    #[inline]
    fn try_read_block(&self, offset: usize, lanes: &mut [u32]) -> Result<(), SourceError> {
        let bytes = self.as_bytes();
        let window = offset
            .checked_add(lanes.len())
            .and_then(|end| bytes.get(offset..end))
            .ok_or(SourceError::OutOfBounds {
                offset,
                width: lanes.len(),
                len: bytes.len(),
            })?;

        for (lane, &byte) in lanes.iter_mut().zip(window) {
            *lane = u32::from(byte);
        }
        Ok(())
    }

    /// Widens `lanes.len()` bytes starting at `offset` into `lanes`.
    ///
    /// Requires `offset + lanes.len() <= self.len()`.
    #[inline]
    fn read_block(&self, offset: usize, lanes: &mut [u32]) {
        if let Err(err) = self.try_read_block(offset, lanes) {
            panic!("{err}");
        }
    }

    /// Returns the byte at `offset` widened to a 32-bit lane.
    #[inline]
    fn try_read_byte(&self, offset: usize) -> Result<u32, SourceError> {
        let bytes = self.as_bytes();
        bytes
            .get(offset)
            .map(|&byte| u32::from(byte))
            .ok_or(SourceError::OutOfBounds {
                offset,
                width: 1,
                len: bytes.len(),
            })
    }

    /// Returns the byte at `offset` widened to a 32-bit lane.
    ///
    /// Requires `offset < self.len()`.
    #[inline]
    fn read_byte(&self, offset: usize) -> u32 {
        match self.try_read_byte(offset) {
            Ok(lane) => lane,
            Err(err) => panic!("{err}"),
        }
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteSource for Box<[u8]> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_block_widens_high_bytes_as_unsigned() {
        let data = [0x00u8, 0x7F, 0x80, 0xFF, 0x01, 0x02, 0x03, 0x04];
        let mut lanes = [0u32; 8];
        data.read_block(0, &mut lanes);
        assert_eq!(lanes, [0, 127, 128, 255, 1, 2, 3, 4]);
    }

    #[test]
    fn read_block_keeps_address_order_at_an_offset() {
        let data: Vec<u8> = (0..40).collect();
        let mut lanes = [0u32; 8];
        data.read_block(24, &mut lanes);
        assert_eq!(lanes, [24, 25, 26, 27, 28, 29, 30, 31]);
    }

    #[test]
    fn try_read_block_reports_out_of_bounds() {
        let data = [0u8; 32];
        let mut lanes = [0u32; 8];
        assert_eq!(
            data.try_read_block(25, &mut lanes),
            Err(SourceError::OutOfBounds {
                offset: 25,
                width: 8,
                len: 32,
            })
        );
        assert!(data.try_read_block(24, &mut lanes).is_ok());
    }

    #[test]
    fn try_read_block_rejects_overflowing_offsets() {
        let data = [0u8; 4];
        let mut lanes = [0u32; 2];
        assert!(data.try_read_block(usize::MAX, &mut lanes).is_err());
    }

    #[test]
    #[should_panic(expected = "read of 8 byte(s) at offset 1 exceeds source length 8")]
    fn read_block_panics_past_the_end() {
        let data = [0u8; 8];
        let mut lanes = [0u32; 8];
        data.read_block(1, &mut lanes);
    }

    #[test]
    #[should_panic(expected = "exceeds source length 3")]
    fn read_byte_panics_past_the_end() {
        let data = vec![1u8, 2, 3];
        let _ = data.read_byte(3);
    }

    #[test]
    fn owned_containers_expose_the_same_bytes() {
        let vec = vec![9u8, 8, 7];
        let boxed: Box<[u8]> = vec.clone().into_boxed_slice();
        let array = [9u8, 8, 7];

        assert_eq!(vec.as_bytes(), boxed.as_bytes());
        assert_eq!(array.as_bytes(), vec.as_slice());
        assert_eq!((&vec).len(), 3);
        assert!(Vec::<u8>::new().is_empty());
    }

    #[test]
    fn trait_objects_read_like_concrete_sources() {
        let data = vec![0xAAu8; 5];
        let dynamic: &dyn ByteSource = &data;
        assert_eq!(dynamic.len(), 5);
        assert_eq!(dynamic.read_byte(4), 0xAA);
    }
}
