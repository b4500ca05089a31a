//! Byte sources over memory the crate does not allocate.
//!
//! [`RawRegion`] borrows an arbitrary pointer/length pair handed over by foreign
//! code. [`MappedRegion`] maps a file read-only. Both hash exactly like a slice
//! holding the same bytes.

#![allow(unsafe_code)]

use core::marker::PhantomData;
use core::ptr::NonNull;

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io;
#[cfg(unix)]
use std::path::Path;

#[cfg(unix)]
use logging::trace_source;

use super::ByteSource;

/// A read-only view over foreign memory described by a raw pointer and length.
#[derive(Clone, Copy, Debug)]
pub struct RawRegion<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _marker: PhantomData<&'a [u8]>,
}

// SAFETY: a RawRegion is a shared borrow of immutable bytes, like &[u8].
unsafe impl Send for RawRegion<'_> {}
// SAFETY: see above.
unsafe impl Sync for RawRegion<'_> {}

impl<'a> RawRegion<'a> {
    /// Wraps `len` bytes starting at `ptr`.
    ///
    /// A zero `len` yields an empty region and `ptr` is never read (it may be
    /// null).
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is null while `len` is non-zero.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must be non-null and valid for reads of `len` bytes
    /// for the whole lifetime `'a`, and the memory must not be mutated while the
    /// region exists. `len` must not exceed `isize::MAX`.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        assert!(
            len == 0 || !ptr.is_null(),
            "null pointer for a {len}-byte region"
        );
        match NonNull::new(ptr.cast_mut()) {
            Some(ptr) if len > 0 => Self {
                ptr,
                len,
                _marker: PhantomData,
            },
            _ => Self {
                ptr: NonNull::dangling(),
                len: 0,
                _marker: PhantomData,
            },
        }
    }

    /// Start address of the region.
    #[must_use]
    pub const fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }
}

impl<'a> From<&'a [u8]> for RawRegion<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        // SAFETY: a live slice satisfies every requirement of from_raw_parts for 'a.
        unsafe { Self::from_raw_parts(bytes.as_ptr(), bytes.len()) }
    }
}

impl ByteSource for RawRegion<'_> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: from_raw_parts' caller guaranteed `len` readable, unaliased-by-writes
        // bytes at `ptr` for the region's lifetime.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

/// A file mapped read-only into memory.
///
/// Empty files are not mapped (most platforms reject zero-length mappings); they
/// expose zero bytes.
#[cfg(unix)]
#[derive(Debug)]
pub struct MappedRegion {
    map: Option<memmap2::Mmap>,
}

#[cfg(unix)]
impl MappedRegion {
    /// Opens and maps the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_file(&file)
    }

    /// Maps an already opened file.
    ///
    /// The file must not be truncated or written while the mapping is alive.
    pub fn from_file(file: &File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        if len == 0 {
            trace_source!("skipping mmap of empty file");
            return Ok(Self { map: None });
        }

        // SAFETY: the mapping is read-only; the caller keeps the file unmodified
        // for as long as the region is alive.
        let map = unsafe { memmap2::Mmap::map(file)? };
        trace_source!(len, "mapped file region");
        Ok(Self { map: Some(map) })
    }
}

#[cfg(unix)]
impl ByteSource for MappedRegion {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}
