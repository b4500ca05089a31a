//! Byte-to-lane promotion.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseWideningError;

/// How a byte is promoted to a 32-bit lane before it is weighted.
///
/// [`Unsigned`](Self::Unsigned) treats every byte as `0..=255` and is what
/// [`hash`](crate::hash) always uses. [`Signed`](Self::Signed) sign-extends bytes
/// (`0x80..=0xFF` become `-128..=-1`), reproducing hashes produced by runtimes whose
/// byte type is signed.
///
/// # Examples
///
/// ```
/// use polyhash::ByteWidening;
///
/// assert_eq!(ByteWidening::Unsigned.widen(0xFF), 255);
/// assert_eq!(ByteWidening::Signed.widen(0xFF), u32::MAX);
/// assert_eq!("signed".parse::<ByteWidening>().unwrap(), ByteWidening::Signed);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ByteWidening {
    /// Zero-extend: bytes contribute `0..=255`.
    #[default]
    Unsigned,
    /// Sign-extend: bytes contribute `-128..=127` in two's complement.
    Signed,
}

impl ByteWidening {
    /// Widens a single byte according to this mode.
    #[inline]
    #[must_use]
    pub const fn widen(self, byte: u8) -> u32 {
        match self {
            Self::Unsigned => byte as u32,
            Self::Signed => byte as i8 as i32 as u32,
        }
    }

    /// Returns the lowercase name used in configuration strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
        }
    }

    pub(crate) const fn is_signed(self) -> bool {
        matches!(self, Self::Signed)
    }
}

impl fmt::Display for ByteWidening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ByteWidening {
    type Err = ParseWideningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unsigned") {
            Ok(Self::Unsigned)
        } else if trimmed.eq_ignore_ascii_case("signed") {
            Ok(Self::Signed)
        } else {
            Err(ParseWideningError::new(s))
        }
    }
}

/// Re-widens a lane produced by an unsigned load.
///
/// Byte sources always hand out zero-extended lanes; kernels hashing in signed
/// mode pass them through here.
#[inline(always)]
pub(crate) const fn widen_lane<const SIGNED: bool>(lane: u32) -> u32 {
    if SIGNED {
        lane as u8 as i8 as i32 as u32
    } else {
        lane
    }
}
