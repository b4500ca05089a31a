//! Sequential implementations of the recurrence, used as the reference every
//! vectorized backend must reproduce.

use crate::coefficients::MULTIPLIER;
use crate::widening::{ByteWidening, widen_lane};

/// Initial hash value; also the hash of an empty input.
pub const SEED: u32 = 1;

const P2: u32 = MULTIPLIER * MULTIPLIER;
const P3: u32 = P2 * MULTIPLIER;
const P4: u32 = P3 * MULTIPLIER;

/// Hashes `bytes` sequentially: `h = 1`, then `h = 31 * h + byte` per byte with
/// 32-bit wrapping arithmetic.
///
/// # Examples
///
/// ```
/// use polyhash::scalar_hash;
///
/// assert_eq!(scalar_hash(b""), 1);
/// assert_eq!(scalar_hash(b"a"), 31 + 97);
/// ```
#[must_use]
pub fn scalar_hash(bytes: &[u8]) -> u32 {
    unrolled::<false>(SEED, bytes)
}

/// Sequential hash with an explicit byte widening.
#[must_use]
pub fn scalar_hash_with(bytes: &[u8], widening: ByteWidening) -> u32 {
    if widening.is_signed() {
        unrolled::<true>(SEED, bytes)
    } else {
        unrolled::<false>(SEED, bytes)
    }
}

/// Byte-at-a-time fold with no unrolling.
pub(crate) fn reference_hash(bytes: &[u8], widening: ByteWidening) -> u32 {
    bytes.iter().fold(SEED, |hash, &byte| {
        hash.wrapping_mul(MULTIPLIER)
            .wrapping_add(widening.widen(byte))
    })
}

/// Four bytes per step: `h * 31^4 + b0 * 31^3 + b1 * 31^2 + b2 * 31 + b3`.
#[inline]
fn unrolled<const SIGNED: bool>(mut hash: u32, bytes: &[u8]) -> u32 {
    let mut iter = bytes.chunks_exact(4);
    for block in &mut iter {
        let b0 = widen_lane::<SIGNED>(u32::from(block[0]));
        let b1 = widen_lane::<SIGNED>(u32::from(block[1]));
        let b2 = widen_lane::<SIGNED>(u32::from(block[2]));
        let b3 = widen_lane::<SIGNED>(u32::from(block[3]));

        hash = hash
            .wrapping_mul(P4)
            .wrapping_add(b0.wrapping_mul(P3))
            .wrapping_add(b1.wrapping_mul(P2))
            .wrapping_add(b2.wrapping_mul(MULTIPLIER))
            .wrapping_add(b3);
    }

    for &byte in iter.remainder() {
        hash = hash
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(widen_lane::<SIGNED>(u32::from(byte)));
    }

    hash
}
