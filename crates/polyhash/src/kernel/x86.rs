//! AVX2 kernel for x86 and x86_64.
//!
//! Each 32-byte block is four 8-byte sub-blocks. A sub-block is loaded into the
//! low half of an XMM register and widened to eight 32-bit lanes with
//! `vpmovzxbd` (or `vpmovsxbd` when hashing signed bytes), then folded into its
//! accumulator with `vpmulld`/`vpaddd`. The lanes are stored and summed once
//! after the block loop and the remainder goes through the scalar tail.
//!
//! # Safety
//!
//! AVX2 support is detected at runtime and cached in a `OnceLock`; the
//! `#[target_feature]` function is only entered after detection succeeds. Loads
//! are unaligned and the loop condition keeps every load inside the slice.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, __m256i, _mm_loadl_epi64, _mm256_add_epi32, _mm256_cvtepi8_epi32,
    _mm256_cvtepu8_epi32, _mm256_loadu_si256, _mm256_mullo_epi32, _mm256_set1_epi32,
    _mm256_setr_epi32, _mm256_setzero_si256, _mm256_storeu_si256,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, __m256i, _mm_loadl_epi64, _mm256_add_epi32, _mm256_cvtepi8_epi32,
    _mm256_cvtepu8_epi32, _mm256_loadu_si256, _mm256_mullo_epi32, _mm256_set1_epi32,
    _mm256_setr_epi32, _mm256_setzero_si256, _mm256_storeu_si256,
};

use std::sync::OnceLock;

use crate::coefficients::{SUB_BLOCKS, TABLE_8_LANES};
use crate::reduce::{complete_tail, sum_lanes};
use crate::widening::ByteWidening;

const LANES: usize = 8;
const BLOCK_LEN: usize = SUB_BLOCKS * LANES;

static AVX2_AVAILABLE: OnceLock<bool> = OnceLock::new();

#[inline]
fn avx2_available() -> bool {
    *AVX2_AVAILABLE.get_or_init(|| std::arch::is_x86_feature_detected!("avx2"))
}

#[inline]
pub(super) fn simd_available() -> bool {
    avx2_available()
}

/// Runs the AVX2 kernel, or returns `None` when the CPU lacks AVX2.
#[inline]
pub(super) fn try_hash(bytes: &[u8], widening: ByteWidening) -> Option<u32> {
    if !avx2_available() {
        return None;
    }

    // SAFETY: AVX2 support was verified above.
    let hash = unsafe {
        if widening.is_signed() {
            hash_avx2::<true>(bytes)
        } else {
            hash_avx2::<false>(bytes)
        }
    };
    Some(hash)
}

#[target_feature(enable = "avx2")]
unsafe fn load_lanes<const SIGNED: bool>(ptr: *const u8) -> __m256i {
    let packed = _mm_loadl_epi64(ptr.cast::<__m128i>());
    if SIGNED {
        _mm256_cvtepi8_epi32(packed)
    } else {
        _mm256_cvtepu8_epi32(packed)
    }
}

#[target_feature(enable = "avx2")]
unsafe fn hash_avx2<const SIGNED: bool>(bytes: &[u8]) -> u32 {
    let table = &TABLE_8_LANES;
    let carry = _mm256_set1_epi32(table.carry() as i32);
    let coeff: [__m256i; SUB_BLOCKS] = [
        _mm256_loadu_si256(table.coefficients(0).as_ptr().cast()),
        _mm256_loadu_si256(table.coefficients(1).as_ptr().cast()),
        _mm256_loadu_si256(table.coefficients(2).as_ptr().cast()),
        _mm256_loadu_si256(table.coefficients(3).as_ptr().cast()),
    ];

    let zero = _mm256_setzero_si256();
    let seed = _mm256_setr_epi32(1, 0, 0, 0, 0, 0, 0, 0);
    let mut acc: [__m256i; SUB_BLOCKS] = [seed, zero, zero, zero];

    let mut offset = 0usize;
    while bytes.len() - offset >= BLOCK_LEN {
        let block = bytes.as_ptr().add(offset);
        for (group, (h, c)) in acc.iter_mut().zip(&coeff).enumerate() {
            let x = load_lanes::<SIGNED>(block.add(group * LANES));
            *h = _mm256_add_epi32(_mm256_mullo_epi32(*h, carry), _mm256_mullo_epi32(x, *c));
        }
        offset += BLOCK_LEN;
    }

    let mut lanes = [0u32; LANES];
    let mut partial = 0u32;
    for h in &acc {
        _mm256_storeu_si256(lanes.as_mut_ptr().cast(), *h);
        partial = partial.wrapping_add(sum_lanes(&lanes));
    }

    complete_tail::<SIGNED, [u8]>(partial, bytes, offset)
}

#[cfg(test)]
pub(super) fn cpu_features_cached_for_tests() -> bool {
    AVX2_AVAILABLE.get().is_some()
}
