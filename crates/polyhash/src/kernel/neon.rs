//! ARM NEON kernel for aarch64.
//!
//! NEON registers hold four 32-bit lanes, so blocks are 16 bytes and use the
//! 4-lane coefficient table. One `vld1q_u8` loads the whole block; the four
//! sub-blocks are its quarters, widened through 16 to 32 bits.
//!
//! # Safety
//!
//! - NEON availability is checked with `is_aarch64_feature_detected!("neon")`
//!   and cached in a `OnceLock` before the kernel is entered.
//! - NEON loads do not require alignment.
//! - The loop condition keeps every 16-byte load inside the slice; the
//!   remainder goes through the scalar tail.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::{
    uint8x16_t, uint32x4_t, vaddvq_u32, vget_high_s8, vget_high_s16, vget_high_u8,
    vget_high_u16, vget_low_s8, vget_low_s16, vget_low_u8, vget_low_u16, vld1q_u8, vld1q_u32,
    vmlaq_u32, vmovl_s8, vmovl_s16, vmovl_u8, vmovl_u16, vmulq_n_u32, vreinterpretq_s8_u8,
    vreinterpretq_u32_s32,
};
use std::sync::OnceLock;

use crate::coefficients::{SUB_BLOCKS, TABLE_4_LANES};
use crate::reduce::complete_tail;
use crate::widening::ByteWidening;

const LANES: usize = 4;
const BLOCK_LEN: usize = SUB_BLOCKS * LANES;
const SEED_LANES: [u32; LANES] = [1, 0, 0, 0];
const ZERO_LANES: [u32; LANES] = [0; LANES];

static NEON_AVAILABLE: OnceLock<bool> = OnceLock::new();

#[inline]
fn neon_available() -> bool {
    *NEON_AVAILABLE.get_or_init(|| std::arch::is_aarch64_feature_detected!("neon"))
}

#[inline]
pub(super) fn simd_available() -> bool {
    neon_available()
}

#[inline]
pub(super) fn try_hash(bytes: &[u8], widening: ByteWidening) -> Option<u32> {
    if !neon_available() {
        return None;
    }

    // SAFETY: NEON support was verified above.
    let hash = unsafe {
        if widening.is_signed() {
            hash_neon::<true>(bytes)
        } else {
            hash_neon::<false>(bytes)
        }
    };
    Some(hash)
}

/// Splits a 16-byte block into its four widened sub-blocks.
#[target_feature(enable = "neon")]
unsafe fn widen_block<const SIGNED: bool>(block: uint8x16_t) -> [uint32x4_t; SUB_BLOCKS] {
    if SIGNED {
        let signed = vreinterpretq_s8_u8(block);
        let low = vmovl_s8(vget_low_s8(signed));
        let high = vmovl_s8(vget_high_s8(signed));
        [
            vreinterpretq_u32_s32(vmovl_s16(vget_low_s16(low))),
            vreinterpretq_u32_s32(vmovl_s16(vget_high_s16(low))),
            vreinterpretq_u32_s32(vmovl_s16(vget_low_s16(high))),
            vreinterpretq_u32_s32(vmovl_s16(vget_high_s16(high))),
        ]
    } else {
        let low = vmovl_u8(vget_low_u8(block));
        let high = vmovl_u8(vget_high_u8(block));
        [
            vmovl_u16(vget_low_u16(low)),
            vmovl_u16(vget_high_u16(low)),
            vmovl_u16(vget_low_u16(high)),
            vmovl_u16(vget_high_u16(high)),
        ]
    }
}

#[target_feature(enable = "neon")]
unsafe fn hash_neon<const SIGNED: bool>(bytes: &[u8]) -> u32 {
    let table = &TABLE_4_LANES;
    let carry = table.carry();
    let coeff: [uint32x4_t; SUB_BLOCKS] = [
        vld1q_u32(table.coefficients(0).as_ptr()),
        vld1q_u32(table.coefficients(1).as_ptr()),
        vld1q_u32(table.coefficients(2).as_ptr()),
        vld1q_u32(table.coefficients(3).as_ptr()),
    ];

    let zero = vld1q_u32(ZERO_LANES.as_ptr());
    let mut acc: [uint32x4_t; SUB_BLOCKS] = [vld1q_u32(SEED_LANES.as_ptr()), zero, zero, zero];

    let mut offset = 0usize;
    while bytes.len() - offset >= BLOCK_LEN {
        let block = vld1q_u8(bytes.as_ptr().add(offset));
        let lanes = widen_block::<SIGNED>(block);
        for ((h, x), c) in acc.iter_mut().zip(lanes).zip(coeff) {
            *h = vmlaq_u32(vmulq_n_u32(*h, carry), x, c);
        }
        offset += BLOCK_LEN;
    }

    let mut partial = 0u32;
    for h in acc {
        partial = partial.wrapping_add(vaddvq_u32(h));
    }

    complete_tail::<SIGNED, [u8]>(partial, bytes, offset)
}

#[cfg(test)]
pub(super) fn cpu_features_cached_for_tests() -> bool {
    NEON_AVAILABLE.get().is_some()
}
