//! Horizontal reduction and sequential tail completion.

use crate::accumulator::AccumulatorState;
use crate::coefficients::MULTIPLIER;
use crate::source::ByteSource;
use crate::widening::widen_lane;

/// Wrapping sum of a vector's lanes.
#[inline]
pub(crate) fn sum_lanes(lanes: &[u32]) -> u32 {
    lanes.iter().fold(0u32, |acc, &lane| acc.wrapping_add(lane))
}

/// Collapses `h1..h4` into a single partial hash.
#[inline]
pub(crate) fn reduce_lanes<const LANES: usize>(state: &AccumulatorState<LANES>) -> u32 {
    state
        .lanes()
        .iter()
        .fold(0u32, |acc, group| acc.wrapping_add(sum_lanes(group)))
}

/// Continues the recurrence `h = 31 * h + byte` over `source[offset..]`.
#[inline]
pub(crate) fn complete_tail<const SIGNED: bool, S: ByteSource + ?Sized>(
    partial: u32,
    source: &S,
    offset: usize,
) -> u32 {
    (offset..source.len()).fold(partial, |hash, index| {
        hash.wrapping_mul(MULTIPLIER)
            .wrapping_add(widen_lane::<SIGNED>(source.read_byte(index)))
    })
}
