//! Lane-parallel block accumulation.
//!
//! Each of the four accumulators owns one interleaved sub-block. Folding a block
//! multiplies every lane by the table's carry (moving it past the `block_size`
//! bytes that were just consumed) and adds the freshly widened bytes weighted by
//! their distance from the block end.

use crate::coefficients::{CoefficientTable, SUB_BLOCKS};
use crate::source::ByteSource;
use crate::widening::widen_lane;

/// Running accumulators `h1..h4` for one hash invocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AccumulatorState<const LANES: usize> {
    lanes: [[u32; LANES]; SUB_BLOCKS],
}

impl<const LANES: usize> AccumulatorState<LANES> {
    /// Fresh state: `h1 = [1, 0, ..]`, everything else zero, so that an input
    /// that never enters the block loop reduces to the seed value 1.
    pub(crate) const fn new() -> Self {
        let mut lanes = [[0u32; LANES]; SUB_BLOCKS];
        lanes[0][0] = 1;
        Self { lanes }
    }

    pub(crate) const fn lanes(&self) -> &[[u32; LANES]; SUB_BLOCKS] {
        &self.lanes
    }

    /// Folds the block starting at `offset` into the accumulators.
    ///
    /// Requires `offset + table.block_size() <= source.len()`.
    #[inline]
    pub(crate) fn fold_block<const SIGNED: bool, S: ByteSource + ?Sized>(
        &mut self,
        source: &S,
        offset: usize,
        table: &CoefficientTable<LANES>,
    ) {
        let carry = table.carry();
        let mut loaded = [0u32; LANES];

        for (group, acc) in self.lanes.iter_mut().enumerate() {
            source.read_block(offset + group * LANES, &mut loaded);
            let weights = table.coefficients(group);
            for ((lane, &byte), &weight) in acc.iter_mut().zip(&loaded).zip(weights) {
                *lane = lane
                    .wrapping_mul(carry)
                    .wrapping_add(widen_lane::<SIGNED>(byte).wrapping_mul(weight));
            }
        }
    }
}

impl<const LANES: usize> Default for AccumulatorState<LANES> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the block loop over every whole block of `source`.
///
/// Returns the accumulators and the offset of the first byte left for the tail.
pub(crate) fn accumulate<const LANES: usize, const SIGNED: bool, S: ByteSource + ?Sized>(
    source: &S,
    table: &CoefficientTable<LANES>,
) -> (AccumulatorState<LANES>, usize) {
    let block = table.block_size();
    let len = source.len();
    let mut state = AccumulatorState::new();
    let mut offset = 0usize;

    while len - offset >= block {
        state.fold_block::<SIGNED, S>(source, offset, table);
        offset += block;
    }

    (state, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::{TABLE_4_LANES, TABLE_8_LANES};

    #[test]
    fn fresh_state_seeds_first_lane_only() {
        let state = AccumulatorState::<8>::new();
        assert_eq!(state.lanes()[0], [1, 0, 0, 0, 0, 0, 0, 0]);
        for group in 1..SUB_BLOCKS {
            assert_eq!(state.lanes()[group], [0; 8]);
        }
    }

    #[test]
    fn short_inputs_never_enter_the_block_loop() {
        let data = [0xABu8; 31];
        let (state, offset) = accumulate::<8, false, _>(&data[..], &TABLE_8_LANES);
        assert_eq!(offset, 0);
        assert_eq!(state, AccumulatorState::new());
    }

    #[test]
    fn block_loop_stops_at_the_last_whole_block() {
        let data = vec![1u8; 16 * 3 + 5];
        let (_, offset) = accumulate::<4, false, _>(&data, &TABLE_4_LANES);
        assert_eq!(offset, 48);

        let data = vec![1u8; 64];
        let (_, offset) = accumulate::<8, false, _>(&data, &TABLE_8_LANES);
        assert_eq!(offset, 64);
    }

    #[test]
    fn single_block_weights_bytes_by_distance_from_the_end() {
        let mut data = [0u8; 32];
        data[31] = 5;
        data[0] = 1;
        let (state, _) = accumulate::<8, false, _>(&data[..], &TABLE_8_LANES);

        // h1 lane 0 carried the seed and picked up byte 0.
        assert_eq!(
            state.lanes()[0][0],
            TABLE_8_LANES
                .carry()
                .wrapping_add(TABLE_8_LANES.coefficients(0)[0])
        );
        assert_eq!(state.lanes()[3][7], 5);
    }

    #[test]
    fn signed_mode_sign_extends_loaded_lanes() {
        let mut data = [0u8; 16];
        data[15] = 0xFF;
        let (unsigned, _) = accumulate::<4, false, _>(&data[..], &TABLE_4_LANES);
        let (signed, _) = accumulate::<4, true, _>(&data[..], &TABLE_4_LANES);
        assert_eq!(unsigned.lanes()[3][3], 255);
        assert_eq!(signed.lanes()[3][3], u32::MAX);
    }
}
