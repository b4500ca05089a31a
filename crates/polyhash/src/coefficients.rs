//! Powers of 31 arranged for lane-parallel accumulation.
//!
//! A block of `4 * LANES` bytes is split into four interleaved sub-blocks of
//! `LANES` bytes each. Byte `k` of sub-block `g` sits `block_size - 1 - (g * LANES + k)`
//! positions before the end of its block, so the sequential recurrence weights it by
//! that power of 31. Accumulators from earlier blocks are moved forward by
//! `31^block_size` each time a new block is folded in.
//!
//! The tables are evaluated at compile time and live in read-only statics, so every
//! thread observes the same fully built values without synchronisation.

/// Multiplier of the polynomial recurrence `h = 31 * h + byte`.
pub const MULTIPLIER: u32 = 31;

/// Number of interleaved sub-blocks (and running accumulators) per block.
pub const SUB_BLOCKS: usize = 4;

/// Coefficients for 8-lane kernels (portable and AVX2), 32-byte blocks.
pub static TABLE_8_LANES: CoefficientTable<8> = CoefficientTable::new();

/// Coefficients for 4-lane kernels (NEON), 16-byte blocks.
pub static TABLE_4_LANES: CoefficientTable<4> = CoefficientTable::new();

/// Per-lane weights and the carry multiplier for one vector width.
///
/// # Examples
///
/// ```
/// use polyhash::{CoefficientTable, power_of_31};
///
/// let table = CoefficientTable::<8>::new();
/// assert_eq!(table.block_size(), 32);
/// assert_eq!(table.coefficients(3)[7], 1);
/// assert_eq!(table.coefficients(0)[0], power_of_31(31));
/// assert_eq!(table.carry(), power_of_31(32));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoefficientTable<const LANES: usize> {
    coeff: [[u32; LANES]; SUB_BLOCKS],
    carry: u32,
}

impl<const LANES: usize> CoefficientTable<LANES> {
    /// Builds the table for `LANES` 32-bit lanes.
    ///
    /// Walks the block from its last byte backwards, multiplying by 31 at every
    /// step, so the final byte gets weight 1 and the running power left over after
    /// the first byte is `31^block_size`.
    #[must_use]
    pub const fn new() -> Self {
        assert!(LANES > 0, "coefficient table needs at least one lane");

        let mut coeff = [[0u32; LANES]; SUB_BLOCKS];
        let mut power = 1u32;
        let mut position = SUB_BLOCKS * LANES;
        while position > 0 {
            position -= 1;
            coeff[position / LANES][position % LANES] = power;
            power = power.wrapping_mul(MULTIPLIER);
        }

        Self {
            coeff,
            carry: power,
        }
    }

    /// Number of 32-bit lanes per accumulator.
    #[inline]
    #[must_use]
    pub const fn lane_count(&self) -> usize {
        LANES
    }

    /// Bytes consumed per outer iteration.
    #[inline]
    #[must_use]
    pub const fn block_size(&self) -> usize {
        SUB_BLOCKS * LANES
    }

    /// Weights applied to the bytes of sub-block `group` (0..4).
    ///
    /// Lane 0 holds the largest power: it corresponds to the lowest address of
    /// the sub-block.
    #[inline]
    #[must_use]
    pub const fn coefficients(&self, group: usize) -> &[u32; LANES] {
        &self.coeff[group]
    }

    /// `31^block_size mod 2^32`, applied to every accumulator once per block.
    #[inline]
    #[must_use]
    pub const fn carry(&self) -> u32 {
        self.carry
    }
}

impl<const LANES: usize> Default for CoefficientTable<LANES> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `31^exponent` with 32-bit wrapping arithmetic.
#[must_use]
pub const fn power_of_31(exponent: usize) -> u32 {
    let mut result = 1u32;
    let mut remaining = exponent;
    while remaining > 0 {
        result = result.wrapping_mul(MULTIPLIER);
        remaining -= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_layout<const LANES: usize>(table: &CoefficientTable<LANES>) {
        let block = table.block_size();
        for group in 0..SUB_BLOCKS {
            for (lane, &weight) in table.coefficients(group).iter().enumerate() {
                let distance = block - 1 - (group * LANES + lane);
                assert_eq!(
                    weight,
                    power_of_31(distance),
                    "lanes={LANES} group={group} lane={lane}"
                );
            }
        }
        assert_eq!(table.carry(), power_of_31(block));
        assert_eq!(
            table.carry(),
            table.coefficients(0)[0].wrapping_mul(MULTIPLIER)
        );
    }

    #[test]
    fn eight_lane_table_matches_descending_powers() {
        assert_layout(&TABLE_8_LANES);
        assert_eq!(TABLE_8_LANES.lane_count(), 8);
        assert_eq!(TABLE_8_LANES.block_size(), 32);
    }

    #[test]
    fn four_lane_table_is_rederived_for_its_width() {
        assert_layout(&TABLE_4_LANES);
        assert_eq!(TABLE_4_LANES.block_size(), 16);
        assert_eq!(TABLE_4_LANES.carry(), power_of_31(16));
        assert_ne!(TABLE_4_LANES.carry(), TABLE_8_LANES.carry());
    }

    #[test]
    fn other_widths_follow_the_same_layout() {
        assert_layout(&CoefficientTable::<1>::new());
        assert_layout(&CoefficientTable::<2>::new());
        assert_layout(&CoefficientTable::<16>::new());
    }

    #[test]
    fn last_sub_block_ends_with_unit_weight() {
        assert_eq!(TABLE_8_LANES.coefficients(3)[7], 1);
        assert_eq!(TABLE_8_LANES.coefficients(3)[6], 31);
        assert_eq!(TABLE_4_LANES.coefficients(3)[3], 1);
    }

    #[test]
    fn carry_values_are_known_constants() {
        assert_eq!(TABLE_8_LANES.carry(), 2_111_290_369);
        assert_eq!(TABLE_4_LANES.carry(), 1_353_309_697);
        assert_eq!(power_of_31(4), 923_521);
    }

    #[test]
    fn statics_match_freshly_built_tables() {
        assert_eq!(TABLE_8_LANES, CoefficientTable::<8>::default());
        assert_eq!(TABLE_4_LANES, CoefficientTable::<4>::new());
    }
}
