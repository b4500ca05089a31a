//! Lane-parallel kernel on plain integer arrays.
//!
//! Runs the same block loop as the architecture kernels, one `[u32; LANES]`
//! per accumulator, and is the fallback everywhere else.

use crate::accumulator::accumulate;
use crate::coefficients::{CoefficientTable, TABLE_8_LANES};
use crate::reduce::{complete_tail, reduce_lanes};
use crate::source::ByteSource;
use crate::widening::ByteWidening;

/// Hashes `source` with the 8-lane table.
#[inline]
pub(super) fn hash<S: ByteSource + ?Sized>(source: &S, widening: ByteWidening) -> u32 {
    hash_with_table(source, &TABLE_8_LANES, widening)
}

/// Hashes `source` with an arbitrary lane width.
pub(super) fn hash_with_table<const LANES: usize, S: ByteSource + ?Sized>(
    source: &S,
    table: &CoefficientTable<LANES>,
    widening: ByteWidening,
) -> u32 {
    if widening.is_signed() {
        hash_lanes::<LANES, true, S>(source, table)
    } else {
        hash_lanes::<LANES, false, S>(source, table)
    }
}

#[inline]
fn hash_lanes<const LANES: usize, const SIGNED: bool, S: ByteSource + ?Sized>(
    source: &S,
    table: &CoefficientTable<LANES>,
) -> u32 {
    let (state, offset) = accumulate::<LANES, SIGNED, S>(source, table);
    complete_tail::<SIGNED, S>(reduce_lanes(&state), source, offset)
}
