//! Batch hashing with rayon.

#![cfg(feature = "parallel")]

use polyhash::parallel::{ParallelHash, hash_batch, hash_batch_with};
use polyhash::{Backend, ByteWidening, HashConfig, scalar_hash, scalar_hash_with};
use rayon::prelude::*;

fn batch() -> Vec<Vec<u8>> {
    (0..200usize)
        .map(|n| (0..n * 7).map(|i| (i * 31 + n) as u8).collect())
        .collect()
}

#[test]
fn batch_results_follow_input_order() {
    let inputs = batch();
    let expected: Vec<u32> = inputs.iter().map(|data| scalar_hash(data)).collect();
    assert_eq!(hash_batch(&inputs), expected);
}

#[test]
fn empty_batch_is_empty() {
    let inputs: Vec<Vec<u8>> = Vec::new();
    assert!(hash_batch(&inputs).is_empty());
}

#[test]
fn batch_honours_configuration() {
    let inputs = batch();
    let config = HashConfig::new()
        .with_backend(Backend::Portable)
        .with_widening(ByteWidening::Signed);
    let expected: Vec<u32> = inputs
        .iter()
        .map(|data| scalar_hash_with(data, ByteWidening::Signed))
        .collect();
    assert_eq!(hash_batch_with(&inputs, &config), expected);
}

#[test]
fn parallel_iterator_extension_matches_batch() {
    let inputs = batch();
    assert_eq!(inputs.par_iter().poly_hash(), hash_batch(&inputs));
}
