//! Rayon integration for hashing many independent sources.
//!
//! Each source is hashed by exactly one worker; results come back in input
//! order. Within a worker the usual lane-parallel kernel runs.

use rayon::prelude::*;

use crate::config::HashConfig;
use crate::source::ByteSource;

/// Hashes every source in parallel with the process-wide backend.
///
/// # Example
///
/// ```
/// use polyhash::{parallel::hash_batch, scalar_hash};
///
/// let inputs: Vec<Vec<u8>> = vec![b"alpha".to_vec(), b"beta".to_vec(), Vec::new()];
/// let hashes = hash_batch(&inputs);
/// assert_eq!(hashes, vec![scalar_hash(b"alpha"), scalar_hash(b"beta"), 1]);
/// ```
pub fn hash_batch<S: ByteSource + Sync>(sources: &[S]) -> Vec<u32> {
    sources.par_iter().map(|source| crate::hash(source)).collect()
}

/// Hashes every source in parallel with an explicit configuration.
pub fn hash_batch_with<S: ByteSource + Sync>(sources: &[S], config: &HashConfig) -> Vec<u32> {
    let backend = config.resolve();
    let widening = config.widening();
    sources
        .par_iter()
        .map(|source| crate::kernel::run(backend, source, widening))
        .collect()
}

/// Extension trait hashing the items of a parallel iterator.
///
/// ```
/// use polyhash::parallel::ParallelHash;
/// use rayon::prelude::*;
///
/// let data = vec![b"one".to_vec(), b"two".to_vec()];
/// let hashes = data.par_iter().poly_hash();
/// assert_eq!(hashes.len(), 2);
/// ```
pub trait ParallelHash {
    /// Hashes every item, preserving order.
    fn poly_hash(self) -> Vec<u32>;
}

impl<I, T> ParallelHash for I
where
    I: IndexedParallelIterator<Item = T>,
    T: ByteSource + Send,
{
    fn poly_hash(self) -> Vec<u32> {
        self.map(|source| crate::hash(&source)).collect()
    }
}
