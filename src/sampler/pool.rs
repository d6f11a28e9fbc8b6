//! src/sampler/pool.rs
//! A fixed pool of precomputed files, picked at random forever.

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use tracing::debug;

use super::sizes::SizeSequence;
use crate::error::{RealisticError, Result};
use crate::precomputed::PrecomputedFile;

/// Renders `pool_size` files up front and then yields random members of the
/// pool. Useful when generation cost matters more than content variety;
/// memory is the sum of the pooled file sizes.
#[derive(Debug, Clone)]
pub struct PooledFiles {
    pool: Vec<PrecomputedFile>,
    rng: ChaCha20Rng,
}

impl PooledFiles {
    pub fn new(mean: f64, stddev: f64, seed: u64, pool_size: usize) -> Result<Self> {
        if pool_size == 0 {
            return Err(RealisticError::invalid("pool_size must be > 0"));
        }
        let mut master = ChaCha20Rng::seed_from_u64(seed);
        let sizes = SizeSequence::new(mean, stddev, master.next_u64())?;
        let pool: Vec<PrecomputedFile> = sizes.take(pool_size).map(PrecomputedFile::from_generated).collect();
        debug!(
            "PooledFiles: {} files, {} bytes",
            pool.len(),
            pool.iter().map(|p| p.contents().len()).sum::<usize>()
        );
        Ok(Self { pool, rng: master })
    }

    pub fn pool(&self) -> &[PrecomputedFile] {
        &self.pool
    }
}

impl Iterator for PooledFiles {
    type Item = PrecomputedFile;

    fn next(&mut self) -> Option<PrecomputedFile> {
        let i = (self.rng.next_u64() % self.pool.len() as u64) as usize;
        Some(self.pool[i].clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
