//! src/sampler/sizes.rs
//! Endless, reproducible stream of generated files with normally
//! distributed sizes.

use rand_chacha::rand_core::RngCore;

use super::normal::NormalSampler;
use crate::error::Result;
use crate::generated_file::GeneratedFile;

/// Yields a new [`GeneratedFile`] per call to `next()`, forever.
///
/// Sizes and per-file seeds both come from one generator seeded with
/// `seed`, so the whole sequence is reproducible but each file gets an
/// unrelated-looking seed. The sequence cannot be restarted mid-way; build
/// a new one with the same seed instead.
#[derive(Debug, Clone)]
pub struct SizeSequence {
    sampler: NormalSampler,
}

impl SizeSequence {
    pub fn new(mean: f64, stddev: f64, seed: u64) -> Result<Self> {
        Ok(Self { sampler: NormalSampler::new(mean, stddev, seed)? })
    }

    /// Next (size, seed) pair without constructing the file.
    pub fn next_size_and_seed(&mut self) -> (u64, u64) {
        let size = self.sampler.next_non_negative();
        let seed = self.sampler.rng_mut().next_u64();
        (size, seed)
    }
}

impl Iterator for SizeSequence {
    type Item = GeneratedFile;

    fn next(&mut self) -> Option<GeneratedFile> {
        let (size, seed) = self.next_size_and_seed();
        Some(GeneratedFile::new(size, seed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
