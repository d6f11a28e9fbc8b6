use clap::ValueEnum;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::constants::{DEFAULT_ALPHABET, DEFAULT_CHUNK_SIZE, DEFAULT_JOBS};
use crate::error::{RealisticError, Result};
use crate::generated_file::GeneratedFile;
use crate::sampler::varied::total_count;
use crate::sampler::{MixedSizeSequence, NameSequence, SizeClass, VariedSizeSequence};

/// How size classes are combined into one workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum MixMode {
    /// Every class in order, `count` files each.
    #[default]
    Ordered,
    /// Classes interleaved at random, weighted by remaining count.
    Weighted,
    /// Weighted interleave with fixed weights; only the total is bounded.
    Unlimited,
}

/// Parameters for generated object names.
#[derive(Debug, Clone)]
pub struct NameConfig {
    pub mean_len:   f64,
    pub stddev_len: f64,
    pub alphabet:   String,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self { mean_len: 12.0, stddev_len: 4.0, alphabet: DEFAULT_ALPHABET.to_string() }
    }
}

/// Runtime parameters used by the workload driver.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub classes:    Vec<SizeClass>,
    pub names:      NameConfig,
    pub seed:       u64,     // top-level seed, fixes the whole workload
    pub chunk_size: usize,   // bytes per read/write call
    pub jobs:       usize,   // concurrent tasks
    pub mix:        MixMode,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            classes:    vec![SizeClass::new(64.0 * 1024.0, 16.0 * 1024.0, 16)],
            names:      NameConfig::default(),
            seed:       0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            jobs:       DEFAULT_JOBS,
            mix:        MixMode::default(),
        }
    }
}

/// Fresh top-level seed for runs that do not need to be repeated.
pub fn random_seed() -> u64 {
    rand::random::<u64>()
}

impl WorkloadConfig {
    /// Files in the workload: the sum of the class counts, saturating at
    /// `u64::MAX`. `validate` rejects counts that would saturate.
    pub fn total_files(&self) -> u64 {
        self.classes.iter().fold(0u64, |acc, c| acc.saturating_add(c.count))
    }

    /// (names seed, files seed), both derived from `seed`.
    fn sub_seeds(&self) -> (u64, u64) {
        let mut master = ChaCha20Rng::seed_from_u64(self.seed);
        (master.next_u64(), master.next_u64())
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(RealisticError::invalid("workload needs at least one size class"));
        }
        if self.chunk_size == 0 {
            return Err(RealisticError::invalid("chunk_size must be > 0"));
        }
        if self.jobs == 0 {
            return Err(RealisticError::invalid("jobs must be > 0"));
        }
        total_count(&self.classes)?;
        Ok(())
    }

    /// The file sequence for this workload, bounded to `total_files()`.
    pub fn files(&self) -> Result<Box<dyn Iterator<Item = GeneratedFile> + Send>> {
        self.validate()?;
        let (_, seed) = self.sub_seeds();
        let total = usize::try_from(self.total_files()).unwrap_or(usize::MAX);
        let files: Box<dyn Iterator<Item = GeneratedFile> + Send> = match self.mix {
            MixMode::Ordered => Box::new(VariedSizeSequence::new(&self.classes, seed)?),
            MixMode::Weighted => Box::new(MixedSizeSequence::new(&self.classes, seed, false)?),
            MixMode::Unlimited => Box::new(MixedSizeSequence::new(&self.classes, seed, true)?.take(total)),
        };
        Ok(files)
    }

    /// Endless name sequence for this workload.
    pub fn names(&self) -> Result<NameSequence> {
        let (seed, _) = self.sub_seeds();
        NameSequence::new(self.names.mean_len, self.names.stddev_len, seed)?.with_alphabet(&self.names.alphabet)
    }
}
