//! src/sampler/varied.rs
//! Workloads that mix several size tiers.
//!
//! Two ways of combining [`SizeClass`]es are provided:
//!  * `VariedSizeSequence` – every class in order, `count` files each.
//!  * `MixedSizeSequence`  – classes interleaved at random, weighted by how
//!    many files each class still has to give (or by `count` forever when
//!    unlimited).

use std::str::FromStr;

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use tracing::debug;

use super::sizes::SizeSequence;
use crate::error::{RealisticError, Result};
use crate::generated_file::GeneratedFile;

/// One size tier: `count` files with sizes drawn from N(mean, stddev).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeClass {
    pub mean: f64,
    pub stddev: f64,
    pub count: u64,
}

impl SizeClass {
    pub fn new(mean: f64, stddev: f64, count: u64) -> Self {
        Self { mean, stddev, count }
    }
}

/// Parses `"mean:stddev:count"`, e.g. `"4096:512:100"`.
impl FromStr for SizeClass {
    type Err = RealisticError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [mean, stddev, count] = parts[..] else {
            return Err(RealisticError::invalid(format!(
                "size class must look like mean:stddev:count, got {s:?}"
            )));
        };
        let bad = |what: &str| RealisticError::invalid(format!("bad {what} in size class {s:?}"));
        Ok(Self {
            mean: mean.parse().map_err(|_| bad("mean"))?,
            stddev: stddev.parse().map_err(|_| bad("stddev"))?,
            count: count.parse().map_err(|_| bad("count"))?,
        })
    }
}

/// Sum of the class counts, rejected when it does not fit in a `u64`.
pub(crate) fn total_count(classes: &[SizeClass]) -> Result<u64> {
    classes
        .iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.count))
        .ok_or_else(|| RealisticError::invalid("size class counts add up to more than u64::MAX files"))
}

/// Builds one independently seeded size sequence per class, seeds taken in
/// class order from a generator seeded with `seed`.
fn class_sequences(classes: &[SizeClass], seed: u64) -> Result<Vec<(SizeSequence, u64)>> {
    let mut master = ChaCha20Rng::seed_from_u64(seed);
    classes
        .iter()
        .map(|c| Ok((SizeSequence::new(c.mean, c.stddev, master.next_u64())?, c.count)))
        .collect()
}

/// Concatenation of `count` draws from each class, in class order.
#[derive(Debug, Clone)]
pub struct VariedSizeSequence {
    classes: Vec<(SizeSequence, u64)>,
    current: usize,
}

impl VariedSizeSequence {
    pub fn new(classes: &[SizeClass], seed: u64) -> Result<Self> {
        debug!("VariedSizeSequence: {} classes, seed={}", classes.len(), seed);
        total_count(classes)?;
        Ok(Self { classes: class_sequences(classes, seed)?, current: 0 })
    }

    /// Files still to be produced.
    pub fn remaining(&self) -> u64 {
        self.classes[self.current.min(self.classes.len())..]
            .iter()
            .fold(0u64, |acc, (_, n)| acc.saturating_add(*n))
    }
}

impl Iterator for VariedSizeSequence {
    type Item = GeneratedFile;

    fn next(&mut self) -> Option<GeneratedFile> {
        while let Some((seq, left)) = self.classes.get_mut(self.current) {
            if *left > 0 {
                *left -= 1;
                return seq.next();
            }
            self.current += 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for VariedSizeSequence {}

/// Weighted random interleaving of size classes.
#[derive(Debug, Clone)]
pub struct MixedSizeSequence {
    classes: Vec<(SizeSequence, u64)>,
    rng: ChaCha20Rng,
    unlimited: bool,
}

impl MixedSizeSequence {
    /// With `unlimited == false` the sequence ends once every class has
    /// produced `count` files. With `unlimited == true` it never ends and
    /// the class weights stay fixed at `count`.
    pub fn new(classes: &[SizeClass], seed: u64, unlimited: bool) -> Result<Self> {
        if total_count(classes)? == 0 {
            return Err(RealisticError::invalid("mixed workload needs at least one file"));
        }
        let mut master = ChaCha20Rng::seed_from_u64(seed);
        let picker_seed = master.next_u64();
        Ok(Self {
            classes: class_sequences(classes, master.next_u64())?,
            rng: ChaCha20Rng::seed_from_u64(picker_seed),
            unlimited,
        })
    }

    fn total(&self) -> u64 {
        self.classes.iter().fold(0u64, |acc, (_, n)| acc.saturating_add(*n))
    }
}

impl Iterator for MixedSizeSequence {
    type Item = GeneratedFile;

    fn next(&mut self) -> Option<GeneratedFile> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let mut pick = self.rng.next_u64() % total;
        for (seq, left) in self.classes.iter_mut() {
            if pick < *left {
                if !self.unlimited {
                    *left -= 1;
                }
                return seq.next();
            }
            pick -= *left;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.unlimited {
            return (usize::MAX, None);
        }
        let n = usize::try_from(self.total()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}
