//! src/sampler/names.rs
//! Random object names with normally distributed lengths.

use rand_chacha::rand_core::RngCore;

use super::normal::NormalSampler;
use crate::constants::DEFAULT_ALPHABET;
use crate::error::{RealisticError, Result};

/// Yields names whose length is drawn from N(mean, stddev) (resampled
/// until non-negative) and whose characters are picked uniformly from the
/// alphabet. Infinite unless bounded with [`NameSequence::with_max_count`].
#[derive(Debug, Clone)]
pub struct NameSequence {
    sampler: NormalSampler,
    alphabet: Vec<char>,
    max_count: Option<usize>,
    produced: usize,
}

impl NameSequence {
    pub fn new(mean_len: f64, stddev_len: f64, seed: u64) -> Result<Self> {
        Ok(Self {
            sampler: NormalSampler::new(mean_len, stddev_len, seed)?,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            max_count: None,
            produced: 0,
        })
    }

    pub fn with_alphabet(mut self, alphabet: &str) -> Result<Self> {
        let chars: Vec<char> = alphabet.chars().collect();
        if chars.is_empty() {
            return Err(RealisticError::invalid("name alphabet must not be empty"));
        }
        self.alphabet = chars;
        Ok(self)
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Iterator for NameSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.max_count.is_some_and(|max| self.produced >= max) {
            return None;
        }
        self.produced += 1;

        let len = self.sampler.next_non_negative() as usize;
        let n = self.alphabet.len() as u64;
        let rng = self.sampler.rng_mut();
        let name = (0..len)
            .map(|_| self.alphabet[(rng.next_u64() % n) as usize])
            .collect();
        Some(name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.max_count {
            Some(max) => {
                let left = max.saturating_sub(self.produced);
                (left, Some(left))
            }
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_and_deterministic() {
        let a: Vec<String> = NameSequence::new(12.0, 3.0, 1).unwrap().with_max_count(20).collect();
        let b: Vec<String> = NameSequence::new(12.0, 3.0, 1).unwrap().with_max_count(20).collect();
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn uses_only_alphabet() {
        let names = NameSequence::new(30.0, 5.0, 2).unwrap().with_alphabet("xyz").unwrap();
        for name in names.take(200) {
            assert!(name.chars().all(|c| "xyz".contains(c)), "{name}");
        }
    }

    #[test]
    fn default_alphabet_is_lowercase() {
        let name: String = NameSequence::new(64.0, 0.0, 4).unwrap().next().unwrap();
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn empty_alphabet_rejected() {
        assert!(NameSequence::new(5.0, 1.0, 0).unwrap().with_alphabet("").is_err());
    }
}
