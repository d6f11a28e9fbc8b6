//! src/sampler/normal.rs
//! Seeded, non-negative normal draws shared by every sequence type.

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::constants::MAX_SIGMAS;
use crate::error::{RealisticError, Result};

/// Draws from N(mean, stddev), discarding negative values.
#[derive(Debug, Clone)]
pub struct NormalSampler {
    rng: ChaCha20Rng,
    mean: f64,
    stddev: f64,
}

impl NormalSampler {
    pub fn new(mean: f64, stddev: f64, seed: u64) -> Result<Self> {
        validate(mean, stddev)?;
        Ok(Self { rng: ChaCha20Rng::seed_from_u64(seed), mean, stddev })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Next draw rounded to an integer, redrawing until it is non-negative.
    pub fn next_non_negative(&mut self) -> u64 {
        loop {
            let v = self.mean + self.stddev * standard_normal(&mut self.rng);
            if v >= 0.0 {
                return v.round() as u64;
            }
        }
    }

    /// The underlying generator, for callers that derive further values
    /// (sub-seeds, characters) from the same stream.
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }
}

fn validate(mean: f64, stddev: f64) -> Result<()> {
    if !mean.is_finite() {
        return Err(RealisticError::invalid(format!("mean must be finite, got {mean}")));
    }
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(RealisticError::invalid(format!(
            "stddev must be finite and >= 0, got {stddev}"
        )));
    }
    if mean + MAX_SIGMAS * stddev < 0.0 {
        return Err(RealisticError::invalid(format!(
            "mean {mean} with stddev {stddev} leaves no plausible non-negative draw"
        )));
    }
    Ok(())
}

/// Uniform in `[0, 1)` with 53 bits of precision.
fn unit_f64(rng: &mut ChaCha20Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Sample from N(0, 1) using the Box-Muller transform.
fn standard_normal(rng: &mut ChaCha20Rng) -> f64 {
    // u1 in (0, 1] keeps ln() finite
    let u1 = 1.0 - unit_f64(rng);
    let u2 = unit_f64(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = NormalSampler::new(100.0, 30.0, 5).unwrap();
        let mut b = NormalSampler::new(100.0, 30.0, 5).unwrap();
        for _ in 0..100 {
            assert_eq!(a.next_non_negative(), b.next_non_negative());
        }
    }

    #[test]
    fn zero_stddev_is_constant() {
        let mut s = NormalSampler::new(42.4, 0.0, 1).unwrap();
        assert!((0..10).all(|_| s.next_non_negative() == 42));
    }

    #[test]
    fn moments_are_roughly_right() {
        let mut s = NormalSampler::new(10_000.0, 100.0, 77).unwrap();
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| s.next_non_negative() as f64).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 10_000.0).abs() < 5.0, "mean={mean}");
        assert!((var.sqrt() - 100.0).abs() < 5.0, "stddev={}", var.sqrt());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(NormalSampler::new(f64::NAN, 1.0, 0).is_err());
        assert!(NormalSampler::new(1.0, -1.0, 0).is_err());
        assert!(NormalSampler::new(1.0, f64::INFINITY, 0).is_err());
        assert!(NormalSampler::new(-1.0, 0.0, 0).is_err());
        assert!(NormalSampler::new(-10.0, 5.0, 0).is_ok());
    }

    #[test]
    fn rejects_means_too_far_below_zero() {
        assert!(matches!(NormalSampler::new(-5.99, 1.0, 0), Err(RealisticError::InvalidArgument(_))));
        assert!(matches!(NormalSampler::new(-4.5e6, 1e6, 0), Err(RealisticError::InvalidArgument(_))));
    }

    #[test]
    fn deep_tail_still_produces_draws() {
        let mut s = NormalSampler::new(-3.5, 1.0, 12).unwrap();
        let draws: Vec<u64> = (0..20).map(|_| s.next_non_negative()).collect();
        assert_eq!(draws.len(), 20);
        assert!(draws.iter().all(|&d| d <= 2));
    }
}
