// src/constants.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Centralized constants for s3realistic to avoid hardcoded values throughout the codebase

/// Size in bytes of the trailing content digest (MD5, 128 bits)
pub const DIGEST_SIZE: usize = 16;

/// Bytes pulled from the ChaCha20 keystream per refill (one ChaCha block).
///
/// Refilling in whole blocks keeps the byte stream independent of the
/// read sizes chosen by the consumer.
pub const GENERATOR_BLOCK_SIZE: usize = 64;

/// Default chunk size for streaming uploads and downloads (64 KB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default alphabet for generated object names
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Upper bound, in standard deviations, on how far below zero the mean of a
/// sampler may sit before construction is rejected. At the bound roughly
/// one draw in 31,000 is non-negative, so each element costs up to ~3e4
/// resamples; every further sigma multiplies that by 100 or more.
pub const MAX_SIGMAS: f64 = 4.0;

/// Default number of concurrent tasks for the workload driver
pub const DEFAULT_JOBS: usize = 8;
