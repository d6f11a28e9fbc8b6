// src/lib.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Crate root and public re-exports.

//! Reproducible synthetic payloads for object-store load testing.
//!
//! A [`GeneratedFile`] is fully determined by `(size, seed)` and carries the
//! MD5 of its body in its last 16 bytes, so a downloaded copy can be checked
//! with a [`VerifierSink`] without keeping the original around. The
//! [`sampler`] module turns a single top-level seed into an endless,
//! reproducible supply of sizes, seeds and object names.
//!
//! ```
//! use s3realistic::{GeneratedFile, VerifierSink};
//!
//! let mut file = GeneratedFile::new(1 << 20, 42);
//! let mut sink = VerifierSink::default();
//! loop {
//!     let chunk = file.read(Some(64 * 1024));
//!     if chunk.is_empty() {
//!         break;
//!     }
//!     sink.write(&chunk);
//! }
//! assert!(sink.valid());
//! ```

pub mod constants;
pub mod error;
pub mod content_file;
pub mod generated_file;
pub mod precomputed;
pub mod verifier;
pub mod stream;
pub mod sampler;

// Driver side: configuration, progress and the local-directory workload
pub mod config;
pub mod progress;
pub mod workload;

pub use constants::DIGEST_SIZE;
pub use content_file::ContentFile;
pub use error::{RealisticError, Result};
pub use generated_file::GeneratedFile;
pub use precomputed::PrecomputedFile;
pub use verifier::VerifierSink;

pub use sampler::{
    MixedSizeSequence,
    NameSequence,
    PooledFiles,
    SizeClass,
    SizeSequence,
    VariedSizeSequence,
};

pub use config::{MixMode, NameConfig, WorkloadConfig};
