// src/generated_file.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Deterministic pseudorandom payload with an embedded trailing digest.

//! Seeded synthetic file content.
//!
//! A [`GeneratedFile`] is a logical file of `size` bytes laid out as
//!
//! ```text
//! [ pseudorandom bytes (size - 16) ][ MD5 of those bytes (16) ]
//! ```
//!
//! The pseudorandom region is the ChaCha20 keystream for `seed`, produced on
//! demand, so nothing but the generator state and the running digest is kept
//! in memory. Files shorter than the digest carry only the first `size`
//! bytes of the digest of the empty random region.

use std::io::{self, Read, Seek, SeekFrom};

use bytes::Bytes;
use md5::{Digest, Md5};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use tracing::{debug, trace};

use crate::constants::{DIGEST_SIZE, GENERATOR_BLOCK_SIZE};
use crate::content_file::ContentFile;
use crate::error::{RealisticError, Result};

/// Byte-at-a-time view over the ChaCha20 keystream for one seed.
///
/// Bytes come out in keystream order no matter how callers slice their
/// reads, which is what makes the stream reproducible across chunk sizes.
#[derive(Clone)]
struct ByteSource {
    seed: u64,
    rng: ChaCha20Rng,
    block: [u8; GENERATOR_BLOCK_SIZE],
    pos: usize,
}

impl ByteSource {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            block: [0u8; GENERATOR_BLOCK_SIZE],
            pos: GENERATOR_BLOCK_SIZE,
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn fill(&mut self, out: &mut [u8]) {
        let mut written = 0;
        while written < out.len() {
            if self.pos == GENERATOR_BLOCK_SIZE {
                self.rng.fill_bytes(&mut self.block);
                self.pos = 0;
            }
            let n = (GENERATOR_BLOCK_SIZE - self.pos).min(out.len() - written);
            out[written..written + n].copy_from_slice(&self.block[self.pos..self.pos + n]);
            self.pos += n;
            written += n;
        }
    }
}

/// Reproducible synthetic file of `size` bytes derived from `seed`.
#[derive(Clone)]
pub struct GeneratedFile {
    seed: u64,
    size: u64,
    offset: u64,
    source: ByteSource,
    /// Running digest of the random region; `None` once finalized.
    hasher: Option<Md5>,
    /// Set exactly once, on the first read that reaches the digest region.
    digest: Option<[u8; DIGEST_SIZE]>,
}

impl std::fmt::Debug for GeneratedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedFile")
            .field("seed", &self.seed)
            .field("size", &self.size)
            .field("offset", &self.offset)
            .field("finalized", &self.digest.is_some())
            .finish()
    }
}

impl GeneratedFile {
    /// Create a file of `size` bytes whose content is fixed by `seed`.
    pub fn new(size: u64, seed: u64) -> Self {
        debug!("GeneratedFile: size={}, seed={}", size, seed);
        Self {
            seed,
            size,
            offset: 0,
            source: ByteSource::new(seed),
            hasher: Some(Md5::new()),
            digest: None,
        }
    }

    /// Signed entry point for callers that carry sizes as signed integers.
    pub fn try_new(size: i64, seed: u64) -> Result<Self> {
        let size = u64::try_from(size)
            .map_err(|_| RealisticError::invalid(format!("file size must be >= 0, got {size}")))?;
        Ok(Self::new(size, seed))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn tell(&self) -> u64 {
        self.offset
    }

    /// Whether the trailing digest has been computed.
    pub fn is_finalized(&self) -> bool {
        self.digest.is_some()
    }

    /// Offset where the digest region starts.
    fn random_end(&self) -> u64 {
        self.size.saturating_sub(DIGEST_SIZE as u64)
    }

    /// Rewind to the start. Only `offset == 0` is supported.
    ///
    /// The generator restarts from `seed`. A digest that was already
    /// finalized is kept as is; a partially fed one is discarded so the
    /// next pass hashes the random region exactly once.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset != 0 {
            return Err(RealisticError::unsupported(format!(
                "GeneratedFile only supports seek(0), got seek({offset})"
            )));
        }
        self.restart();
        Ok(())
    }

    /// Infallible form of `seek(0)`.
    pub fn restart(&mut self) {
        trace!("GeneratedFile rewind: seed={}, was at {}", self.seed, self.offset);
        self.source.reset();
        self.offset = 0;
        if self.digest.is_none() {
            self.hasher = Some(Md5::new());
        }
    }

    fn finalize_digest(&mut self) -> [u8; DIGEST_SIZE] {
        if let Some(digest) = self.digest {
            return digest;
        }
        let mut digest = [0u8; DIGEST_SIZE];
        if let Some(hasher) = self.hasher.take() {
            digest.copy_from_slice(&hasher.finalize());
        }
        debug!("GeneratedFile digest finalized: seed={}, size={}", self.seed, self.size);
        self.digest = Some(digest);
        digest
    }

    /// Fill `buf` from the current offset. Returns the number of bytes
    /// written, which is 0 only at end of file (or for an empty `buf`).
    pub fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let random_end = self.random_end();

        let random_count = random_end.saturating_sub(self.offset).min(buf.len() as u64) as usize;
        let (head, rest) = buf.split_at_mut(random_count);
        if random_count > 0 {
            self.source.fill(head);
            if let Some(hasher) = self.hasher.as_mut() {
                hasher.update(&*head);
            }
            self.offset += random_count as u64;
        }

        let digest_count = (self.size - self.offset).min(rest.len() as u64) as usize;
        if digest_count > 0 {
            let digest = self.finalize_digest();
            let start = (self.offset - random_end) as usize;
            rest[..digest_count].copy_from_slice(&digest[start..start + digest_count]);
            self.offset += digest_count as u64;
        }

        trace!(
            "GeneratedFile read: random={}, digest={}, offset={}/{}",
            random_count,
            digest_count,
            self.offset,
            self.size
        );
        random_count + digest_count
    }

    /// Read up to `n` bytes, or everything left when `n` is `None`.
    pub fn read(&mut self, n: Option<usize>) -> Bytes {
        let remaining = self.size - self.offset;
        let want = n.map_or(remaining, |n| (n as u64).min(remaining));
        let mut out = vec![0u8; want as usize];
        let got = self.read_into(&mut out);
        out.truncate(got);
        Bytes::from(out)
    }
}

impl ContentFile for GeneratedFile {
    fn read(&mut self, n: Option<usize>) -> Bytes {
        GeneratedFile::read(self, n)
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        GeneratedFile::seek(self, offset)
    }

    fn tell(&self) -> u64 {
        self.offset
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Read for GeneratedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf))
    }
}

impl Seek for GeneratedFile {
    /// Supports rewinding (`Start(0)`) and querying the position
    /// (`Current(0)`); everything else is `ErrorKind::Unsupported`.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Current(0) => Ok(self.offset),
            SeekFrom::Start(n) => {
                GeneratedFile::seek(self, n)?;
                Ok(0)
            }
            other => Err(RealisticError::unsupported(format!(
                "GeneratedFile only supports rewinding, got {other:?}"
            ))
            .into()),
        }
    }
}
