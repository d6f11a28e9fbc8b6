// src/verifier.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Write-side counterpart of GeneratedFile.

//! Streaming verification of downloaded content.
//!
//! A [`VerifierSink`] is handed to a download as its destination. It never
//! buffers the body: only the most recent `digest_size` bytes are kept (they
//! are the candidate trailing digest), and everything that slides out of that
//! window is hashed and dropped.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use md5::{Digest, Md5};
use tokio::io::AsyncWrite;
use tracing::{debug, trace};

use crate::constants::DIGEST_SIZE;

#[derive(Clone)]
pub struct VerifierSink {
    digest_size: usize,
    hasher: Md5,
    size: u64,
    /// Last `min(digest_size, size)` bytes seen.
    tail: VecDeque<u8>,
    /// Length of every write, in order.
    chunks: Vec<usize>,
}

impl std::fmt::Debug for VerifierSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierSink")
            .field("digest_size", &self.digest_size)
            .field("size", &self.size)
            .field("chunks", &self.chunks.len())
            .finish()
    }
}

impl Default for VerifierSink {
    fn default() -> Self {
        Self::new(DIGEST_SIZE)
    }
}

impl VerifierSink {
    /// `digest_size` is clamped to the width of the digest actually used.
    pub fn new(digest_size: usize) -> Self {
        let digest_size = digest_size.min(DIGEST_SIZE);
        Self {
            digest_size,
            hasher: Md5::new(),
            size: 0,
            tail: VecDeque::with_capacity(digest_size),
            chunks: Vec::new(),
        }
    }

    /// Append `chunk` to the logical stream.
    pub fn write(&mut self, chunk: &[u8]) {
        self.chunks.push(chunk.len());
        self.size += chunk.len() as u64;

        let overflow = (self.tail.len() + chunk.len()).saturating_sub(self.digest_size);

        // Displace the oldest buffered bytes first, then the head of the chunk.
        let from_tail = overflow.min(self.tail.len());
        if from_tail > 0 {
            let (a, b) = self.tail.as_slices();
            let n = from_tail.min(a.len());
            self.hasher.update(&a[..n]);
            self.hasher.update(&b[..from_tail - n]);
            self.tail.drain(..from_tail);
        }

        let from_chunk = overflow - from_tail;
        self.hasher.update(&chunk[..from_chunk]);
        self.tail.extend(&chunk[from_chunk..]);

        trace!("VerifierSink write: len={}, total={}", chunk.len(), self.size);
    }

    /// Whether the trailing bytes are the digest of everything before them.
    ///
    /// An empty stream is never valid. Streams shorter than the digest are
    /// compared against the matching prefix of the digest.
    pub fn valid(&self) -> bool {
        if self.size == 0 {
            debug!("VerifierSink: empty stream");
            return false;
        }
        let digest = self.hasher.clone().finalize();
        let claimed: Vec<u8> = self.tail.iter().copied().collect();
        let ok = digest[..claimed.len()] == claimed[..];
        debug!(
            "VerifierSink: size={}, writes={}, valid={}",
            self.size,
            self.chunks.len(),
            ok
        );
        ok
    }

    /// Total bytes written so far.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Lengths of the writes received, for diagnostics.
    pub fn chunks(&self) -> &[usize] {
        &self.chunks
    }

    pub fn digest_size(&self) -> usize {
        self.digest_size
    }
}

impl io::Write for VerifierSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        VerifierSink::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Writes never block, so every poll completes immediately.
impl AsyncWrite for VerifierSink {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.get_mut().write(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
