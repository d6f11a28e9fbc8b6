//! src/content_file.rs
//! File-like read contract handed to upload collaborators.
//!
//! Uploaders only ever need three things from a payload: pull the next
//! bytes, ask where they are, and rewind to retry. Both
//! [`GeneratedFile`](crate::generated_file::GeneratedFile) and
//! [`PrecomputedFile`](crate::precomputed::PrecomputedFile) implement this
//! trait, so a consumer written against `ContentFile` accepts either.

use bytes::Bytes;

use crate::error::Result;

/// Trait for sequential, rewindable payload sources.
pub trait ContentFile {
    /// Read up to `n` bytes from the current offset, or to the end when
    /// `n` is `None`. An empty result means end of file.
    fn read(&mut self, n: Option<usize>) -> Bytes;

    /// Reposition the cursor. Implementations may restrict which offsets
    /// are accepted.
    fn seek(&mut self, offset: u64) -> Result<()>;

    /// Current cursor position.
    fn tell(&self) -> u64;

    /// Total logical length in bytes.
    fn size(&self) -> u64;

    /// Bytes left between the cursor and the end.
    fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.tell())
    }
}
