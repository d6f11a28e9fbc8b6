//! Fully materialized payloads.
//!
//! `PrecomputedFile` renders a [`GeneratedFile`] once and serves it from
//! memory afterwards. Clones share the same buffer, which makes it a good
//! fit for small objects that get uploaded over and over (see
//! [`PooledFiles`](crate::sampler::PooledFiles)). Unlike the streaming
//! generator it supports seeking anywhere.

use std::io::{self, Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::content_file::ContentFile;
use crate::error::{RealisticError, Result};
use crate::generated_file::GeneratedFile;

#[derive(Debug, Clone)]
pub struct PrecomputedFile {
    data: Bytes,
    offset: u64,
}

impl PrecomputedFile {
    /// Render `file` from its start. The source is rewound first.
    pub fn from_generated(mut file: GeneratedFile) -> Self {
        file.restart();
        Self { data: file.read(None), offset: 0 }
    }

    pub fn from_bytes(data: Bytes) -> Self {
        Self { data, offset: 0 }
    }

    /// The whole payload, independent of the cursor.
    pub fn contents(&self) -> &Bytes {
        &self.data
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }
}

impl ContentFile for PrecomputedFile {
    fn read(&mut self, n: Option<usize>) -> Bytes {
        let start = self.offset.min(self.len()) as usize;
        let end = match n {
            Some(n) => start.saturating_add(n).min(self.data.len()),
            None => self.data.len(),
        };
        self.offset = self.offset.max(end as u64);
        self.data.slice(start..end)
    }

    /// Any offset is accepted; reads past the end return empty.
    fn seek(&mut self, offset: u64) -> Result<()> {
        self.offset = offset;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.offset
    }

    fn size(&self) -> u64 {
        self.len()
    }
}

impl Read for PrecomputedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = ContentFile::read(self, Some(buf.len()));
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl Seek for PrecomputedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::End(d) => self.len().checked_add_signed(d),
            SeekFrom::Current(d) => self.offset.checked_add_signed(d),
        };
        let target = target.ok_or_else(|| {
            io::Error::from(RealisticError::invalid(format!("seek before start: {pos:?}")))
        })?;
        self.offset = target;
        Ok(target)
    }
}
