//! Async plumbing between payloads and storage clients.
//!
//! Upload APIs usually want either a `Stream` of `Bytes` or something to
//! write into; download APIs usually hand out an `AsyncRead`. These helpers
//! bridge both sides without ever holding more than one chunk in memory.

use std::io;

use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::content_file::ContentFile;
use crate::generated_file::GeneratedFile;
use crate::verifier::VerifierSink;

/// Turn `file` into a stream of `chunk_size` pieces, starting at its
/// current offset and ending at EOF.
pub fn chunk_stream<F>(file: F, chunk_size: usize) -> BoxStream<'static, io::Result<Bytes>>
where
    F: ContentFile + Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    stream::unfold(file, move |mut file| async move {
        let chunk = file.read(Some(chunk_size));
        if chunk.is_empty() { None } else { Some((Ok(chunk), file)) }
    })
    .boxed()
}

impl GeneratedFile {
    /// Rewind and expose the whole file as an upload body stream.
    pub fn into_chunk_stream(mut self, chunk_size: usize) -> BoxStream<'static, io::Result<Bytes>> {
        self.restart();
        chunk_stream(self, chunk_size)
    }
}

/// Copy `file` from the start into `writer`, then flush it.
/// Returns the number of bytes written.
pub async fn upload_to<F, W>(file: &mut F, writer: &mut W, chunk_size: usize) -> io::Result<u64>
where
    F: ContentFile + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    file.seek(0)?;
    let chunk_size = chunk_size.max(1);
    let mut total = 0u64;
    loop {
        let chunk = file.read(Some(chunk_size));
        if chunk.is_empty() {
            break;
        }
        writer.write_all(&chunk).await?;
        total += chunk.len() as u64;
    }
    writer.flush().await?;
    debug!("upload_to: wrote {} bytes", total);
    Ok(total)
}

/// Drain `reader` into a fresh [`VerifierSink`] and hand the sink back for
/// the caller to query.
pub async fn download_into_verifier<R>(reader: &mut R) -> io::Result<VerifierSink>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut sink = VerifierSink::default();
    let n = tokio::io::copy(reader, &mut sink).await?;
    debug!("download_into_verifier: read {} bytes", n);
    Ok(sink)
}
