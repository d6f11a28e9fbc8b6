// src/workload.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Local-directory workload driver.

//! Writes a generated workload into a directory and verifies it back.
//!
//! The directory plays the part of a bucket: every file is "uploaded" by
//! streaming a [`GeneratedFile`](crate::GeneratedFile) into it and "downloaded" by streaming it
//! back into a [`VerifierSink`](crate::VerifierSink). Files are pulled from the samplers one at
//! a time as concurrency permits free up and at most `jobs` writes are in
//! flight, so payload buffers stay bounded by `jobs * chunk_size`. The
//! returned [`WriteReport`] still lists every file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::WorkloadConfig;
use crate::progress::WorkloadProgress;
use crate::stream::{download_into_verifier, upload_to};

/// One file written by [`write_workload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub name: String,
    pub size: u64,
    pub seed: u64,
}

/// Outcome of [`write_workload`].
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    pub files: Vec<WrittenFile>,
    pub bytes: u64,
}

/// Outcome of [`verify_directory`]. Integrity failures are listed, not
/// raised.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub passed: u64,
    pub failed: Vec<String>,
    pub bytes: u64,
}

impl WriteReport {
    fn record(&mut self, written: WrittenFile) {
        self.bytes += written.size;
        self.files.push(written);
    }
}

impl VerifyReport {
    pub fn all_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Total size of the workload, computed by replaying the size sequence.
pub fn planned_bytes(cfg: &WorkloadConfig) -> Result<u64> {
    Ok(cfg.files()?.map(|f| f.size()).sum())
}

/// Generate every file of `cfg` into `dir`, `cfg.jobs` at a time.
pub async fn write_workload(dir: &Path, cfg: &WorkloadConfig, progress: Arc<WorkloadProgress>) -> Result<WriteReport> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    let started = Instant::now();
    let sem = Arc::new(Semaphore::new(cfg.jobs));
    let mut futs: FuturesUnordered<JoinHandle<Result<WrittenFile>>> = FuturesUnordered::new();
    let mut names = cfg.names()?;
    let chunk_size = cfg.chunk_size;
    let mut report = WriteReport::default();

    for (index, mut file) in cfg.files()?.enumerate() {
        // Reap a finished write before queuing more than `jobs` tasks.
        if futs.len() >= cfg.jobs {
            if let Some(result) = futs.next().await {
                report.record(result??);
            }
        }
        // Pull the next file only once a slot is free.
        let permit = sem.clone().acquire_owned().await?;
        let name = format!("{:06}-{}", index, names.next().unwrap_or_default());
        let path = dir.join(&name);
        let progress = progress.clone();

        futs.push(tokio::spawn(async move {
            let _permit = permit;
            let mut out = tokio::fs::File::create(&path)
                .await
                .with_context(|| format!("creating {}", path.display()))?;
            let written = upload_to(&mut file, &mut out, chunk_size)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            progress.object_completed(written);
            debug!("wrote {} ({} bytes, seed={})", name, written, file.seed());
            Ok::<WrittenFile, anyhow::Error>(WrittenFile { name, size: written, seed: file.seed() })
        }));
    }

    while let Some(result) = futs.next().await {
        report.record(result??);
    }
    report.files.sort_by(|a, b| a.name.cmp(&b.name));

    info!(
        "wrote {} files ({} bytes) to {} in {:.2?}",
        report.files.len(),
        report.bytes,
        dir.display(),
        started.elapsed()
    );
    Ok(report)
}

/// Regular files directly under `dir`, sorted by name.
pub async fn list_files(dir: &Path) -> Result<Vec<(PathBuf, u64)>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading {}", dir.display()))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if meta.is_file() {
            files.push((entry.path(), meta.len()));
        }
    }
    files.sort();
    Ok(files)
}

/// Stream every file in `dir` through a fresh verifier, `jobs` at a time.
pub async fn verify_directory(dir: &Path, jobs: usize, progress: Arc<WorkloadProgress>) -> Result<VerifyReport> {
    let files = list_files(dir).await?;
    let sem = Arc::new(Semaphore::new(jobs.max(1)));
    let mut futs = FuturesUnordered::new();

    for (path, _) in files {
        let permit = sem.clone().acquire_owned().await?;
        let progress = progress.clone();
        futs.push(tokio::spawn(async move {
            let _permit = permit;
            let mut input = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            let sink = download_into_verifier(&mut input)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            progress.object_completed(sink.size());
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok::<(String, u64, bool), anyhow::Error>((name, sink.size(), sink.valid()))
        }));
    }

    let mut report = VerifyReport::default();
    while let Some(result) = futs.next().await {
        let (name, size, valid) = result??;
        report.bytes += size;
        if valid {
            report.passed += 1;
        } else {
            warn!("content mismatch: {} ({} bytes)", name, size);
            report.failed.push(name);
        }
    }
    report.failed.sort();
    Ok(report)
}
