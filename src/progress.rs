use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Progress bar for workload runs with warp-style formatting
pub struct WorkloadProgress {
    pub progress_bar: ProgressBar,
    objects_completed: AtomicU64,
    bytes_transferred: AtomicU64,
    total_objects: u64,
}

impl WorkloadProgress {
    /// Create a new progress tracker for `total_objects` files totalling `total_bytes`
    pub fn new(operation: &str, total_objects: u64, total_bytes: u64) -> Self {
        let pb = ProgressBar::new(total_bytes);

        // Warp-style progress bar template; a bad template only loses styling
        if let Ok(style) = ProgressStyle::default_bar().template(&format!(
            "{}: {{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{bytes}}/{{total_bytes}} ({{bytes_per_sec}}, ETA: {{eta}}) {{msg}}",
            operation
        )) {
            pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        pb.set_message(format!("0/{} objects", total_objects));

        Self {
            progress_bar: pb,
            objects_completed: AtomicU64::new(0),
            bytes_transferred: AtomicU64::new(0),
            total_objects,
        }
    }

    /// Tracker that draws nothing, for quiet runs and tests
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
            objects_completed: AtomicU64::new(0),
            bytes_transferred: AtomicU64::new(0),
            total_objects: 0,
        }
    }

    /// Call this when one file has been fully written or verified
    pub fn object_completed(&self, bytes: u64) {
        let completed = self.objects_completed.fetch_add(1, Ordering::Relaxed) + 1;
        let total_bytes = self.bytes_transferred.fetch_add(bytes, Ordering::Relaxed) + bytes;

        self.progress_bar.set_position(total_bytes);
        self.progress_bar.set_message(format!("{}/{} objects", completed, self.total_objects));
    }

    pub fn objects_completed(&self) -> u64 {
        self.objects_completed.load(Ordering::Relaxed)
    }

    /// Finish the progress bar with a completion message
    pub fn finish(&self, operation: &str, duration: Duration) {
        let total_bytes = self.bytes_transferred.load(Ordering::Relaxed);
        let secs = duration.as_secs_f64().max(f64::EPSILON);
        let throughput_mbps = (total_bytes as f64 / 1_048_576.0) / secs;

        self.progress_bar.finish_with_message(format!(
            "{} complete! {:.2} MB in {:.2}s ({:.2} MB/s)",
            operation,
            total_bytes as f64 / 1_048_576.0,
            duration.as_secs_f64(),
            throughput_mbps
        ));
    }
}
