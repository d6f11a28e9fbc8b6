//! src/sampler/mod.rs
//! Distribution samplers that drive bulk generation.
//!
//! Every sampler owns its own seeded ChaCha20 generator; there is no
//! process-wide random state, so two samplers built with the same
//! parameters produce the same sequence regardless of what else runs.
//! All of them are plain `Iterator`s and produce elements on demand.

pub mod names;
pub mod normal;
pub mod pool;
pub mod sizes;
pub mod varied;

pub use names::NameSequence;
pub use normal::NormalSampler;
pub use pool::PooledFiles;
pub use sizes::SizeSequence;
pub use varied::{MixedSizeSequence, SizeClass, VariedSizeSequence};
