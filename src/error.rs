//! Error type shared by the content generator, verifier and samplers.

use std::io;
use thiserror::Error;

/// Errors raised by the core.
///
/// Verification failures are deliberately *not* represented here:
/// [`VerifierSink::valid`](crate::verifier::VerifierSink::valid) returning
/// `false` is the integrity signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RealisticError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, RealisticError>;

impl RealisticError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RealisticError::InvalidArgument(msg.into())
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        RealisticError::UnsupportedOperation(msg.into())
    }
}

// Mapping into std::io so the adapters can surface these through Read/Seek
impl From<RealisticError> for io::Error {
    fn from(e: RealisticError) -> Self {
        let kind = match e {
            RealisticError::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            RealisticError::UnsupportedOperation(_) => io::ErrorKind::Unsupported,
        };
        io::Error::new(kind, e)
    }
}
