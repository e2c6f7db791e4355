use crate::membership::types::Backend;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no backends registered")]
    EmptyRing,

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

/// Failure reported by a forwarding collaborator for one dispatch attempt.
#[derive(Error, Debug)]
#[error("forwarding to {backend} failed: {source}")]
pub struct ForwardError {
    pub backend: Backend,
    pub source: BoxError,
}

impl ForwardError {
    pub fn new(backend: &Backend, source: impl Into<BoxError>) -> Self {
        Self {
            backend: backend.clone(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
