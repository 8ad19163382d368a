//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("S3 error: {0}")]
    Storage(String),

    #[error("CloudFront error: {0}")]
    Cdn(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("{step} failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error with the name of the deployment step it aborted.
    pub fn step(step: &'static str, source: Error) -> Self {
        Error::Step {
            step,
            source: Box::new(source),
        }
    }

    /// Name of the failed step, if this error came out of the orchestrator.
    pub fn step_name(&self) -> Option<&'static str> {
        match self {
            Error::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
