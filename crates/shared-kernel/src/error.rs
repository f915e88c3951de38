// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum EncLinesError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<EncLinesError>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

impl EncLinesError {
    /// Whether the error stems from caller-supplied configuration rather than from a file.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_configuration(),
            Self::Domain(_) => true,
            Self::Infrastructure(InfrastructureError::ThreadPoolCreation { .. }) => true,
            Self::Infrastructure(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EncLinesError>;

/// Domain-layer specific errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Unknown line counting method: '{value}'")]
    UnknownLineCountMethod { value: String },

    #[error("Unknown encoding name: '{name}'")]
    UnknownEncoding { name: String },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to query metadata of '{path}': {source}")]
    FileMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Thread pool creation failed: {details}")]
    ThreadPoolCreation { details: String },
}

impl InfrastructureError {
    /// Build a closure mapping an I/O error on `path` into [`InfrastructureError::FileRead`].
    pub fn file_read(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::FileRead { path: path.to_path_buf(), source }
    }
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<EncLinesError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EncLinesError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EncLinesError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
