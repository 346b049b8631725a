use std::fmt;

/// Errors surfaced by the partitioning core.
#[derive(Debug)]
pub enum Error {
    /// A sweep or run parameter was rejected before any worker started.
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    /// A worker panicked; the whole run is discarded.
    WorkerFailure { worker: usize, message: String },
    /// The OS refused to give us the requested worker threads.
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Error::InvalidConfiguration { field, reason }
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration: {} {}", field, reason)
            }
            Error::WorkerFailure { worker, message } => {
                write!(f, "worker {} failed: {}", worker, message)
            }
            Error::ThreadPool(err) => write!(f, "failed to start worker threads: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ThreadPool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
