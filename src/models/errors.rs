use std::fmt;

use thiserror::Error;

/// Coarse classification of every failure a query can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Endpoint unreachable, non-success status or timeout
    Transport,
    /// Response body is not a restaurants document
    Parse,
    /// Id lookup found no restaurant
    NotFound,
}

impl ErrorKind {
    /// Label used for metrics and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport_error",
            ErrorKind::Parse => "parse_error",
            ErrorKind::NotFound => "not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data-source errors raised while fetching the dataset
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Timeout occurred while fetching restaurants")]
    Timeout,

    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::Transport { .. } | RepositoryError::Timeout => ErrorKind::Transport,
            RepositoryError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// HTTP status returned by the endpoint, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors reported by the restaurant query service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Restaurant does not exist: {id}")]
    RestaurantNotFound { id: i64 },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::RestaurantNotFound { .. } => ErrorKind::NotFound,
            ServiceError::Repository { source } => source.kind(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for data-source operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
