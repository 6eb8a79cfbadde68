use thiserror::Error;

/// Failure modes at the backend boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not found")]
    NotFound,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ApiError {
    pub(crate) fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn status(endpoint: &str, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
        }
    }
}
