use reqwest::StatusCode;
use thiserror::Error;

/// A remote call failure. The data-access layer has exactly one error
/// taxonomy: a call either completed or it did not, and the variants only
/// record enough context to tell the user and the log what went wrong.
/// Status codes are not interpreted beyond success/failure, and no failure
/// is fatal to the application.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("{operation}: transport failure: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation}: server answered {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },
    #[error("{operation}: invalid response payload: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteCallError {
    pub(crate) fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }

    pub(crate) fn status(operation: &'static str, status: StatusCode) -> Self {
        Self::Status { operation, status }
    }

    pub(crate) fn decode(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Decode { operation, source }
    }

    /// The service operation that failed, for log context.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}

/// Rejected at client construction, before any request is issued.
#[derive(Debug, Error)]
#[error("invalid server url '{url}': {reason}")]
pub struct InvalidServerUrl {
    pub url: String,
    pub reason: String,
}
