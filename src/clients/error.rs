use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    #[error("Request rejected by store: {0}")]
    Rejected(String),
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

impl From<FrameworkError> for RemoteError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Rejected(reason) => RemoteError::Rejected(reason),
            other => RemoteError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Transport(e.to_string())
    }
}
