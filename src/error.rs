//! Frontend Errors
//!
//! Typed failures for id parsing and backend calls.

use thiserror::Error;

/// Problems reading an item id from the page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("no seiyuu id found in {0}")]
    Missing(String),
    #[error("malformed seiyuu id {0:?}")]
    Malformed(String),
    #[error("seiyuu id {0} appears more than once")]
    Duplicate(String),
}

/// Failures talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("not logged in: {0}")]
    Unauthorized(String),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Short text for an error toast
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "Couldn't reach the server. Your change was not saved.",
            ApiError::Unauthorized(_) => "Log in to keep track of your favorite seiyuu.",
            ApiError::Status { .. } => "The server couldn't save your change.",
            ApiError::Encode(_) => "Something went wrong preparing your request.",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Encode(err.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
