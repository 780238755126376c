//! Shared Error Types
//!
//! The uniform error contract of the service facades. Every variant carries a
//! single human-readable message, which is also its `Display` output, so views
//! can render any failure directly.
//!
//! # Error Categories
//!
//! - `Validation` - missing or malformed input, caught before the network call
//! - `Registration` - sign-up rejected (missing field, duplicate username, ...)
//! - `Authentication` - bad credentials, missing or refused token
//! - `Authorization` - insufficient role
//! - `NotFound` - the addressed resource does not exist
//! - `Network` - the request never reached the backend
//! - `Server` - 5xx or a payload of unexpected shape
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Registration(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Server(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn registration(message: impl Into<String>) -> Self {
        Self::Registration(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::Registration(m)
            | Self::Authentication(m)
            | Self::Authorization(m)
            | Self::NotFound(m)
            | Self::Network(m)
            | Self::Server(m) => m,
        }
    }

    /// Whether the backend (or local pre-checks) refused the request, as
    /// opposed to the request failing in transit or on the server.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Registration(_)
                | Self::Authentication(_)
                | Self::Authorization(_)
                | Self::NotFound(_)
        )
    }

    /// Re-labels a rejection with the category an operation reports.
    ///
    /// Network and server failures keep their category.
    pub fn reclassify_rejection(self, into: fn(String) -> ApiError) -> Self {
        if self.is_rejection() {
            let message = self.message().to_string();
            into(message)
        } else {
            self
        }
    }
}
