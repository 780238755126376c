//! Shared Module
//!
//! Platform-agnostic types used by the HTTP layer, the service facades and the
//! views: backend payloads, the facade error contract and configuration.

/// Backend payload types
pub mod models;

/// Facade error contract
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use models::{
    AuthResponse, AuthorRef, Feedback, FeedbackStatus, NewFeedback, Role, User,
};
pub use error::ApiError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
