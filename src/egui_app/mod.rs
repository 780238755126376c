//! egui Native Desktop App Module
//!
//! Desktop client for the feedback board backend.
//!
//! # Architecture
//!
//! - **`config`** - Resolved runtime configuration (server URL, session file, timeout)
//! - **`session`** - Session state holder with persistence and change events
//! - **`http`** - Request wrapper: base URL, bearer token, 401 teardown
//! - **`auth`** - Auth facade (register, login, logout, profile, verify, promote)
//! - **`feedback_api`** - Feedback facade (list, create, upvote, status, delete)
//! - **`health`** - Backend connectivity probe
//! - **`types`** - View enums and background task outcomes
//! - **`state`** - UI controller driving the facades
//! - **`views`** / **`theme`** - egui rendering
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── config.rs       - Configuration
//! ├── session/        - SessionStore and storage backends
//! ├── http.rs         - HttpClient and ApiRequest
//! ├── auth.rs         - AuthApi
//! ├── feedback_api.rs - FeedbackApi
//! ├── health.rs       - Connectivity check
//! ├── types.rs        - Shared types
//! ├── state/          - AppState and BoardState
//! ├── views/          - Top bar, auth and board views
//! └── theme/          - Colors and frames
//! ```

pub mod auth;
pub mod config;
pub mod feedback_api;
pub mod health;
pub mod http;
pub mod session;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

pub use auth::{AuthApi, AuthState};
pub use config::Config;
pub use feedback_api::FeedbackApi;
pub use http::{ApiRequest, HttpClient, HttpError};
pub use session::{SessionEvent, SessionState, SessionStore, SignOutReason};
pub use state::AppState;
pub use types::*;
