//! Feedback Board - Main Library
//!
//! Client for a community feedback board: members sign up, submit ideas,
//! upvote them, and administrators move them through a status lifecycle.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Wire models (users, feedback, auth responses)
//!   - The `ApiError` taxonomy shown to users
//!   - Layered configuration
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session lifecycle and persistence
//!   - HTTP wrapper with bearer auth and 401 teardown
//!   - Auth and feedback facades
//!   - Views
//!
//! # Usage
//!
//! ```rust,no_run
//! use feedback_board::egui_app::{AuthApi, Config, FeedbackApi, HttpClient, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let session = SessionStore::in_memory();
//! let http = HttpClient::new(config, session)?;
//!
//! AuthApi::new(http.clone()).login("alice", "secret").await?;
//! let feedbacks = FeedbackApi::new(http).list().await?;
//! # let _ = feedbacks;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - `SessionStore` is `Arc<RwLock<..>>` plus a `broadcast::Sender`; clones share state
//! - `HttpClient` clones share the connection pool and the session
//! - egui is single-threaded immediate mode; background results arrive over a channel

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
