//! Domain Types
//!
//! Wire-level types for the feedback backend. Field names follow the backend's
//! JSON (`_id`, `user`, `createdAt`); the Rust side uses snake_case.
//!
//! Role-based gating helpers live on [`User`]. They are optimistic hints for
//! the UI only; the backend enforces the real rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Signed-in account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Status changes are only offered to admins.
    pub fn can_change_status(&self) -> bool {
        self.is_admin()
    }

    /// Deletion is offered to the author of the feedback and to admins.
    pub fn can_delete(&self, feedback: &Feedback) -> bool {
        self.is_admin() || feedback.author_id() == Some(self.id.as_str())
    }

    /// Promotion is offered to anyone who is not already an admin.
    pub fn can_promote(&self) -> bool {
        !self.is_admin()
    }
}

/// Lifecycle status of a feedback entry. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Closed,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 4] = [
        FeedbackStatus::Pending,
        FeedbackStatus::InProgress,
        FeedbackStatus::Completed,
        FeedbackStatus::Closed,
    ];

    /// Wire value, e.g. `in-progress`
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::InProgress => "in-progress",
            FeedbackStatus::Completed => "completed",
            FeedbackStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::InProgress => "In Progress",
            FeedbackStatus::Completed => "Completed",
            FeedbackStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a feedback entry.
///
/// The backend returns either a populated reference or the bare user id,
/// depending on whether the relation was expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        username: Option<String>,
    },
    Id(String),
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Populated { id, .. } => id,
            AuthorRef::Id(id) => id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthorRef::Populated { username, .. } => username.as_deref(),
            AuthorRef::Id(_) => None,
        }
    }
}

/// A feedback entry as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(AuthorRef::id)
    }

    /// Name shown on the board; anonymous when the author is unknown.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(AuthorRef::username)
            .unwrap_or("Anonymous")
    }
}

/// Successful login/register payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `{ "user": ... }` envelope returned by profile and promote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// Response of `GET /auth/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub database: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Body of `POST /feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: FeedbackStatus,
}

impl NewFeedback {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: FeedbackStatus::default(),
        }
    }

    pub fn with_status(mut self, status: FeedbackStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: FeedbackStatus,
}
