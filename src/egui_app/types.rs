/**
 * Shared Types Module
 *
 * App view states and the outcomes background tasks report back to the UI.
 */

use crate::shared::{ApiError, AuthResponse, Feedback, User};

/// Current app view/mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Verifying a restored session
    Loading,
    /// Login/signup screen
    Auth,
    /// Feedback board
    Board,
}

/// Which auth form produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Board operation a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Refresh,
    Submit,
    Upvote,
    ChangeStatus,
    Delete,
}

impl BoardAction {
    /// Confirmation shown once the action and its refresh have completed
    pub fn success_notice(&self) -> Option<&'static str> {
        match self {
            BoardAction::Submit => Some("Feedback submitted successfully!"),
            BoardAction::Delete => Some("Feedback deleted successfully!"),
            BoardAction::Refresh | BoardAction::Upvote | BoardAction::ChangeStatus => None,
        }
    }
}

/// Result delivered from a background task to the UI thread
#[derive(Debug)]
pub enum TaskOutcome {
    Authenticated {
        mode: AuthMode,
        result: Result<AuthResponse, ApiError>,
    },
    Verified(Result<User, ApiError>),
    Board {
        generation: u64,
        /// Issue order within the board, used to drop stale lists
        request: u64,
        action: BoardAction,
        result: Result<Vec<Feedback>, ApiError>,
    },
    Promoted {
        generation: u64,
        result: Result<User, ApiError>,
    },
    Connection(bool),
}
