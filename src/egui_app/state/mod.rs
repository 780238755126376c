use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::TryRecvError};

pub mod board;

pub use board::BoardState;

use crate::egui_app::auth::{AuthApi, AuthState};
use crate::egui_app::config::Config;
use crate::egui_app::feedback_api::FeedbackApi;
use crate::egui_app::health;
use crate::egui_app::http::{HttpClient, HttpError};
use crate::egui_app::session::{
    FileSessionStorage, SessionEvent, SessionStore, SignOutReason,
};
use crate::egui_app::types::{AppView, AuthMode, BoardAction, TaskOutcome};
use crate::shared::{Feedback, FeedbackStatus, NewFeedback, User};

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Central application state shared across egui views.
///
/// Network work runs on the tokio runtime; outcomes come back through a
/// channel drained by [`AppState::poll`] once per frame. Board completions
/// carry the generation of the board that issued them so results addressed to
/// a torn-down board are dropped.
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub auth_state: AuthState,
    pub current_view: AppView,
    pub username_input: String,
    pub email_input: String,
    pub phone_input: String,
    pub password_input: String,
    pub is_signup_mode: bool,
    pub board: BoardState,
    /// `None` until the first health check completes
    pub is_online: Option<bool>,

    http: HttpClient,
    auth_api: AuthApi,
    feedback_api: FeedbackApi,
    runtime: Handle,
    session_events: broadcast::Receiver<SessionEvent>,
    outcome_tx: Sender<TaskOutcome>,
    outcome_rx: Receiver<TaskOutcome>,
    board_generation: u64,
}

impl AppState {
    /// Restore the persisted session and start the app.
    pub fn new(config: Config, runtime: Handle) -> Result<Self, HttpError> {
        let storage = FileSessionStorage::new(config.session_file());
        tracing::debug!(path = %storage.path().display(), "Using session file");
        let session = SessionStore::restore(storage);
        Self::with_session(config, session, runtime)
    }

    pub fn with_session(
        config: Config,
        session: SessionStore,
        runtime: Handle,
    ) -> Result<Self, HttpError> {
        let http = HttpClient::new(config.clone(), session.clone())?;
        let (outcome_tx, outcome_rx) = channel();

        let mut state = Self {
            config,
            session_events: session.subscribe(),
            session,
            auth_state: AuthState::new(),
            current_view: AppView::Auth,
            username_input: String::new(),
            email_input: String::new(),
            phone_input: String::new(),
            password_input: String::new(),
            is_signup_mode: false,
            board: BoardState::new(),
            is_online: None,
            auth_api: AuthApi::new(http.clone()),
            feedback_api: FeedbackApi::new(http.clone()),
            http,
            runtime,
            outcome_tx,
            outcome_rx,
            board_generation: 0,
        };

        if state.session.is_authenticated() {
            state.current_view = AppView::Loading;
            let api = state.auth_api.clone();
            state.spawn(async move { TaskOutcome::Verified(api.verify().await) });
        }
        state.check_connection();
        tracing::info!(server = %state.config.server_url(), "AppState initialized");
        Ok(state)
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            // The receiver only goes away with the app itself.
            let _ = tx.send(task.await);
        });
    }

    /// Drain session events and task outcomes. Call once per frame.
    pub fn poll(&mut self) {
        let mut lagged = false;
        loop {
            match self.session_events.try_recv() {
                Ok(event) => self.handle_session_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed session events");
                    lagged = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if lagged {
            self.resync_view();
        }

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.handle_outcome(outcome);
        }
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(user) => {
                tracing::debug!(user = %user.username, "Entering board");
                self.enter_board();
            }
            SessionEvent::UserUpdated(user) => {
                tracing::debug!(user = %user.username, role = %user.role, "User record changed");
            }
            SessionEvent::SignedOut(reason) => self.leave_board(reason),
        }
    }

    /// Bring the view back in line with the session after missed events.
    pub(crate) fn resync_view(&mut self) {
        let authenticated = self.session.is_authenticated();
        match self.current_view {
            AppView::Board if !authenticated => self.leave_board(SignOutReason::Unauthorized),
            AppView::Auth if authenticated => self.enter_board(),
            AppView::Board | AppView::Auth | AppView::Loading => {}
        }
    }

    fn enter_board(&mut self) {
        self.board_generation += 1;
        self.board = BoardState::new();
        self.current_view = AppView::Board;
        self.auth_state = AuthState::new();
        self.password_input.clear();
        self.refresh_feedback();
    }

    fn leave_board(&mut self, reason: SignOutReason) {
        self.board_generation += 1;
        self.board = BoardState::new();
        self.current_view = AppView::Auth;
        self.is_signup_mode = false;
        self.password_input.clear();
        self.auth_state = AuthState::new();
        match reason {
            SignOutReason::Logout => {
                self.auth_state.set_success("Logged out successfully!".to_string())
            }
            SignOutReason::Unauthorized | SignOutReason::VerificationFailed => {
                self.auth_state.set_error(SESSION_EXPIRED.to_string())
            }
        }
    }

    pub(crate) fn handle_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Authenticated { mode, result } => {
                if self.current_view != AppView::Auth && result.is_err() {
                    tracing::debug!(?mode, "Ignoring late auth failure");
                    return;
                }
                self.auth_state.loading = false;
                match result {
                    Ok(response) => {
                        tracing::info!(user = %response.user.username, ?mode, "Authentication successful");
                        self.password_input.clear();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, ?mode, "Authentication failed");
                        self.auth_state.set_error(e.to_string());
                    }
                }
            }
            TaskOutcome::Verified(result) => match result {
                Ok(_) if self.session.is_authenticated() => {
                    if self.current_view == AppView::Loading {
                        self.enter_board();
                    }
                }
                Ok(_) | Err(_) => {
                    if self.current_view == AppView::Loading {
                        self.current_view = AppView::Auth;
                        self.auth_state.set_error(SESSION_EXPIRED.to_string());
                    }
                }
            },
            TaskOutcome::Board {
                generation,
                request,
                action,
                result,
            } => {
                if generation != self.board_generation {
                    tracing::debug!(?action, "Ignoring completion for a closed board");
                    return;
                }
                self.board.finish_request();
                match result {
                    Ok(feedbacks) => {
                        if !self.board.apply_snapshot(request, feedbacks) {
                            tracing::debug!(request, ?action, "Dropping stale feedback list");
                        }
                        if action == BoardAction::Submit {
                            self.board.clear_form();
                        }
                        if let Some(notice) = action.success_notice() {
                            self.board.set_success(notice);
                        }
                    }
                    Err(e) => self.board.set_error(e.to_string()),
                }
            }
            TaskOutcome::Promoted { generation, result } => {
                if generation != self.board_generation {
                    return;
                }
                self.board.finish_request();
                match result {
                    Ok(user) => {
                        tracing::info!(user = %user.username, "Promoted to admin");
                        self.board.set_success("Promoted to admin!");
                    }
                    Err(e) => self.board.set_error(e.to_string()),
                }
            }
            TaskOutcome::Connection(online) => self.is_online = Some(online),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn can_change_status(&self) -> bool {
        self.current_user().is_some_and(|u| u.can_change_status())
    }

    pub fn can_delete(&self, feedback: &Feedback) -> bool {
        self.current_user().is_some_and(|u| u.can_delete(feedback))
    }

    pub fn can_promote(&self) -> bool {
        self.current_user().is_some_and(|u| u.can_promote())
    }

    pub fn handle_login(&mut self) {
        if self.username_input.trim().is_empty() || self.password_input.is_empty() {
            self.auth_state
                .set_error("Enter username and password".to_string());
            return;
        }

        self.auth_state.loading = true;
        self.auth_state.error = None;

        let api = self.auth_api.clone();
        let username = self.username_input.clone();
        let password = self.password_input.clone();
        self.spawn(async move {
            TaskOutcome::Authenticated {
                mode: AuthMode::Login,
                result: api.login(&username, &password).await,
            }
        });
    }

    pub fn handle_signup(&mut self) {
        let fields = [
            &self.username_input,
            &self.email_input,
            &self.phone_input,
            &self.password_input,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            self.auth_state
                .set_error("All fields are required".to_string());
            return;
        }

        self.auth_state.loading = true;
        self.auth_state.error = None;

        let api = self.auth_api.clone();
        let username = self.username_input.clone();
        let email = self.email_input.clone();
        let phone = self.phone_input.clone();
        let password = self.password_input.clone();
        self.spawn(async move {
            TaskOutcome::Authenticated {
                mode: AuthMode::Signup,
                result: api.register(&username, &email, &password, &phone).await,
            }
        });
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.auth_state = AuthState::new();
        self.password_input.clear();
    }

    /// End the session now; the server is told in the background.
    pub fn logout(&mut self) {
        let token = self.auth_api.end_session();
        let api = self.auth_api.clone();
        self.runtime.spawn(async move { api.notify_logout(token).await });
    }

    pub fn check_connection(&self) {
        let http = self.http.clone();
        self.spawn(async move { TaskOutcome::Connection(health::check_connection(&http).await) });
    }

    fn spawn_board<F>(&mut self, action: BoardAction, mutation: F)
    where
        F: Future<Output = Result<(), crate::shared::ApiError>> + Send + 'static,
    {
        let request = self.board.begin_request();
        let generation = self.board_generation;
        let api = self.feedback_api.clone();
        self.spawn(async move {
            let result = match mutation.await {
                Ok(()) => api.list().await,
                Err(e) => Err(e),
            };
            TaskOutcome::Board {
                generation,
                request,
                action,
                result,
            }
        });
    }

    pub fn refresh_feedback(&mut self) {
        self.spawn_board(BoardAction::Refresh, async { Ok(()) });
    }

    pub fn submit_feedback(&mut self) {
        if !self.board.form_is_complete() {
            self.board.set_error("Please fill all fields");
            return;
        }
        let api = self.feedback_api.clone();
        let feedback = NewFeedback::new(
            self.board.title_input.clone(),
            self.board.description_input.clone(),
        )
        .with_status(self.board.status_input);
        self.spawn_board(BoardAction::Submit, async move {
            api.create(feedback).await.map(|_| ())
        });
    }

    /// Every click sends its own request.
    pub fn upvote(&mut self, id: &str) {
        let api = self.feedback_api.clone();
        let id = id.to_string();
        self.spawn_board(BoardAction::Upvote, async move {
            api.upvote(&id).await.map(|_| ())
        });
    }

    pub fn change_status(&mut self, id: &str, status: FeedbackStatus) {
        let api = self.feedback_api.clone();
        let id = id.to_string();
        self.spawn_board(BoardAction::ChangeStatus, async move {
            api.update_status(&id, status).await.map(|_| ())
        });
    }

    pub fn request_delete(&mut self, id: &str) {
        self.board.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.board.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.board.pending_delete.take() else {
            return;
        };
        let api = self.feedback_api.clone();
        self.spawn_board(BoardAction::Delete, async move { api.remove(&id).await });
    }

    /// Promote the signed-in user, then reconcile the optimistic role with the
    /// server's profile.
    pub fn promote_to_admin(&mut self) {
        let Some(user) = self.current_user() else {
            return;
        };
        self.board.begin_request();
        let generation = self.board_generation;
        let api = self.auth_api.clone();
        self.spawn(async move {
            let result = match api.promote_to_admin(&user.id).await {
                Ok(promoted) => {
                    match api.get_profile().await {
                        Ok(profile) => {
                            if let Err(e) = api.session().reconcile_user(profile) {
                                tracing::warn!(error = %e, "Keeping optimistic role");
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Profile refresh after promotion failed"),
                    }
                    Ok(promoted)
                }
                Err(e) => Err(e),
            };
            TaskOutcome::Promoted { generation, result }
        });
    }
}
