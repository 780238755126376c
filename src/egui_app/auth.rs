/**
 * Authentication Module
 *
 * Auth service facade over the HTTP client plus the view-local state of the
 * login/signup screen. Successful login and registration establish the
 * session; logout always tears it down.
 */

use crate::egui_app::http::{path_segment, ApiRequest, HttpClient};
use crate::egui_app::session::{SessionError, SessionStore, SignOutReason};
use crate::shared::models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, User, UserEnvelope, VerifyResponse,
};
use crate::shared::ApiError;

/// Authentication screen state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub success: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
        self.success = None;
    }

    pub fn set_success(&mut self, message: String) {
        self.success = Some(message);
        self.error = None;
    }
}

fn session_failure(err: SessionError) -> ApiError {
    match err {
        SessionError::Incomplete(what) => {
            ApiError::server(format!("Server response is missing the {}", what))
        }
        SessionError::NotSignedIn => ApiError::authentication("Not authenticated"),
        SessionError::Storage(e) => {
            tracing::error!(error = %e, "Session could not be persisted");
            ApiError::server("Could not save the session")
        }
    }
}

/// Auth service facade
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }

    /// Create an account and sign in with it
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        phone: &str,
    ) -> Result<AuthResponse, ApiError> {
        if [username, email, password, phone]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ApiError::registration("All fields are required"));
        }

        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            phone: phone.trim().to_string(),
        };
        let response: AuthResponse = self
            .http
            .send(
                ApiRequest::post("/auth/register")
                    .json(&request)
                    .map_err(|e| e.into_api_error("Registration failed"))?,
            )
            .await
            .map_err(|e| {
                e.into_api_error("Registration failed")
                    .reclassify_rejection(ApiError::Registration)
            })?;

        self.establish(&response)?;
        tracing::info!(user = %response.user.username, "Registered new account");
        Ok(response)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::validation("Enter username and password"));
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .http
            .send(
                ApiRequest::post("/auth/login")
                    .json(&request)
                    .map_err(|e| e.into_api_error("Login failed"))?,
            )
            .await
            .map_err(|e| {
                e.into_api_error("Login failed")
                    .reclassify_rejection(ApiError::Authentication)
            })?;

        self.establish(&response)?;
        Ok(response)
    }

    fn establish(&self, response: &AuthResponse) -> Result<(), ApiError> {
        self.session()
            .sign_in(response.token.clone(), response.user.clone())
            .map_err(session_failure)
    }

    /// End the local session, then tell the backend.
    ///
    /// The session is gone before the first network byte is sent; the
    /// notification is best-effort.
    pub async fn logout(&self) {
        let token = self.end_session();
        self.notify_logout(token).await;
    }

    /// Local half of logout. Returns the token the backend should revoke.
    pub fn end_session(&self) -> Option<String> {
        let token = self.session().token();
        self.session().sign_out(SignOutReason::Logout);
        token
    }

    /// Best-effort `POST /auth/logout` carrying a token that is no longer in
    /// the session.
    pub async fn notify_logout(&self, token: Option<String>) {
        let mut request = ApiRequest::post("/auth/logout");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Err(e) = self.http.send_empty(request).await {
            tracing::warn!(error = %e, "Logout notification failed");
        }
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .http
            .send(ApiRequest::get("/auth/profile").require_auth())
            .await
            .map_err(|e| e.into_api_error("Failed to get profile"))?;
        Ok(envelope.user)
    }

    /// Check a restored session with the backend.
    ///
    /// A valid token reconciles the stored user with the server's record. An
    /// invalid token, or any failure to verify, ends the session.
    pub async fn verify(&self) -> Result<User, ApiError> {
        let outcome: Result<VerifyResponse, ApiError> = self
            .http
            .send(ApiRequest::get("/auth/verify").require_auth())
            .await
            .map_err(|e| e.into_api_error("Session verification failed"));

        match outcome {
            Ok(VerifyResponse {
                valid: true,
                user: Some(user),
            }) => self.session().reconcile_user(user).map_err(session_failure),
            Ok(VerifyResponse {
                valid: true,
                user: None,
            }) => self.session().current_user().ok_or_else(|| {
                ApiError::authentication("Session expired. Please log in again.")
            }),
            Ok(_) => {
                self.session().sign_out(SignOutReason::VerificationFailed);
                Err(ApiError::authentication("Session expired. Please log in again."))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session could not be verified");
                self.session().sign_out(SignOutReason::VerificationFailed);
                Err(e)
            }
        }
    }

    /// Grant the admin role.
    ///
    /// When promoting the signed-in account the local role flips to admin
    /// right away (optimistic); callers wanting the server's view follow up
    /// with [`AuthApi::get_profile`].
    pub async fn promote_to_admin(&self, user_id: &str) -> Result<User, ApiError> {
        let user_id = path_segment(user_id, "user id")?;

        let envelope: UserEnvelope = self
            .http
            .send(ApiRequest::put(format!("/auth/promote/{}", user_id)).require_auth())
            .await
            .map_err(|e| e.into_api_error("Failed to promote user"))?;

        let is_self = self
            .session()
            .current_user()
            .is_some_and(|current| current.id == user_id);
        if is_self {
            self.session()
                .apply_role(Role::Admin)
                .map_err(session_failure)?;
        }
        Ok(envelope.user)
    }
}
