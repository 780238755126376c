/**
 * HTTP Client Wrapper
 *
 * Every backend call goes through `HttpClient`. It attaches the bearer token of
 * the current session and, when any response comes back 401, tears the session
 * down before handing the error to the caller. Facades never need to handle
 * expiry themselves.
 */

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::egui_app::config::Config;
use crate::egui_app::session::{SessionStore, SignOutReason};
use crate::shared::ApiError;

/// Whether a request carries the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// Attach the token if there is one
    Attach,
    /// Refuse to send without a token
    Require,
}

/// A logical backend request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
    credentials: Credentials,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            credentials: Credentials::Attach,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn require_auth(mut self) -> Self {
        self.credentials = Credentials::Require;
        self
    }
}

/// Validate a value that is spliced into the URL as a single path segment.
pub fn path_segment<'a>(value: &'a str, label: &str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() || value.contains(['/', '?', '#']) {
        return Err(ApiError::validation(format!("A valid {} is required", label)));
    }
    Ok(value)
}

/// Transport-level failure, before any operation-specific interpretation
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("not authenticated")]
    MissingCredentials,

    #[error("request could not reach the server: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server responded with {status}")]
    Status {
        status: StatusCode,
        /// `message` (or `error`) field of the backend's error payload
        message: Option<String>,
    },

    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header {0}")]
    InvalidHeader(String),
}

impl HttpError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Normalize into the facade error contract.
    ///
    /// The backend's message wins; `fallback` names the failed operation
    /// otherwise.
    pub fn into_api_error(self, fallback: &str) -> ApiError {
        match self {
            HttpError::MissingCredentials => ApiError::Authentication("Not authenticated".to_string()),
            HttpError::Network(e) => {
                tracing::debug!(error = %e, "Transport failure");
                ApiError::Network(format!("{}: could not reach the server", fallback))
            }
            HttpError::Status { status, message } => {
                let message = message.unwrap_or_else(|| fallback.to_string());
                match status {
                    StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                        ApiError::Validation(message)
                    }
                    StatusCode::UNAUTHORIZED => ApiError::Authentication(message),
                    StatusCode::FORBIDDEN => ApiError::Authorization(message),
                    StatusCode::NOT_FOUND => ApiError::NotFound(message),
                    _ => ApiError::Server(message),
                }
            }
            HttpError::Decode(e) => {
                tracing::warn!(error = %e, "Undecodable response");
                ApiError::Server(format!("{}: unexpected response from server", fallback))
            }
            HttpError::InvalidHeader(name) => ApiError::Validation(format!("{}: invalid header {}", fallback, name)),
        }
    }
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    payload
        .message
        .or(payload.error)
        .filter(|m| !m.trim().is_empty())
}

/// Shared HTTP client bound to one API base URL and one session store
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: Config,
    client: Client,
    session: SessionStore,
}

impl HttpClient {
    pub fn new(config: Config, session: SessionStore) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(HttpError::Network)?;
        Ok(Self {
            config,
            client,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send and decode a JSON response body
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, HttpError> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send and ignore whatever body comes back
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), HttpError> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>, HttpError> {
        let token = self.session.token();
        if request.credentials == Credentials::Require && token.is_none() {
            tracing::debug!(path = %request.path, "Refusing unauthenticated request");
            return Err(HttpError::MissingCredentials);
        }

        let url = self.config.api_url(&request.path);
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        let response = builder.send().await.map_err(HttpError::Network)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %request.path, "Request unauthorized, ending session");
            self.session.sign_out(SignOutReason::Unauthorized);
        }

        let body = response.bytes().await.map_err(HttpError::Network)?;
        if !status.is_success() {
            let message = error_message(&String::from_utf8_lossy(&body));
            tracing::debug!(%status, path = %request.path, ?message, "Request failed");
            return Err(HttpError::Status { status, message });
        }

        Ok(body.to_vec())
    }
}
