//! Backend connectivity probe

use crate::egui_app::http::{ApiRequest, HttpClient};
use crate::shared::models::HealthResponse;

/// `true` only when the backend answers and reports its database connected.
pub async fn check_connection(http: &HttpClient) -> bool {
    match http.send::<HealthResponse>(ApiRequest::get("/health")).await {
        Ok(health) => {
            let connected = health.database.as_deref() == Some("connected");
            tracing::debug!(database = ?health.database, connected, "Health check");
            connected
        }
        Err(e) => {
            tracing::warn!(error = %e, "Backend connection failed");
            false
        }
    }
}
