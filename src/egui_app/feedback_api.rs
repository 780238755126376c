//! Feedback API Client
//!
//! Async facade over the `/feedback` resource. Results are returned exactly as
//! the backend sends them; the list keeps server order.

use crate::egui_app::http::{path_segment, ApiRequest, HttpClient};
use crate::shared::models::{Feedback, FeedbackStatus, NewFeedback, StatusUpdate};
use crate::shared::ApiError;

/// Feedback service facade
#[derive(Debug, Clone)]
pub struct FeedbackApi {
    http: HttpClient,
}

fn feedback_path(id: &str, action: Option<&str>) -> Result<String, ApiError> {
    let id = path_segment(id, "feedback id")?;
    Ok(match action {
        Some(action) => format!("/feedback/{}/{}", id, action),
        None => format!("/feedback/{}", id),
    })
}

impl FeedbackApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// All feedback in server order
    pub async fn list(&self) -> Result<Vec<Feedback>, ApiError> {
        let feedbacks: Vec<Feedback> = self
            .http
            .send(ApiRequest::get("/feedback"))
            .await
            .map_err(|e| e.into_api_error("Failed to fetch feedbacks"))?;
        tracing::debug!(count = feedbacks.len(), "Fetched feedback");
        Ok(feedbacks)
    }

    pub async fn create(&self, feedback: NewFeedback) -> Result<Feedback, ApiError> {
        let NewFeedback {
            title,
            description,
            status,
        } = feedback;
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ApiError::validation("Please fill all fields"));
        }

        let body = NewFeedback::new(title, description).with_status(status);
        let created: Feedback = self
            .http
            .send(
                ApiRequest::post("/feedback")
                    .json(&body)
                    .map_err(|e| e.into_api_error("Failed to create feedback"))?,
            )
            .await
            .map_err(|e| e.into_api_error("Failed to create feedback"))?;
        tracing::info!(id = %created.id, "Feedback submitted");
        Ok(created)
    }

    /// Adds one vote per call. Repeated calls are all sent.
    pub async fn upvote(&self, id: &str) -> Result<Feedback, ApiError> {
        let path = feedback_path(id, Some("upvote"))?;
        self.http
            .send(ApiRequest::put(path))
            .await
            .map_err(|e| e.into_api_error("Failed to upvote"))
    }

    /// Move to any status; the backend decides who may.
    pub async fn update_status(&self, id: &str, status: FeedbackStatus) -> Result<Feedback, ApiError> {
        let path = feedback_path(id, Some("status"))?;
        self.http
            .send(
                ApiRequest::put(path)
                    .json(&StatusUpdate { status })
                    .map_err(|e| e.into_api_error("Failed to update status"))?,
            )
            .await
            .map_err(|e| e.into_api_error("Failed to update status"))
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let path = feedback_path(id, None)?;
        self.http
            .send_empty(ApiRequest::delete(path))
            .await
            .map_err(|e| e.into_api_error("Failed to delete feedback"))?;
        tracing::info!(id = %id, "Feedback deleted");
        Ok(())
    }
}
