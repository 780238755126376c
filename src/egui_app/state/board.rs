use crate::shared::{Feedback, FeedbackStatus};

/// Local state of one feedback board instance.
///
/// The list is always replaced wholesale by the latest fetch.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub feedbacks: Vec<Feedback>,
    pub title_input: String,
    pub description_input: String,
    pub status_input: FeedbackStatus,
    pub loading: bool,
    /// Set after the first successful fetch
    pub loaded: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Feedback awaiting delete confirmation
    pub pending_delete: Option<String>,
    in_flight: usize,
    issued: u64,
    /// Request whose list is on screen
    applied: u64,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.success = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn dismiss_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Register a new request; returns its sequence number.
    pub fn begin_request(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        self.loading = true;
        self.issued
    }

    /// `loading` stays set while any other request is outstanding.
    pub fn finish_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    /// Show the list fetched by `request` unless a newer one is already
    /// displayed. Returns whether it was applied.
    pub fn apply_snapshot(&mut self, request: u64, feedbacks: Vec<Feedback>) -> bool {
        if request < self.applied {
            return false;
        }
        self.applied = request;
        self.replace_feedbacks(feedbacks);
        true
    }

    pub fn replace_feedbacks(&mut self, feedbacks: Vec<Feedback>) {
        self.feedbacks = feedbacks;
        self.loaded = true;
    }

    pub fn clear_form(&mut self) {
        self.title_input.clear();
        self.description_input.clear();
        self.status_input = FeedbackStatus::Pending;
    }

    pub fn form_is_complete(&self) -> bool {
        !self.title_input.trim().is_empty() && !self.description_input.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded && self.feedbacks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Feedback> {
        self.feedbacks.iter().find(|f| f.id == id)
    }
}
