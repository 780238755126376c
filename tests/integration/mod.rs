//! Integration tests against a mocked backend

mod auth_flow;
mod feedback_flow;
mod session_teardown;
