//! JSON payloads shaped like the backend's responses

use serde_json::{json, Value};

pub const TOKEN: &str = "test-token-abc";

pub fn user_json(id: &str, username: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "phone": "555-0100",
        "role": role,
    })
}

pub fn auth_json(id: &str, username: &str, role: &str) -> Value {
    json!({
        "token": TOKEN,
        "user": user_json(id, username, role),
    })
}

pub fn feedback_json(id: &str, title: &str, status: &str, upvotes: u64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("{} description", title),
        "status": status,
        "upvotes": upvotes,
        "user": { "_id": "u1", "username": "alice" },
        "createdAt": "2024-05-01T12:00:00.000Z",
    })
}
