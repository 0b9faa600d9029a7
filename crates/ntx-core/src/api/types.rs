use serde::{Deserialize, Serialize};

/// A note as returned by the service.
///
/// The server also sends `owner_id` and `created_at`; unknown fields are
/// ignored since the client has no use for them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl Note {
    /// Returns the content, or an empty string when the server sent none.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Payload for creating or updating a note.
#[derive(Debug, Clone, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: Option<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Returns true if the title is empty after trimming whitespace.
    pub fn title_is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// The authenticated user, as returned by `/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Request body for `/auth/register`.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response body from `/auth/token`. The `token_type` field is always
/// "bearer" and is not represented.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
