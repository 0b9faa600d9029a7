use std::fmt;

use serde_json::Value;

/// Categories of API errors for consistent handling at the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Credential exchange rejected (bad credentials, duplicate registration)
    Auth,
    /// 401/403 on an authenticated call: the held token is no longer accepted
    AuthExpired,
    /// 404 for a note id
    NotFound,
    /// Any other non-2xx HTTP status
    HttpStatus,
    /// Transport failure (connect, timeout, request build)
    Network,
    /// Failed to parse a response body
    Parse,
    /// Client-side validation: empty note title, no request was issued
    EmptyTitle,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Auth => write!(f, "auth"),
            ApiErrorKind::AuthExpired => write!(f, "auth_expired"),
            ApiErrorKind::NotFound => write!(f, "not_found"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::EmptyTitle => write!(f, "empty_title"),
        }
    }
}

/// Structured error from the notes service with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub detail: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// Credential exchange rejection. Surfaces the server's `detail` field
    /// when the body carries one, else a generic HTTP-status message.
    pub fn auth(status: u16, body: &str) -> Self {
        let message = extract_detail(body)
            .unwrap_or_else(|| format!("Authentication failed (HTTP {status})"));
        Self {
            kind: ApiErrorKind::Auth,
            message,
            detail: non_empty(body),
        }
    }

    /// The held token was rejected with 401/403.
    pub fn auth_expired() -> Self {
        Self::new(ApiErrorKind::AuthExpired, "Session expired")
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, what)
    }

    /// Creates an HTTP status error, mining the body for the server's
    /// structured `detail` field.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = match extract_detail(body) {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            detail: non_empty(body),
        }
    }

    /// Classifies a reqwest transport error.
    pub fn network(e: &reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("Request timed out: {e}")
        } else if e.is_connect() {
            format!("Connection failed: {e}")
        } else {
            format!("Network error: {e}")
        };
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn parse(e: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Parse, format!("Failed to parse response: {e}"))
    }

    pub fn empty_title() -> Self {
        Self::new(ApiErrorKind::EmptyTitle, "Note title must not be empty")
    }

    /// Returns true if this error means the session must be discarded.
    pub fn is_auth_expired(&self) -> bool {
        self.kind == ApiErrorKind::AuthExpired
    }
}

/// Extracts the `detail` field from a JSON error body, if present.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("detail")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn non_empty(body: &str) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
