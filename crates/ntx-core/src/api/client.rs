use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

use super::errors::ApiError;
use super::types::{Note, NoteDraft, RegisterRequest, TokenResponse, User};
use crate::config::Config;
use crate::session::Session;

/// Client for the remote notes service.
///
/// Holds no token state: authenticated calls take the `Session` explicitly,
/// so the caller decides where the token lives and when it is discarded.
#[derive(Clone)]
pub struct NotesApi {
    base_url: String,
    http: reqwest::Client,
}

impl NotesApi {
    /// Creates a client from configuration (base URL, request timeout).
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.effective_base_url();
        url::Url::parse(&base_url)
            .with_context(|| format!("Invalid base_url in config: {base_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    /// Creates a client against a specific base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Credential exchange
    // ========================================================================

    /// Registers a new account. The caller follows up with `login`; a
    /// registration failure aborts before login is attempted.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest { email, password })
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        debug!(%status, "register");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::auth(status.as_u16(), &body));
        }

        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// The service speaks the OAuth2 password form: fields are named
    /// `username` and `password` even though the username is an email.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/auth/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let status = response.status();
        debug!(%status, "login");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::auth(status.as_u16(), &body));
        }

        let token: TokenResponse = response.json().await.map_err(|e| ApiError::parse(&e))?;
        Ok(Session::new(token.access_token))
    }

    // ========================================================================
    // Authenticated calls
    // ========================================================================

    /// Returns the authenticated user.
    pub async fn me(&self, session: &Session) -> Result<User, ApiError> {
        let url = format!("{}/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let response = check_status(response, None).await?;
        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Lists all notes, in server order.
    pub async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, ApiError> {
        let url = format!("{}/notes", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let response = check_status(response, None).await?;
        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Creates a note. A blank title is rejected locally without issuing a
    /// request; surfacing (or suppressing) that error is the caller's call.
    pub async fn create_note(
        &self,
        session: &Session,
        draft: &NoteDraft,
    ) -> Result<Note, ApiError> {
        if draft.title_is_blank() {
            return Err(ApiError::empty_title());
        }

        let url = format!("{}/notes", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(session.token())
            .json(draft)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let response = check_status(response, None).await?;
        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Fetches a single note by id.
    pub async fn get_note(&self, session: &Session, id: i64) -> Result<Note, ApiError> {
        let url = format!("{}/notes/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let response = check_status(response, Some(id)).await?;
        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Replaces a note's title and content.
    pub async fn update_note(
        &self,
        session: &Session,
        id: i64,
        draft: &NoteDraft,
    ) -> Result<Note, ApiError> {
        if draft.title_is_blank() {
            return Err(ApiError::empty_title());
        }

        let url = format!("{}/notes/{id}", self.base_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(session.token())
            .json(draft)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        let response = check_status(response, Some(id)).await?;
        response.json().await.map_err(|e| ApiError::parse(&e))
    }

    /// Deletes a note. Success is HTTP 204.
    pub async fn delete_note(&self, session: &Session, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/notes/{id}", self.base_url);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;

        check_status(response, Some(id)).await?;
        Ok(())
    }
}

/// Maps authenticated-call failures to the error taxonomy.
///
/// 401/403 always means the held token is no longer accepted, regardless of
/// which call it came from; 404 is only meaningful for per-id endpoints.
async fn check_status(
    response: reqwest::Response,
    note_id: Option<i64>,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        debug!(%status, "token rejected");
        return Err(ApiError::auth_expired());
    }

    if status == StatusCode::NOT_FOUND
        && let Some(id) = note_id
    {
        return Err(ApiError::not_found(format!("Note {id} not found")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::http_status(status.as_u16(), &body))
}
