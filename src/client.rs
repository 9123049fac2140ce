//! Client for the remote generation service.
//!
//! The service turns product photos (or a text prompt) into marketing
//! images. This module owns the wire plumbing only — the server's internals
//! are not our concern:
//!
//! | Call | Endpoint |
//! |---|---|
//! | [`ApiClient::generate`] | `POST /generate` (multipart) |
//! | [`ApiClient::generate_from_text`] | `POST /generate-from-text` (JSON) |
//! | [`ApiClient::generation_records`] | `GET /user/generation_records` |
//! | [`ApiClient::recent_chat_messages`] | `GET /history/recent-*-chat-messages` |
//!
//! # Session correlation
//!
//! The server threads a conversation through `session_id` values it mints on
//! first contact, one per mode (text vs image). That state lives in an
//! explicit [`SessionContext`] owned by the caller and passed to every call
//! — there are no ambient globals. Each generate call sends the current id
//! (if any) and stores the id the server returns.
//!
//! # Failure model
//!
//! One request, one report: no retries, no backoff. Batch callers loop over
//! items and keep going after an individual failure.

use crate::imaging::FilterParams;
use base64::Engine;
use reqwest::blocking::{Client, RequestBuilder, Response, multipart};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Generation can take a while on the server side; well past the default.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed image payload: {0}")]
    Artifact(String),
}

/// Per-conversation state, owned by the caller and passed to every call.
///
/// `token` authenticates the user (Bearer). The two session ids correlate
/// chat history server-side; they start empty and are filled in from the
/// first response in each mode.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub token: Option<String>,
    pub text_session: Option<String>,
    pub image_session: Option<String>,
}

impl SessionContext {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }
}

/// Options for an image-based generate call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub model: String,
    pub style: String,
    pub filters: FilterParams,
    pub description: Option<String>,
}

/// Options for a text-based generate call.
#[derive(Debug, Clone)]
pub struct TextOptions {
    pub prompt_type: String,
    pub image_size: String,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    prompt: &'a str,
    prompt_type: &'a str,
    image_size: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

/// Response from either generate endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Either a `data:image/...;base64,` payload or a fetchable URL.
    pub image_url: String,
    pub filename: Option<String>,
    pub prompt: Option<String>,
    pub session_id: Option<String>,
    /// True when the server fell back to local processing instead of the
    /// generation model.
    #[serde(default)]
    pub fallback: bool,
}

/// One entry from the user's generation history.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRecord {
    pub id: i64,
    pub image_url: String,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub style: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<GenerationRecord>,
}

/// One chat transcript entry (user prompt or system reply).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub session_id: Option<String>,
    pub message_type: String,
    pub content: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

/// Which chat transcript to fetch — the service keeps one per input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Text,
    Image,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth(&self, req: RequestBuilder, ctx: &SessionContext) -> RequestBuilder {
        match &ctx.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Upload a product photo and request a marketing image.
    ///
    /// Updates `ctx.image_session` from the response.
    pub fn generate(
        &self,
        ctx: &mut SessionContext,
        image: &Path,
        opts: &GenerateOptions,
    ) -> Result<GenerateResponse, ClientError> {
        let mut form = multipart::Form::new()
            .file("image", image)?
            .text("model", opts.model.clone())
            .text("style", opts.style.clone())
            .text("brightness", opts.filters.brightness().to_string())
            .text("contrast", opts.filters.contrast().to_string())
            .text("saturation", opts.filters.saturation().to_string());
        if let Some(description) = &opts.description {
            form = form.text("description", description.clone());
        }
        if let Some(session_id) = &ctx.image_session {
            form = form.text("session_id", session_id.clone());
        }

        log::debug!("POST /generate ({})", image.display());
        let response = self
            .auth(self.http.post(self.url("/generate")), ctx)
            .multipart(form)
            .send()?;
        let data: GenerateResponse = check(response)?.json()?;
        adopt_session(&mut ctx.image_session, &data);
        Ok(data)
    }

    /// Request a marketing image from a text prompt.
    ///
    /// Updates `ctx.text_session` from the response.
    pub fn generate_from_text(
        &self,
        ctx: &mut SessionContext,
        prompt: &str,
        opts: &TextOptions,
    ) -> Result<GenerateResponse, ClientError> {
        let body = TextRequest {
            prompt,
            prompt_type: &opts.prompt_type,
            image_size: &opts.image_size,
            session_id: ctx.text_session.as_deref(),
        };

        log::debug!("POST /generate-from-text");
        let response = self
            .auth(self.http.post(self.url("/generate-from-text")), ctx)
            .json(&body)
            .send()?;
        let data: GenerateResponse = check(response)?.json()?;
        adopt_session(&mut ctx.text_session, &data);
        Ok(data)
    }

    /// Fetch the user's generation history, newest first.
    pub fn generation_records(
        &self,
        ctx: &SessionContext,
        limit: u32,
    ) -> Result<Vec<GenerationRecord>, ClientError> {
        let response = self
            .auth(self.http.get(self.url("/user/generation_records")), ctx)
            .query(&[("limit", limit)])
            .send()?;
        let data: RecordsResponse = check(response)?.json()?;
        Ok(data.records)
    }

    /// Fetch the most recent chat messages for one input mode.
    pub fn recent_chat_messages(
        &self,
        ctx: &SessionContext,
        mode: ChatMode,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        let path = match mode {
            ChatMode::Text => "/history/recent-chat-messages",
            ChatMode::Image => "/history/recent-image-chat-messages",
        };
        let response = self
            .auth(self.http.get(self.url(path)), ctx)
            .query(&[("limit", limit)])
            .send()?;
        let data: MessagesResponse = check(response)?.json()?;
        Ok(data.messages)
    }

    /// Save a returned image to `dest`: decode a data URL in place, or fetch
    /// a plain URL.
    pub fn save_artifact(&self, image_url: &str, dest: &Path) -> Result<PathBuf, ClientError> {
        let bytes = if image_url.starts_with("data:") {
            decode_data_url(image_url)?
        } else {
            let response = self.http.get(image_url).send()?;
            check(response)?.bytes()?.to_vec()
        };
        std::fs::write(dest, bytes)?;
        Ok(dest.to_path_buf())
    }
}

/// Store the session id a generate response carries into one mode's slot.
/// A response without an id keeps whatever the context already holds.
fn adopt_session(slot: &mut Option<String>, response: &GenerateResponse) {
    if let Some(session_id) = &response.session_id {
        *slot = Some(session_id.clone());
    }
}

/// Map a non-2xx response to [`ClientError::Api`].
fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(api_error(status, &body))
}

/// Build the error for a non-2xx response: the server's `{"error": "..."}`
/// message when present, the raw body otherwise, the status line as a last
/// resort.
fn api_error(status: reqwest::StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ApiError>(body)
        .ok()
        .map(|e| e.error)
        .filter(|m| !m.is_empty())
        .or_else(|| Some(body.to_string()).filter(|m| !m.is_empty()))
        .unwrap_or_else(|| status.to_string());
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL into raw bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ClientError> {
    let payload = url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| ClientError::Artifact("expected a base64 data URL".to_string()))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| ClientError::Artifact(e.to_string()))
}

/// Reduce a server-provided filename to its final path component, so a
/// hostile or buggy response cannot steer the artifact outside the output
/// directory. Returns `None` when nothing usable is left (empty names,
/// `..`, a bare directory).
pub fn sanitize_filename(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// File extension implied by a data URL's mime type, defaulting to `png`.
pub fn data_url_extension(url: &str) -> &'static str {
    let mime = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("");
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}
