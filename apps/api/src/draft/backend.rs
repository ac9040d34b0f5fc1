//! Persistence backend for detail documents.
//!
//! `RestBackend` talks to the document service over HTTP. `MemoryBackend`
//! keeps documents in process and is used for local runs and tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// First backoff delay; doubles on every further retry.
const BASE_BACKOFF: Duration = Duration::from_millis(250);
/// Backoff stops growing after this many doublings.
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    Resume,
    TurnOver,
}

impl DocumentKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resumes",
            DocumentKind::TurnOver => "turn-overs",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => write!(f, "resume"),
            DocumentKind::TurnOver => write!(f, "turn-over"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: DocumentKind, id: i64 },

    #[error("Backend rejected the document (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Fetches and upserts raw detail documents.
///
/// `upsert` returns the stored document when the backend echoes one back,
/// and `None` when it only acknowledges the write.
#[async_trait]
pub trait DraftBackend: Send + Sync {
    async fn fetch_detail(&self, kind: DocumentKind, id: i64) -> Result<Value, BackendError>;

    async fn upsert(
        &self,
        kind: DocumentKind,
        id: Option<i64>,
        request: Value,
    ) -> Result<Option<Value>, BackendError>;
}

// ────────────────────────────────────────────────────────────────────────────
// REST
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct FlatError {
    message: String,
}

/// Pulls a human-readable message out of an error body, accepting both
/// `{"error": {"message": ..}}` and `{"message": ..}`.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    if let Ok(flat) = serde_json::from_str::<FlatError>(body) {
        return flat.message;
    }
    body.to_string()
}

/// Delay before retry number `retry` (1-based): the base doubled per
/// earlier retry, capped.
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let doublings = retry.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
    base.saturating_mul(1u32 << doublings)
}

#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
}

impl RestBackend {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries,
            backoff: BASE_BACKOFF,
        })
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn document_url(&self, kind: DocumentKind, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, kind.path_segment(), id),
            None => format!("{}/{}", self.base_url, kind.path_segment()),
        }
    }

    /// Sends a request, retrying transport failures and 5xx responses up to
    /// `max_retries` times with exponential backoff. Non-idempotent requests
    /// are sent once.
    async fn send(
        &self,
        build: impl Fn() -> RequestBuilder,
        idempotent: bool,
    ) -> Result<Response, BackendError> {
        let retries = if idempotent { self.max_retries } else { 0 };
        let mut retry = 0;

        loop {
            let error = match build().send().await {
                Ok(response) if response.status().is_server_error() => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    warn!("Backend returned {}: {}", status, body);
                    BackendError::Api {
                        status: status.as_u16(),
                        message: error_message(&body),
                    }
                }
                Ok(response) => return Ok(response),
                Err(e) => BackendError::Http(e),
            };

            if retry >= retries {
                return Err(error);
            }
            retry += 1;
            let delay = backoff_delay(self.backoff, retry);
            warn!(
                "Backend call failed ({error}), retry {}/{} after {}ms...",
                retry,
                retries,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn client_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::Rejected {
            status,
            message: error_message(&body),
        }
    }
}

#[async_trait]
impl DraftBackend for RestBackend {
    async fn fetch_detail(&self, kind: DocumentKind, id: i64) -> Result<Value, BackendError> {
        let url = self.document_url(kind, Some(id));
        let response = self.send(|| self.client.get(&url), true).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound { kind, id }),
            s if s.is_success() => {
                let detail: Value = response.json().await?;
                debug!("Fetched {kind} {id}");
                Ok(detail)
            }
            _ => Err(Self::client_error(response).await),
        }
    }

    async fn upsert(
        &self,
        kind: DocumentKind,
        id: Option<i64>,
        request: Value,
    ) -> Result<Option<Value>, BackendError> {
        let url = self.document_url(kind, id);
        // PUT replaces a known document and is safe to repeat; POST creates one.
        let response = match id {
            Some(_) => self.send(|| self.client.put(&url).json(&request), true).await?,
            None => self.send(|| self.client.post(&url).json(&request), false).await?,
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound {
                kind,
                id: id.unwrap_or_default(),
            });
        }
        if !status.is_success() {
            return Err(Self::client_error(response).await);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            info!("Saved {kind} {:?} (no document echoed)", id);
            return Ok(None);
        }
        let stored: Value = serde_json::from_str(&body)?;
        info!("Saved {kind} {:?}", stored.get("id"));
        Ok(Some(stored))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Document store held in process. Assigns document ids on create and record
/// ids to any section record saved without one.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<(DocumentKind, i64), Value>>,
    last_id: AtomicI64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Walks every array in the document and numbers records lacking an id.
    fn assign_record_ids(&self, value: &mut Value) {
        let Value::Object(map) = value else {
            return;
        };
        for field in map.values_mut() {
            let Value::Array(records) = field else {
                continue;
            };
            for record in records.iter_mut() {
                if let Value::Object(object) = record {
                    if object.get("id").map_or(true, Value::is_null) {
                        object.insert("id".into(), Value::from(self.next_id()));
                    }
                }
                self.assign_record_ids(record);
            }
        }
    }
}

#[async_trait]
impl DraftBackend for MemoryBackend {
    async fn fetch_detail(&self, kind: DocumentKind, id: i64) -> Result<Value, BackendError> {
        self.documents
            .read()
            .await
            .get(&(kind, id))
            .cloned()
            .ok_or(BackendError::NotFound { kind, id })
    }

    async fn upsert(
        &self,
        kind: DocumentKind,
        id: Option<i64>,
        request: Value,
    ) -> Result<Option<Value>, BackendError> {
        let Value::Object(_) = request else {
            return Err(BackendError::Rejected {
                status: 400,
                message: "document must be a JSON object".to_string(),
            });
        };

        let mut documents = self.documents.write().await;
        let id = match id {
            Some(id) if documents.contains_key(&(kind, id)) => id,
            Some(id) => return Err(BackendError::NotFound { kind, id }),
            None => self.next_id(),
        };

        let mut stored = request;
        self.assign_record_ids(&mut stored);
        if let Value::Object(map) = &mut stored {
            map.insert("id".into(), Value::from(id));
            map.insert(
                "updatedAt".into(),
                Value::from(chrono::Utc::now().timestamp_millis()),
            );
        }
        documents.insert((kind, id), stored.clone());
        debug!("Stored {kind} {id} in memory");
        Ok(Some(stored))
    }
}
