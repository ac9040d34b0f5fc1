//! Axum route handlers for document drafts, shared by resumes and turn-over
//! journals through `DraftAggregator`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::draft::{fetch_draft, save_draft, DraftAggregator};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DraftQuery {
    /// Give empty sections one blank record before returning the draft.
    #[serde(default)]
    pub seed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "D: DraftAggregator"))]
pub struct EditDraftRequest<D: DraftAggregator> {
    pub draft: D,
    #[serde(default)]
    pub edits: Vec<D::Edit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/{resumes,turn-overs}/:id/draft
pub async fn handle_get_draft<D: DraftAggregator>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DraftQuery>,
) -> Result<Json<D>, AppError> {
    let draft: D = fetch_draft(state.backend.as_ref(), id).await?;
    let draft = if query.seed {
        draft.seed_empty_sections()
    } else {
        draft
    };
    Ok(Json(draft))
}

/// POST /api/v1/drafts/{resume,turn-over}/edit
/// Applies the edits in order and returns the resulting draft. Nothing is
/// persisted.
pub async fn handle_edit_draft<D: DraftAggregator>(
    Json(req): Json<EditDraftRequest<D>>,
) -> Json<D> {
    debug!("Applying {} edits to {} draft", req.edits.len(), D::KIND);
    let draft = req
        .edits
        .iter()
        .fold(req.draft, |draft, edit| draft.apply(edit));
    Json(draft)
}

/// POST /api/v1/drafts/{resume,turn-over}/save
pub async fn handle_save_draft<D: DraftAggregator>(
    State(state): State<AppState>,
    Json(draft): Json<D>,
) -> Result<Json<D>, AppError> {
    if draft.title().trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    let saved = save_draft(state.backend.as_ref(), &draft).await?;
    Ok(Json(saved))
}
