//! Document drafts: loading a detail into editors, applying edits, saving.

pub mod aggregator;
pub mod backend;
pub mod handlers;

use tracing::info;

pub use aggregator::{DraftAggregator, ResumeDraft, ResumeEdit, TurnOverDraft, TurnOverEdit};
pub use backend::{BackendError, DocumentKind, DraftBackend, MemoryBackend, RestBackend};

use crate::errors::AppError;

/// Fetches a detail document and splits it into a draft.
pub async fn fetch_draft<D: DraftAggregator>(
    backend: &dyn DraftBackend,
    id: i64,
) -> Result<D, AppError> {
    let raw = backend.fetch_detail(D::KIND, id).await?;
    let detail: D::Detail = serde_json::from_value(raw).map_err(BackendError::from)?;
    info!("Loaded {} {id} into a draft", D::KIND);
    Ok(D::load_from_detail(&detail))
}

/// Saves the whole draft. When the backend echoes the stored document the
/// draft is reloaded from it so assigned ids come back; otherwise the
/// submitted draft is returned as-is.
pub async fn save_draft<D: DraftAggregator>(
    backend: &dyn DraftBackend,
    draft: &D,
) -> Result<D, AppError> {
    let request = serde_json::to_value(draft.to_save_request()).map_err(BackendError::from)?;
    match backend.upsert(D::KIND, draft.document_id(), request).await? {
        Some(stored) => {
            let detail: D::Detail = serde_json::from_value(stored).map_err(BackendError::from)?;
            let saved = D::load_from_detail(&detail);
            info!("Saved {} {:?}", D::KIND, saved.document_id());
            Ok(saved)
        }
        None => Ok(draft.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::SectionEdit;
    use crate::models::resume::CareerField;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_then_fetch_returns_assigned_ids() {
        let backend = MemoryBackend::new();
        let draft = ResumeDraft::default()
            .seed_empty_sections()
            .apply(&ResumeEdit::Careers(SectionEdit::ChangeField {
                index: 0,
                field: CareerField::CompanyName,
                value: json!("Acme"),
            }));

        let saved: ResumeDraft = save_draft(&backend, &draft).await.unwrap();
        let id = saved.document_id().unwrap();
        let career = saved.careers.records().get(0).unwrap();
        assert!(career.id.is_some());
        assert_eq!(career.company_name, "Acme");

        let fetched: ResumeDraft = fetch_draft(&backend, id).await.unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_fetch_unknown_document_is_not_found() {
        let backend = MemoryBackend::new();
        let err = fetch_draft::<TurnOverDraft>(&backend, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
