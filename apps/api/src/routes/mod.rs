pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::codec::handlers as codec_handlers;
use crate::draft::handlers;
use crate::draft::{ResumeDraft, TurnOverDraft};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume drafts
        .route(
            "/api/v1/resumes/:id/draft",
            get(handlers::handle_get_draft::<ResumeDraft>),
        )
        .route(
            "/api/v1/drafts/resume/edit",
            post(handlers::handle_edit_draft::<ResumeDraft>),
        )
        .route(
            "/api/v1/drafts/resume/save",
            post(handlers::handle_save_draft::<ResumeDraft>),
        )
        // Turn-over journal drafts
        .route(
            "/api/v1/turn-overs/:id/draft",
            get(handlers::handle_get_draft::<TurnOverDraft>),
        )
        .route(
            "/api/v1/drafts/turn-over/edit",
            post(handlers::handle_edit_draft::<TurnOverDraft>),
        )
        .route(
            "/api/v1/drafts/turn-over/save",
            post(handlers::handle_save_draft::<TurnOverDraft>),
        )
        // Attachments
        .route(
            "/api/v1/attachments/encode",
            post(codec_handlers::handle_encode_attachment),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::draft::MemoryBackend;

    fn app() -> Router {
        build_router(AppState {
            backend: Arc::new(MemoryBackend::new()),
            config: Config::default(),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_edit_applies_edits_in_order() {
        let request = post_json(
            "/api/v1/drafts/resume/edit",
            json!({
                "draft": {"title": "Backend", "careers": [{"companyName": "Acme", "priority": 4}]},
                "edits": [
                    {"section": "careers", "edit": {"op": "add"}},
                    {"section": "careers", "edit": {"op": "changeField", "index": 1, "field": "startedAt", "value": "2019-03-02"}},
                    {"section": "careers", "edit": {"op": "move", "from": 1, "to": 0}},
                    {"section": "careers", "edit": {"op": "changeField", "index": 9, "field": "companyName", "value": "ghost"}}
                ]
            }),
        );
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let careers = body["careers"].as_array().unwrap();
        assert_eq!(careers.len(), 2);
        assert_eq!(careers[0]["startedAt"], 1_551_484_800_000_i64);
        assert_eq!(careers[0]["priority"], 0);
        assert_eq!(careers[1]["companyName"], "Acme");
        assert_eq!(careers[1]["priority"], 1);
    }

    #[tokio::test]
    async fn test_edit_accepts_draft_with_unknown_code() {
        let request = post_json(
            "/api/v1/drafts/resume/edit",
            json!({
                "draft": {"title": "Backend", "careers": [{"companyName": "Acme", "employmentType": "GIG"}]},
                "edits": [
                    {"section": "careers", "edit": {"op": "changeField", "index": 0, "field": "position", "value": "SRE"}}
                ]
            }),
        );
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["careers"][0]["employmentType"], Value::Null);
        assert_eq!(body["careers"][0]["position"], "SRE");
    }

    #[tokio::test]
    async fn test_save_rejects_blank_title() {
        let (status, body) = send(
            &app(),
            post_json("/api/v1/drafts/resume/save", json!({"title": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_save_then_load_resume_draft() {
        let app = app();
        let (status, saved) = send(
            &app,
            post_json(
                "/api/v1/drafts/resume/save",
                json!({
                    "title": "Backend",
                    "careers": [{"companyName": "Acme"}],
                    "languageSkills": [{"language": "English", "languageTests": [{"testName": "TOEIC"}]}]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = saved["id"].as_i64().unwrap();
        assert!(saved["careers"][0]["id"].is_i64());
        assert!(saved["languageSkills"][0]["languageTests"][0]["id"].is_i64());

        let (status, loaded) = send(&app, get(&format!("/api/v1/resumes/{id}/draft"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded, saved);
        assert_eq!(loaded["educations"], json!([]));

        let (_, seeded) = send(&app, get(&format!("/api/v1/resumes/{id}/draft?seed=true"))).await;
        assert_eq!(seeded["educations"].as_array().unwrap().len(), 1);
        assert_eq!(seeded["attachments"][0]["category"], "FILE");
        assert_eq!(seeded["careers"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_draft_is_not_found() {
        let (status, body) = send(&app(), get("/api/v1/turn-overs/404/draft")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_turn_over_nested_edit_isolated() {
        let request = post_json(
            "/api/v1/drafts/turn-over/edit",
            json!({
                "draft": {
                    "title": "2025",
                    "jobApplications": [
                        {"companyName": "Acme", "applicationStages": [{"process": "DOCUMENT"}]},
                        {"companyName": "Initech", "applicationStages": [{"process": "DOCUMENT"}]}
                    ]
                },
                "edits": [
                    {"section": "jobApplications", "edit": {"op": "addChild", "parentIndex": 0}},
                    {"section": "jobApplications", "edit": {"op": "changeChildField", "parentIndex": 0, "childIndex": 1, "field": "process", "value": "INTERVIEW"}},
                    {"section": "header", "edit": {"field": "isFinished", "value": "yes"}}
                ]
            }),
        );
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let apps = body["jobApplications"].as_array().unwrap();
        assert_eq!(apps[0]["applicationStages"][1]["process"], "INTERVIEW");
        assert_eq!(apps[0]["applicationStages"][1]["priority"], 1);
        assert_eq!(apps[1]["applicationStages"].as_array().unwrap().len(), 1);
        assert_eq!(body["isFinished"], true);
    }

    #[tokio::test]
    async fn test_encode_attachment_multipart() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/attachments/encode")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fileName"], "cv.pdf");
        assert_eq!(body["fileData"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_encode_attachment_requires_file_part() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"fileName\"\r\n\r\n\
             cv.pdf\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/attachments/encode")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, _) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
