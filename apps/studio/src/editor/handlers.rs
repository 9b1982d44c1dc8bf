use axum::{extract::State, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::editor::{DispatchOutcome, FormState, PrintJob, UiEvent};
use crate::errors::AppError;
use crate::models::Document;
use crate::notify::Notification;
use crate::render::{Preview, PreviewSection, Template};
use crate::state::AppState;

/// Download name for saved snapshots.
pub const SNAPSHOT_FILENAME: &str = "resume-data.json";

#[derive(Serialize)]
pub struct EventResponse {
    pub outcome: DispatchOutcome,
    /// The re-projected section the event touched.
    pub section: PreviewSection,
}

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub template: Template,
}

#[derive(Serialize)]
pub struct TemplateResponse {
    pub template: Template,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub visible: bool,
}

#[derive(Serialize)]
pub struct PrintResponse {
    #[serde(flatten)]
    pub job: PrintJob,
    pub notification: Notification,
}

#[derive(Serialize)]
pub struct SnapshotResponse {
    pub filename: &'static str,
    pub document: Document,
    pub notification: Notification,
}

#[derive(Serialize)]
pub struct LoadResponse {
    pub document: Document,
    pub notification: Notification,
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<Document> {
    let session = state.session.lock().await;
    Json(session.document().clone())
}

/// GET /api/v1/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormState> {
    let session = state.session.lock().await;
    Json(session.fields().clone())
}

/// GET /api/v1/preview
pub async fn handle_get_preview(State(state): State<AppState>) -> Json<Preview> {
    let session = state.session.lock().await;
    Json(session.preview().clone())
}

/// POST /api/v1/events
pub async fn handle_event(
    State(state): State<AppState>,
    Json(event): Json<UiEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let mut session = state.session.lock().await;
    let outcome = session.dispatch(event)?;
    let section = session
        .preview()
        .section(outcome.section)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("preview section {}", outcome.section)))?;
    Ok(Json(EventResponse { outcome, section }))
}

/// PUT /api/v1/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateRequest>,
) -> Json<TemplateResponse> {
    let mut session = state.session.lock().await;
    session.set_template(req.template);
    Json(TemplateResponse {
        template: session.template(),
    })
}

/// POST /api/v1/preview/toggle
pub async fn handle_toggle_preview(State(state): State<AppState>) -> Json<ToggleResponse> {
    let mut session = state.session.lock().await;
    Json(ToggleResponse {
        visible: session.toggle_preview(),
    })
}

/// POST /api/v1/print
///
/// The HTTP host's print pipeline is the client: it receives the job and
/// drives the browser's print dialog.
pub async fn handle_print(State(state): State<AppState>) -> Json<PrintResponse> {
    let mut session = state.session.lock().await;
    let job = session.print(PrintJob::clone);
    Json(PrintResponse {
        job,
        notification: Notification::success("Resume printed successfully!"),
    })
}

/// POST /api/v1/snapshot/save
///
/// Always returns the downloadable snapshot. A failed slot write only
/// downgrades the notification to a warning.
pub async fn handle_save_snapshot(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let (text, document) = {
        let mut session = state.session.lock().await;
        let text = session
            .snapshot()
            .map_err(|e| AppError::Internal(e.into()))?;
        (text, session.document().clone())
    };

    let notification = match state.store.save(&text).await {
        Ok(()) => {
            info!(store = state.store.backend(), bytes = text.len(), "snapshot saved");
            Notification::success("Resume saved successfully!")
        }
        Err(e) => {
            warn!(store = state.store.backend(), "snapshot slot write failed: {e}");
            Notification::warning("Resume downloaded, but it could not be kept for next time")
        }
    };

    Ok(Json(SnapshotResponse {
        filename: SNAPSHOT_FILENAME,
        document,
        notification,
    }))
}

/// POST /api/v1/snapshot/load
///
/// Body is the raw snapshot file. A malformed file leaves the session as it was.
pub async fn handle_load_snapshot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoadResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.load_snapshot(&body)?;
    Ok(Json(LoadResponse {
        document: session.document().clone(),
        notification: Notification::success("Resume loaded successfully!"),
    }))
}

/// POST /api/v1/snapshot/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Json<LoadResponse> {
    let mut session = state.session.lock().await;
    session.load(Document::sample());
    Json(LoadResponse {
        document: session.document().clone(),
        notification: Notification::success("Sample resume loaded"),
    })
}
