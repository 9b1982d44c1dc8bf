use axum::{
    extract::State,
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::editor::TextExport;
use crate::errors::AppError;
use crate::export::generate_document;
use crate::notify::Notification;
use crate::render::DocTree;
use crate::state::AppState;

/// Carries the success message alongside a file download.
pub const NOTIFICATION_HEADER: HeaderName = HeaderName::from_static("x-notification");

#[derive(Serialize)]
pub struct TextExportResponse {
    #[serde(flatten)]
    pub export: TextExport,
    pub notification: Notification,
}

/// GET /api/v1/export/text
pub async fn handle_export_text(State(state): State<AppState>) -> Json<TextExportResponse> {
    let export = state.session.lock().await.export_text();
    info!(filename = %export.filename, "plain text exported");
    Json(TextExportResponse {
        export,
        notification: Notification::success("Resume exported as text successfully!"),
    })
}

/// GET /api/v1/export/tree
pub async fn handle_export_tree(State(state): State<AppState>) -> Json<DocTree> {
    Json(state.session.lock().await.document_tree())
}

/// GET /api/v1/export/document
///
/// The session lock is released before the generator runs.
pub async fn handle_export_document(State(state): State<AppState>) -> Result<Response, AppError> {
    let (tree, name) = {
        let mut session = state.session.lock().await;
        let tree = session.document_tree();
        (tree, session.document().profile.name.clone())
    };

    let file = generate_document(state.generator.as_ref(), &tree, &name).await?;
    info!(
        filename = %file.filename,
        generator = state.generator.name(),
        bytes = file.bytes.len(),
        "document exported"
    );

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                NOTIFICATION_HEADER,
                "Resume exported successfully!".to_string(),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
