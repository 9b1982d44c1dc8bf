use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::EditError;
use crate::export::GenerateError;
use crate::models::SnapshotError;
use crate::notify::Notification;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every error body also carries a notification for the UI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[from] SnapshotError),

    #[error("Edit rejected: {0}")]
    Edit(#[from] EditError),

    #[error("Export failed: {0}")]
    Export(#[from] GenerateError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::MalformedSnapshot(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_SNAPSHOT",
                format!("Invalid resume data file: {e}"),
            ),
            AppError::Edit(e @ EditError::UnknownEntry { .. }) => {
                (StatusCode::NOT_FOUND, "UNKNOWN_ENTRY", e.to_string())
            }
            AppError::Edit(e) => (StatusCode::BAD_REQUEST, "EDIT_REJECTED", e.to_string()),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            },
            "notification": Notification::error(message.clone())
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::EntryId;
    use crate::models::Section;

    #[test]
    fn test_unknown_entry_maps_to_not_found() {
        let err = AppError::from(EditError::UnknownEntry {
            section: Section::Experience,
            id: EntryId::new(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_snapshot_is_unprocessable() {
        let err = AppError::from(SnapshotError::NotAnObject("array"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_photo_disabled_is_bad_request() {
        let err = AppError::from(EditError::PhotoDisabled);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
