pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::editor::handlers;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session views
        .route("/api/v1/document", get(handlers::handle_get_document))
        .route("/api/v1/form", get(handlers::handle_get_form))
        .route("/api/v1/preview", get(handlers::handle_get_preview))
        // Editing
        .route("/api/v1/events", post(handlers::handle_event))
        .route("/api/v1/template", put(handlers::handle_set_template))
        .route(
            "/api/v1/preview/toggle",
            post(handlers::handle_toggle_preview),
        )
        .route("/api/v1/print", post(handlers::handle_print))
        // Snapshot slot
        .route(
            "/api/v1/snapshot/save",
            post(handlers::handle_save_snapshot),
        )
        .route(
            "/api/v1/snapshot/load",
            post(handlers::handle_load_snapshot),
        )
        .route(
            "/api/v1/snapshot/sample",
            post(handlers::handle_load_sample),
        )
        // Export
        .route("/api/v1/export/text", get(export::handle_export_text))
        .route("/api/v1/export/tree", get(export::handle_export_tree))
        .route(
            "/api/v1/export/document",
            get(export::handle_export_document),
        )
        .with_state(state)
}
