pub mod dashboard;
pub mod health;


use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::jobs::handlers;
use crate::state::AppState;
use crate::uploads::handlers as uploads;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(dashboard::handle_dashboard))
        .route(
            "/templates",
            get(uploads::handle_templates_page).post(uploads::handle_template_upload),
        )
        .route(
            "/add-job",
            get(handlers::handle_add_job_form).post(handlers::handle_add_job),
        )
        .route("/apply-job", get(handlers::handle_apply_job_list))
        .route("/apply-job/:job_id", get(handlers::handle_apply_job_detail))
        .route(
            "/status",
            get(handlers::handle_status_page).post(handlers::handle_status_update),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
