pub mod fields;
pub mod health;
pub mod kandidat;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::submit;

/// GET /
async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../static/kandidatenformular.html"))
}

/// GET /test
async fn test_page() -> Html<&'static str> {
    Html(include_str!("../../static/test_form.html"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/test", get(test_page))
        .route("/health", get(health::health_handler))
        .route("/api/custom-fields", get(fields::handle_custom_fields))
        .route("/debug/cf-meta", get(fields::handle_cf_meta))
        .route("/api/kandidat/:id", get(kandidat::handle_get_kandidat))
        .route("/api/submit", post(submit::handle_submit))
        .with_state(state)
}
