pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/letters/infer-recipient",
            post(handlers::handle_infer_recipient),
        )
        .route(
            "/api/v1/letters/generate",
            post(handlers::handle_generate_letter),
        )
        .with_state(state)
}
