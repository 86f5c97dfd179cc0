//! Axum router wiring (REST -> mutating operations).

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route(
            "/api/:model",
            post(http::create)
                .put(http::replace_or_create)
                .patch(http::patch_or_create),
        )
        .route("/api/:model/upsert", post(http::upsert))
        .route("/api/:model/update", post(http::update_all))
        .route("/api/:model/upsertWithWhere", post(http::upsert_with_where))
        .route(
            "/api/:model/:id",
            put(http::replace_by_id).patch(http::patch_attributes),
        )
        .route("/api/:model/:id/replace", post(http::replace_by_id))
        .route("/api/:model/:id/updateAttributes", post(http::update_attributes))
        .route("/api/:model/:id/:relation/:fk", put(http::update_related_by_id))
        .with_state(state)
}
