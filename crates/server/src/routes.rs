//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/profiles/{username}", get(handlers::get_profile))
        .route(
            "/v1/profiles/{username}/visits",
            post(handlers::record_visit),
        )
        .route(
            "/v1/profiles/{username}/deactivate",
            post(handlers::deactivate_profile),
        )
        .route("/v1/documents/validate", post(handlers::validate_document));

    let mut router = Router::new().merge(api_routes);

    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
