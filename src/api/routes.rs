use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Failure catalog
        .route(
            "/v1/failures",
            get(handlers::list_failures).post(handlers::create_failure),
        )
        .route("/v1/failures/:id", get(handlers::get_failure))
        .route("/v1/failures/:id/solutions", get(handlers::failure_solutions))
        // Solution catalog
        .route(
            "/v1/solutions",
            get(handlers::list_solutions).post(handlers::create_solution),
        )
        .route("/v1/solutions/:id", get(handlers::get_solution))
        // Combined search and aggregates
        .route("/v1/search", get(handlers::search))
        .route("/v1/overview", get(handlers::overview))
        .route("/v1/reports", get(handlers::reports))
        // Authentication proxy
        .route("/v1/auth/register", post(handlers::register))
        .route("/v1/auth/login", post(handlers::login))
        .route("/v1/auth/logout", post(handlers::logout))
        .route("/v1/auth/session", get(handlers::session))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
}
