use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{errors::JsonApiError, middleware, openapi::ApiDoc, state::AppState};

pub mod accounts;
pub mod meta;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> JsonApiError {
    accounts::url_not_found()
}

/// Build the full application router with CORS, security headers and request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(meta::index).fallback(accounts::method_not_allowed))
        .route("/health", get(meta::health).fallback(accounts::method_not_allowed))
        .route("/api-docs/openapi.json", get(openapi_json));

    let account_routes = Router::new()
        .route(
            "/accounts",
            get(accounts::list)
                .post(accounts::create)
                .fallback(accounts::method_not_allowed),
        )
        .route(
            "/accounts/:id",
            get(accounts::read)
                .put(accounts::update)
                .delete(accounts::delete)
                .fallback(accounts::method_not_allowed),
        );

    let router = public
        .merge(account_routes)
        .fallback(not_found)
        .with_state(state);

    middleware::with_security_headers(router)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
