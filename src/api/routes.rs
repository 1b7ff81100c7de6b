use crate::api::api_error::APIError;
use crate::api::model::{CheckAvailabilityRequest, CreateRecordsRequest, CreateRecordsResult};
use crate::api::server::AppState;
use crate::gateway::AvailabilityResult;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthcheck", get(health_check))
        .route("/api/check-availability", post(check_availability))
        .route("/api/create-records", post(create_records));
    let router = if state.config.allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn check_availability(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CheckAvailabilityRequest>, APIError>,
) -> Result<Json<AvailabilityResult>, APIError> {
    let result = state.gateway.check_availability(&payload.subdomain).await?;
    Ok(Json(result))
}

async fn create_records(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRecordsRequest>, APIError>,
) -> Result<Json<CreateRecordsResult>, APIError> {
    let result = state
        .gateway
        .create_records(&payload.subdomain, &payload.txt_value, &payload.a_value)
        .await?;
    Ok(Json(CreateRecordsResult {
        success: true,
        result,
    }))
}
