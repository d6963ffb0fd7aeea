pub mod cars;

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::cars::{CarRepository, CarStore};

use crate::openapi::ApiDoc;

/// Shared handler state. The car store is the only state the service has.
#[derive(Clone)]
pub struct ServerState {
    pub cars: Arc<dyn CarRepository>,
}

impl ServerState {
    pub fn new(cars: Arc<dyn CarRepository>) -> Self {
        Self { cars }
    }

    /// Fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(CarStore::new())
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: car CRUD, health check and API docs
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let car_routes = Router::new()
        .route("/car", get(cars::list).post(cars::create))
        .route(
            "/car/:id",
            get(cars::get).patch(cars::update).delete(cars::delete),
        );

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(car_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
