//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::{Method, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::FuelService;
use crate::interfaces::http::common::{ApiError, ErrorResponse};

use super::modules::cars::{self, CarsState};
use super::modules::health::{self, HealthState};
use super::modules::legacy_stats;
use super::modules::metrics::{self as http_metrics, http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;

/// Everything the HTTP layer needs. Each handler pulls its own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<FuelService>,
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

impl ApiContext {
    pub fn new(service: Arc<FuelService>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            service,
            metrics,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<ApiContext> for CarsState {
    fn from_ref(ctx: &ApiContext) -> Self {
        CarsState {
            service: Arc::clone(&ctx.service),
        }
    }
}

impl FromRef<ApiContext> for HealthState {
    fn from_ref(ctx: &ApiContext) -> Self {
        HealthState {
            service: Arc::clone(&ctx.service),
            started_at: Arc::clone(&ctx.started_at),
        }
    }
}

impl FromRef<ApiContext> for MetricsState {
    fn from_ref(ctx: &ApiContext) -> Self {
        MetricsState {
            handle: ctx.metrics.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cars::create_car,
        cars::list_cars,
        cars::get_car,
        cars::add_fuel,
        cars::get_fuel_stats,
        legacy_stats::legacy_fuel_stats,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            cars::CreateCarRequest,
            cars::AddFuelRequest,
            cars::CarResponse,
            cars::FuelEntryResponse,
            cars::FuelStatsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Cars", description = "Car registry"),
        (name = "Fuel", description = "Fuel entries and consumption statistics"),
    ),
    info(
        title = "Car Fuel Tracker API",
        version = "1.0.0",
        description = "REST API for recording refills and computing fuel consumption",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} {} not found.", method, uri.path()))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(format!(
        "Method {} not allowed for this endpoint.",
        method
    ))
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health and metrics
        .route("/health", get(health::health_check))
        .route("/metrics", get(http_metrics::prometheus_metrics))
        // Cars
        .route("/api/cars", get(cars::list_cars).post(cars::create_car))
        .route("/api/cars/{id}", get(cars::get_car))
        // Fuel
        .route("/api/cars/{id}/fuel", post(cars::add_fuel))
        .route("/api/cars/{id}/fuel/stats", get(cars::get_fuel_stats))
        // Legacy
        .route(
            "/servlet/fuel-stats",
            get(legacy_stats::legacy_fuel_stats).post(legacy_stats::legacy_fuel_stats_post),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(ctx)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
