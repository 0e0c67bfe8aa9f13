//! Car registry and fuel log handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{AddFuelRequest, CarResponse, CreateCarRequest, FuelStatsResponse};
use crate::application::FuelService;
use crate::domain::CarId;
use crate::interfaces::http::common::{ApiError, ApiPath, ErrorResponse, ValidatedJson};

/// Car handler state
#[derive(Clone)]
pub struct CarsState {
    pub service: Arc<FuelService>,
}

#[utoipa::path(
    post,
    path = "/api/cars",
    tag = "Cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Car with same brand, model and year exists", body = ErrorResponse)
    )
)]
pub async fn create_car(
    State(state): State<CarsState>,
    ValidatedJson(body): ValidatedJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let year = body
        .year
        .ok_or_else(|| ApiError::bad_request("Year is required"))?;

    let car = state
        .service
        .create_car(&body.brand, &body.model, year)
        .await?;

    Ok((StatusCode::CREATED, Json(car.into())))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    tag = "Cars",
    responses(
        (status = 200, description = "All cars ordered by id", body = Vec<CarResponse>)
    )
)]
pub async fn list_cars(State(state): State<CarsState>) -> Json<Vec<CarResponse>> {
    let mut cars = state.service.get_all_cars().await;
    cars.sort_by_key(|c| c.id);
    Json(cars.into_iter().map(CarResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car with its fuel entries", body = CarResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
pub async fn get_car(
    State(state): State<CarsState>,
    ApiPath(id): ApiPath<CarId>,
) -> Result<Json<CarResponse>, ApiError> {
    let car = state.service.get_car_by_id(id).await?;
    Ok(Json(car.into()))
}

#[utoipa::path(
    post,
    path = "/api/cars/{id}/fuel",
    tag = "Fuel",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = AddFuelRequest,
    responses(
        (status = 200, description = "Fuel entry added, updated car returned", body = CarResponse),
        (status = 400, description = "Validation failed or odometer went backwards", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
pub async fn add_fuel(
    State(state): State<CarsState>,
    ApiPath(id): ApiPath<CarId>,
    ValidatedJson(body): ValidatedJson<AddFuelRequest>,
) -> Result<Json<CarResponse>, ApiError> {
    let (liters, price, odometer) = body
        .values()
        .ok_or_else(|| ApiError::bad_request("Validation failed"))?;

    let car = state
        .service
        .add_fuel_entry(id, liters, price, odometer)
        .await?;

    Ok(Json(car.into()))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}/fuel/stats",
    tag = "Fuel",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Fuel statistics", body = FuelStatsResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
pub async fn get_fuel_stats(
    State(state): State<CarsState>,
    ApiPath(id): ApiPath<CarId>,
) -> Result<Json<FuelStatsResponse>, ApiError> {
    let stats = state.service.calculate_stats(id).await?;
    Ok(Json(stats.into()))
}
