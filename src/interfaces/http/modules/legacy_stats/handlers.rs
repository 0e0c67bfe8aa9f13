//! Query-string fuel statistics handler

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::CarId;
use crate::interfaces::http::common::{ApiError, ErrorResponse};
use crate::interfaces::http::modules::cars::{CarsState, FuelStatsResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LegacyStatsParams {
    /// Car id as text
    #[serde(rename = "carId")]
    pub car_id: Option<String>,
}

/// Parses the raw `carId` value.
///
/// Blank input counts as missing. Surrounding whitespace is not stripped
/// before parsing, so `" 7 "` is not a number.
pub fn parse_car_id(raw: Option<&str>) -> Result<CarId, ApiError> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("carId query parameter is required"))?;

    raw.parse::<CarId>()
        .map_err(|_| ApiError::bad_request("carId must be a valid number"))
}

#[utoipa::path(
    get,
    path = "/servlet/fuel-stats",
    tag = "Fuel",
    params(LegacyStatsParams),
    responses(
        (status = 200, description = "Fuel statistics", body = FuelStatsResponse),
        (status = 400, description = "carId missing or not a number", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
pub async fn legacy_fuel_stats(
    State(state): State<CarsState>,
    Query(params): Query<LegacyStatsParams>,
) -> Result<Json<FuelStatsResponse>, ApiError> {
    let car_id = parse_car_id(params.car_id.as_deref())?;
    tracing::info!(car_id, "Legacy stats request");

    let stats = state.service.calculate_stats(car_id).await?;
    Ok(Json(stats.into()))
}

/// `POST /servlet/fuel-stats` is always refused.
pub async fn legacy_fuel_stats_post() -> ApiError {
    ApiError::method_not_allowed("Only GET method is supported")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn missing_or_blank_car_id_is_required() {
        for raw in [None, Some(""), Some("   ")] {
            let err = parse_car_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "carId query parameter is required");
        }
    }

    #[test]
    fn non_numeric_car_id_is_rejected() {
        let err = parse_car_id(Some("abc")).unwrap_err();
        assert_eq!(err.message, "carId must be a valid number");
        assert!(parse_car_id(Some("1.5")).is_err());
    }

    #[test]
    fn padded_car_id_is_not_a_number() {
        for raw in [" 7 ", "7 ", " 7"] {
            let err = parse_car_id(Some(raw)).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "carId must be a valid number");
        }
    }

    #[test]
    fn numeric_car_id_parses() {
        assert_eq!(parse_car_id(Some("42")).unwrap(), 42);
        assert_eq!(parse_car_id(Some("-3")).unwrap(), -3);
    }
}
