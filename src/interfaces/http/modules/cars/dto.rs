//! Car and fuel DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{Car, FuelEntry, FuelStats};

fn non_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

fn validate_brand(value: &str) -> Result<(), ValidationError> {
    non_blank(value, "Brand is required")
}

fn validate_model(value: &str) -> Result<(), ValidationError> {
    non_blank(value, "Model is required")
}

/// `POST /api/cars` body. A missing brand or model deserializes to an empty
/// string and is reported the same way as a blank one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_brand"))]
    #[schema(example = "Toyota")]
    pub brand: String,
    #[serde(default)]
    #[validate(custom(function = "validate_model"))]
    #[schema(example = "Corolla")]
    pub model: String,
    #[validate(
        required(message = "Year is required"),
        range(min = 1900, message = "Year must be at least 1900")
    )]
    #[schema(example = 2018)]
    pub year: Option<i32>,
}

/// `POST /api/cars/{id}/fuel` body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddFuelRequest {
    #[validate(
        required(message = "Liters is required"),
        range(exclusive_min = 0.0, message = "Liters must be positive")
    )]
    #[schema(example = 40.0)]
    pub liters: Option<f64>,
    #[validate(
        required(message = "Price is required"),
        range(exclusive_min = 0.0, message = "Price must be positive")
    )]
    #[schema(example = 52.5)]
    pub price: Option<f64>,
    #[validate(
        required(message = "Odometer is required"),
        range(min = 0, message = "Odometer must be at least 0")
    )]
    #[schema(example = 45000)]
    pub odometer: Option<i64>,
}

impl AddFuelRequest {
    /// `(liters, price, odometer)` once every field is present.
    pub fn values(&self) -> Option<(f64, f64, i64)> {
        Some((self.liters?, self.price?, self.odometer?))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntryResponse {
    pub id: i64,
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<&FuelEntry> for FuelEntryResponse {
    fn from(e: &FuelEntry) -> Self {
        Self {
            id: e.id,
            liters: e.liters,
            price: e.price,
            odometer: e.odometer,
            timestamp: e.timestamp,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub fuel_entries: Vec<FuelEntryResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id.unwrap_or_default(),
            fuel_entries: c.fuel_entries.iter().map(FuelEntryResponse::from).collect(),
            brand: c.brand,
            model: c.model,
            year: c.year,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelStatsResponse {
    pub total_fuel: f64,
    pub total_cost: f64,
    /// Liters per 100 km, 0 when fewer than two entries or no distance
    pub avg_consumption: f64,
    pub entries_count: usize,
}

impl From<FuelStats> for FuelStatsResponse {
    fn from(s: FuelStats) -> Self {
        Self {
            total_fuel: s.total_fuel,
            total_cost: s.total_cost,
            avg_consumption: s.avg_consumption,
            entries_count: s.entries_count,
        }
    }
}
