//! HTTP client for the car fuel REST API

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Server answered with a non-success status.
    #[error("Error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntryView {
    pub id: i64,
    pub liters: f64,
    pub price: f64,
    pub odometer: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarView {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub fuel_entries: Vec<FuelEntryView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelStatsView {
    pub total_fuel: f64,
    pub total_cost: f64,
    pub avg_consumption: f64,
    pub entries_count: u64,
}

#[derive(Serialize)]
struct CreateCarBody<'a> {
    brand: &'a str,
    model: &'a str,
    year: i32,
}

#[derive(Serialize)]
struct AddFuelBody {
    liters: f64,
    price: f64,
    odometer: i64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turns an error response body into the message shown to the user:
/// the JSON `message` field when present, otherwise the raw body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) => message,
        Ok(_) => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        expected: StatusCode,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response.json().await?)
    }

    /// `GET /api/cars` with a short timeout. Any answer below 500 means the
    /// server is up, even a client error.
    pub async fn is_reachable(&self) -> bool {
        match self
            .http
            .get(self.url("/api/cars"))
            .timeout(Duration::from_secs(2))
            .send()
            .await
        {
            Ok(response) => (200..500).contains(&response.status().as_u16()),
            Err(_) => false,
        }
    }

    pub async fn create_car(
        &self,
        brand: &str,
        model: &str,
        year: i32,
    ) -> Result<CarView, ClientError> {
        let response = self
            .http
            .post(self.url("/api/cars"))
            .json(&CreateCarBody { brand, model, year })
            .send()
            .await?;
        Self::decode(response, StatusCode::CREATED).await
    }

    pub async fn add_fuel(
        &self,
        car_id: i64,
        liters: f64,
        price: f64,
        odometer: i64,
    ) -> Result<CarView, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/api/cars/{}/fuel", car_id)))
            .json(&AddFuelBody {
                liters,
                price,
                odometer,
            })
            .send()
            .await?;
        Self::decode(response, StatusCode::OK).await
    }

    pub async fn fuel_stats(&self, car_id: i64) -> Result<FuelStatsView, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/cars/{}/fuel/stats", car_id)))
            .send()
            .await?;
        Self::decode(response, StatusCode::OK).await
    }

    pub async fn list_cars(&self) -> Result<Vec<CarView>, ClientError> {
        let response = self.http.get(self.url("/api/cars")).send().await?;
        Self::decode(response, StatusCode::OK).await
    }
}
