use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use carfuel::{create_api_router, ApiContext, CarRepository, FuelService, InMemoryCarStore};

fn create_test_app() -> Router {
    let store: Arc<dyn CarRepository> = Arc::new(InMemoryCarStore::new());
    let service = Arc::new(FuelService::new(store));
    create_api_router(ApiContext::new(service, None))
}

struct TestResponse {
    status: StatusCode,
    headers: axum::http::HeaderMap,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
    }
}

async fn create_corolla(app: &Router) -> i64 {
    let res = send(
        app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "Toyota", "model": "Corolla", "year": 2018})),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["id"].as_i64().unwrap()
}

fn assert_error(res: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(res.status, status, "body: {}", res.body);
    assert_eq!(res.body["status"], status.as_u16());
    assert_eq!(res.body["message"], message);
    assert!(res.body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_car_returns_201_with_empty_history() {
    let app = create_test_app();
    let res = send(
        &app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "Toyota", "model": "Corolla", "year": 2018})),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["id"], 1);
    assert_eq!(res.body["brand"], "Toyota");
    assert_eq!(res.body["model"], "Corolla");
    assert_eq!(res.body["year"], 2018);
    assert_eq!(res.body["fuelEntries"], json!([]));
    assert!(res.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_duplicate_car_is_conflict() {
    let app = create_test_app();
    create_corolla(&app).await;

    let res = send(
        &app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "toyota", "model": "COROLLA", "year": 2018})),
    )
    .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert!(res.body["message"]
        .as_str()
        .unwrap()
        .starts_with("Car already exists"));
}

#[tokio::test]
async fn test_create_car_validation_messages() {
    let app = create_test_app();

    let res = send(
        &app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "  ", "model": "Corolla", "year": 2018})),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "Brand is required");

    let res = send(
        &app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "Ford", "model": "T", "year": 1899})),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "Year must be at least 1900");

    let res = send(
        &app,
        Method::POST,
        "/api/cars",
        Some(json!({"brand": "Ford", "model": "T"})),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "Year is required");
}

#[tokio::test]
async fn test_malformed_json_and_wrong_content_type() {
    let app = create_test_app();

    let request = Request::post("/api/cars")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = send_request(&app, request).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "Malformed request body. Ensure valid JSON is sent.",
    );

    let request = Request::post("/api/cars")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"brand":"A","model":"B","year":2000}"#))
        .unwrap();
    let res = send_request(&app, request).await;
    assert_error(
        &res,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "Unsupported media type. Use application/json.",
    );
}

#[tokio::test]
async fn test_list_cars_sorted_by_id() {
    let app = create_test_app();

    let res = send(&app, Method::GET, "/api/cars", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));

    for (brand, model) in [("Toyota", "Corolla"), ("Honda", "Civic"), ("Mazda", "3")] {
        let res = send(
            &app,
            Method::POST,
            "/api/cars",
            Some(json!({"brand": brand, "model": model, "year": 2020})),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = send(&app, Method::GET, "/api/cars", None).await;
    let ids: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_car_not_found_and_bad_id() {
    let app = create_test_app();

    let res = send(&app, Method::GET, "/api/cars/999", None).await;
    assert_error(&res, StatusCode::NOT_FOUND, "Car not found with id: 999");

    let res = send(&app, Method::GET, "/api/cars/abc", None).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "Invalid parameter 'id': expected type integer but got 'abc'",
    );
}

#[tokio::test]
async fn test_fuel_flow_and_stats() {
    let app = create_test_app();
    let id = create_corolla(&app).await;

    let stats_uri = format!("/api/cars/{}/fuel/stats", id);
    let res = send(&app, Method::GET, &stats_uri, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({"totalFuel": 0.0, "totalCost": 0.0, "avgConsumption": 0.0, "entriesCount": 0})
    );

    let fuel_uri = format!("/api/cars/{}/fuel", id);
    let res = send(
        &app,
        Method::POST,
        &fuel_uri,
        Some(json!({"liters": 40.0, "price": 52.5, "odometer": 45000})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["fuelEntries"].as_array().unwrap().len(), 1);
    assert_eq!(res.body["fuelEntries"][0]["odometer"], 45000);

    let res = send(
        &app,
        Method::POST,
        &fuel_uri,
        Some(json!({"liters": 35.0, "price": 48.0, "odometer": 45500})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, Method::GET, &stats_uri, None).await;
    assert_eq!(res.body["totalFuel"], 75.0);
    assert_eq!(res.body["totalCost"], 100.5);
    assert_eq!(res.body["entriesCount"], 2);
    let avg = res.body["avgConsumption"].as_f64().unwrap();
    assert!((avg - 15.0).abs() < 1e-9, "avg = {}", avg);
}

#[tokio::test]
async fn test_decreasing_odometer_is_rejected() {
    let app = create_test_app();
    let id = create_corolla(&app).await;
    let fuel_uri = format!("/api/cars/{}/fuel", id);

    send(
        &app,
        Method::POST,
        &fuel_uri,
        Some(json!({"liters": 40.0, "price": 52.5, "odometer": 45000})),
    )
    .await;

    let res = send(
        &app,
        Method::POST,
        &fuel_uri,
        Some(json!({"liters": 30.0, "price": 40.0, "odometer": 44000})),
    )
    .await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "Invalid odometer reading: 44000 km. Cannot be less than previous reading: 45000 km",
    );

    let res = send(&app, Method::GET, &format!("/api/cars/{}", id), None).await;
    assert_eq!(res.body["fuelEntries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_fuel_validation_and_unknown_car() {
    let app = create_test_app();
    let id = create_corolla(&app).await;

    let res = send(
        &app,
        Method::POST,
        &format!("/api/cars/{}/fuel", id),
        Some(json!({"liters": 0, "price": 10.0, "odometer": 100})),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "Liters must be positive");

    let res = send(
        &app,
        Method::POST,
        &format!("/api/cars/{}/fuel", id),
        Some(json!({"liters": 10.0, "odometer": 100})),
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "Price is required");

    let res = send(
        &app,
        Method::POST,
        "/api/cars/42/fuel",
        Some(json!({"liters": 10.0, "price": 10.0, "odometer": 100})),
    )
    .await;
    assert_error(&res, StatusCode::NOT_FOUND, "Car not found with id: 42");
}

#[tokio::test]
async fn test_legacy_stats_endpoint() {
    let app = create_test_app();
    let id = create_corolla(&app).await;

    let res = send(
        &app,
        Method::GET,
        &format!("/servlet/fuel-stats?carId={}", id),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["entriesCount"], 0);

    let res = send(&app, Method::GET, "/servlet/fuel-stats", None).await;
    assert_error(
        &res,
        StatusCode::BAD_REQUEST,
        "carId query parameter is required",
    );

    let res = send(&app, Method::GET, "/servlet/fuel-stats?carId=abc", None).await;
    assert_error(&res, StatusCode::BAD_REQUEST, "carId must be a valid number");

    let res = send(
        &app,
        Method::GET,
        &format!("/servlet/fuel-stats?carId=%20{}%20", id),
        None,
    )
    .await;
    assert_error(&res, StatusCode::BAD_REQUEST, "carId must be a valid number");

    let res = send(&app, Method::GET, "/servlet/fuel-stats?carId=77", None).await;
    assert_error(&res, StatusCode::NOT_FOUND, "Car not found with id: 77");

    let res = send(&app, Method::POST, "/servlet/fuel-stats", None).await;
    assert_error(
        &res,
        StatusCode::METHOD_NOT_ALLOWED,
        "Only GET method is supported",
    );
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let app = create_test_app();

    let res = send(&app, Method::GET, "/api/trucks", None).await;
    assert_error(&res, StatusCode::NOT_FOUND, "Route GET /api/trucks not found.");

    let res = send(&app, Method::DELETE, "/api/cars", None).await;
    assert_error(
        &res,
        StatusCode::METHOD_NOT_ALLOWED,
        "Method DELETE not allowed for this endpoint.",
    );
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = create_test_app();
    create_corolla(&app).await;

    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["cars"], 1);
    assert!(res.headers.contains_key("x-request-id"));

    let request = Request::get("/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let res = send_request(&app, request).await;
    assert_eq!(res.headers["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_metrics_disabled_returns_404() {
    let app = create_test_app();
    let res = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
