use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use vehicle_maintenance::{
    build_app,
    config::{DatabaseConfig, EnvironmentConfig},
    database::DatabaseConnection,
    engine::IntervalTable,
    state::AppState,
};

async fn create_test_app() -> Router {
    let db = DatabaseConnection::new(&DatabaseConfig::in_memory())
        .await
        .expect("base de datos en memoria");
    let state = AppState::new(db.pool().clone(), EnvironmentConfig::testing(), IntervalTable::default());
    build_app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Registra un usuario y devuelve su token
async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "full_name": "Ana García",
            "email": email,
            "password": "secreto123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "secreto123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_vehicle(app: &Router, token: &str, vehicle_type: &str, plate: &str, distance: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/vehicles",
        Some(token),
        Some(json!({
            "brand": "Toyota",
            "model": "Corolla",
            "year": 2020,
            "license_plate": plate,
            "vehicle_type": vehicle_type,
            "current_distance": distance
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

fn item<'a>(items: &'a Value, maintenance_type: &str) -> &'a Value {
    items
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["maintenance_type"] == maintenance_type)
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_duplicate_and_bad_login() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;

    // El email se normaliza antes de comprobar duplicados
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "full_name": "Ana García",
            "email": "ANA@example.com",
            "password": "otraclave"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "incorrecta" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = create_test_app().await;

    let (status, _) = send(&app, Method::GET, "/api/vehicles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/vehicles", Some("no-es-un-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_vehicle_registration_creates_states() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;

    let car = create_vehicle(&app, &token, "car", "1234-abc", 10_000).await;
    let (status, items) = send(&app, Method::GET, &format!("/api/vehicles/{}/maintenance", car), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let items_arr = items.as_array().unwrap();
    assert_eq!(items_arr.len(), 8);
    assert!(items_arr.iter().all(|i| i["percentage"] == 100));
    assert!(items_arr.iter().all(|i| i["status"] == "excellent"));
    assert!(items_arr.iter().all(|i| i["maintenance_type"] != "chain"));
    assert_eq!(item(&items, "oil")["due_at_distance"], 15_000);

    let moto = create_vehicle(&app, &token, "motorcycle", "5678-XYZ", 0).await;
    let (_, items) = send(&app, Method::GET, &format!("/api/vehicles/{}/maintenance", moto), Some(&token), None).await;
    let items_arr = items.as_array().unwrap();
    assert_eq!(items_arr.len(), 8);
    assert!(items_arr.iter().all(|i| i["maintenance_type"] != "alignment"));
    assert_eq!(item(&items, "chain")["due_at_distance"], 10_000);

    // Matrícula normalizada: duplicada para el mismo usuario
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(json!({
            "brand": "Seat",
            "model": "Ibiza",
            "year": 2018,
            "license_plate": "1234-ABC",
            "vehicle_type": "car",
            "current_distance": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, list) = send(&app, Method::GET, "/api/vehicles", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_vehicle_is_rejected() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vehicles",
        Some(&token),
        Some(json!({
            "brand": "Toyota",
            "model": "Corolla",
            "year": 1850,
            "license_plate": "AB_1",
            "vehicle_type": "car",
            "current_distance": -5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_distance_update_and_notifications() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let car = create_vehicle(&app, &token, "car", "1234-ABC", 10_000).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}/distance", car),
        Some(&token),
        Some(json!({ "current_distance": 14_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicle"]["current_distance"], 14_000);
    assert_eq!(body["notifications_created"], 1);

    // Peor primero
    let oil = &body["maintenance"][0];
    assert_eq!(oil["maintenance_type"], "oil");
    assert_eq!(oil["percentage"], 20);
    assert_eq!(oil["status"], "critical");
    assert_eq!(oil["priority"], "high");
    assert_eq!(oil["remaining_distance"], 1_000);
    assert_eq!(item(&body["maintenance"], "air_filter")["percentage"], 73);

    // La misma lectura no duplica notificaciones
    let (_, body) = send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}/distance", car),
        Some(&token),
        Some(json!({ "current_distance": 14_000 })),
    )
    .await;
    assert_eq!(body["notifications_created"], 0);

    let (status, body) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unread"], 1);
    let notification = &body["notifications"][0];
    assert_eq!(notification["maintenance_type"], "oil");
    assert_eq!(notification["priority"], "high");
    assert_eq!(notification["percentage"], 20);
    assert_eq!(notification["is_read"], false);

    let (_, summary) = send(
        &app,
        Method::GET,
        &format!("/api/vehicles/{}/maintenance/summary", car),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(summary["total"], 8);
    assert_eq!(summary["critical"], 1);
    assert_eq!(summary["needs_attention"], 1);
    assert_eq!(summary["overall_percentage"], 20);
}

#[tokio::test]
async fn test_step_down_through_tiers() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let moto = create_vehicle(&app, &token, "motorcycle", "9999-MOT", 0).await;
    let uri = format!("/api/vehicles/{}/distance", moto);

    let (_, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "current_distance": 3_000 }))).await;
    assert_eq!(body["notifications_created"], 1);
    assert_eq!(item(&body["maintenance"], "oil")["status"], "upcoming");

    let (_, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "current_distance": 4_000 }))).await;
    assert_eq!(body["notifications_created"], 1);
    assert_eq!(item(&body["maintenance"], "oil")["status"], "critical");

    let (_, body) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    let priorities: Vec<&str> = body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["priority"].as_str().unwrap())
        .collect();
    assert_eq!(priorities, vec!["high", "medium"]);

    // Una lectura menor se acepta y recalcula
    let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "current_distance": 1_000 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item(&body["maintenance"], "oil")["percentage"], 80);
    assert_eq!(body["notifications_created"], 0);
}

#[tokio::test]
async fn test_complete_service_and_history() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let car = create_vehicle(&app, &token, "car", "1234-ABC", 10_000).await;

    send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}/distance", car),
        Some(&token),
        Some(json!({ "current_distance": 14_000 })),
    )
    .await;

    // Sin body: se usa el odómetro actual
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/vehicles/{}/maintenance/oil/complete", car),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["item"]["percentage"], 100);
    assert_eq!(body["item"]["due_at_distance"], 19_000);
    assert_eq!(body["record"]["distance_at_service"], 14_000);
    assert_eq!(body["current_distance"], 14_000);

    // Servicio más allá del odómetro: el vehículo avanza
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/vehicles/{}/maintenance/brakes/complete", car),
        Some(&token),
        Some(json!({ "distance_at_service": 16_000, "cost": 120.5, "notes": "pastillas delanteras" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_distance"], 16_000);
    assert_eq!(body["item"]["due_at_distance"], 46_000);

    let (_, items) = send(&app, Method::GET, &format!("/api/vehicles/{}/maintenance", car), Some(&token), None).await;
    assert_eq!(item(&items, "oil")["percentage"], 60);
    assert_eq!(item(&items, "brakes")["percentage"], 100);
    assert_eq!(item(&items, "air_filter")["percentage"], 60);

    let (status, history) = send(
        &app,
        Method::GET,
        &format!("/api/vehicles/{}/maintenance/history", car),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["maintenance_type"], "brakes");
    assert_eq!(history[0]["cost"], 120.5);
    assert_eq!(history[0]["notes"], "pastillas delanteras");
    assert_eq!(history[1]["maintenance_type"], "oil");
}

#[tokio::test]
async fn test_malformed_service_body_is_rejected() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let car = create_vehicle(&app, &token, "car", "1234-ABC", 10_000).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/vehicles/{}/maintenance/oil/complete", car),
        Some(&token),
        Some(json!({ "distance_at_service": "16000", "cost": 50.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nada se registra ni cambia
    let (_, history) = send(
        &app,
        Method::GET,
        &format!("/api/vehicles/{}/maintenance/history", car),
        Some(&token),
        None,
    )
    .await;
    assert!(history.as_array().unwrap().is_empty());

    let (_, items) = send(&app, Method::GET, &format!("/api/vehicles/{}/maintenance", car), Some(&token), None).await;
    assert_eq!(item(&items, "oil")["due_at_distance"], 15_000);

    let (_, vehicle) = send(&app, Method::GET, &format!("/api/vehicles/{}", car), Some(&token), None).await;
    assert_eq!(vehicle["current_distance"], 10_000);
}

#[tokio::test]
async fn test_complete_service_errors() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let car = create_vehicle(&app, &token, "car", "1234-ABC", 0).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/vehicles/{}/maintenance/turbo/complete", car),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Los coches no siguen la cadena
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/vehicles/{}/maintenance/chain/complete", car),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicles_are_scoped_to_owner() {
    let app = create_test_app().await;
    let ana = register_and_login(&app, "ana@example.com").await;
    let luis = register_and_login(&app, "luis@example.com").await;
    let car = create_vehicle(&app, &ana, "car", "1234-ABC", 0).await;

    let (status, _) = send(&app, Method::GET, &format!("/api/vehicles/{}", car), Some(&luis), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}/distance", car),
        Some(&luis),
        Some(json!({ "current_distance": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // La misma matrícula es válida para otro usuario
    create_vehicle(&app, &luis, "car", "1234-ABC", 0).await;
}

#[tokio::test]
async fn test_update_and_delete_vehicle() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let car = create_vehicle(&app, &token, "car", "1234-ABC", 10_000).await;
    create_vehicle(&app, &token, "car", "5678-XYZ", 0).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}", car),
        Some(&token),
        Some(json!({ "model": "Yaris", "license_plate": "4321 cba" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["model"], "Yaris");
    assert_eq!(body["data"]["license_plate"], "4321 CBA");
    assert_eq!(body["data"]["brand"], "Toyota");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}", car),
        Some(&token),
        Some(json!({ "license_plate": "5678-XYZ" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(
        &app,
        Method::PUT,
        &format!("/api/vehicles/{}/distance", car),
        Some(&token),
        Some(json!({ "current_distance": 14_000 })),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/vehicles/{}", car), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/vehicles/{}/maintenance", car), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Las notificaciones del vehículo se borran en cascada
    let (_, body) = send(&app, Method::GET, "/api/notifications/unread-count", Some(&token), None).await;
    assert_eq!(body["unread"], 0);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/vehicles/{}", car), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notification_read_flow() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "ana@example.com").await;
    let moto = create_vehicle(&app, &token, "motorcycle", "9999-MOT", 0).await;
    let uri = format!("/api/vehicles/{}/distance", moto);

    send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "current_distance": 3_000 }))).await;
    send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "current_distance": 4_000 }))).await;

    let (_, body) = send(&app, Method::GET, "/api/notifications/unread-count", Some(&token), None).await;
    assert_eq!(body["unread"], 2);

    let (_, body) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    let first = body["notifications"][0]["id"].as_str().unwrap().to_string();
    let second = body["notifications"][1]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/notifications/{}/read", first),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/notifications?unread_only=true", Some(&token), None).await;
    let unread = body["notifications"].as_array().unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["id"], second.as_str());

    let (status, body) = send(&app, Method::PUT, "/api/notifications/read-all", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/notifications/{}", first), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(body["notifications"].as_array().unwrap().len(), 1);
    assert_eq!(body["unread"], 0);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/notifications/{}", first), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
