use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use rpm_auto::config::environment::EnvironmentConfig;
use rpm_auto::controllers::auth_controller::ensure_admin_user;
use rpm_auto::repositories::{MemStorage, Storage};
use rpm_auto::routes::create_api_router;
use rpm_auto::services::LogMailer;
use rpm_auto::state::AppState;

// ===== Health =====

#[tokio::test]
async fn test_health_check() {
    let app = build_app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "rpm-auto-backend");
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

// ===== Vehículos =====

#[tokio::test]
async fn test_default_listing_hides_non_available() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456")).await;

    let mut sold = sample_vehicle("BMW", "M5", 89900, "Sedans", "WBSJF0C59KB123456");
    sold["status"] = json!("sold");
    create_vehicle(&app, &sold).await;

    let (status, body) = send(&app, get("/api/vehicles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/vehicles?includeAll=true")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    // Un filtro de estado explícito siempre gana
    let (_, body) = send(&app, get("/api/vehicles?status=sold")).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["make"], "BMW");
}

#[tokio::test]
async fn test_paginated_listing_envelope() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456")).await;
    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 249900, "Grand Tourers", "SCBCE9ZA5MC123456")).await;

    let (status, body) = send(&app, get("/api/vehicles?paginated=true&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    // El total cuenta todas las filas filtradas, no la página
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);

    let (_, body) = send(&app, get("/api/vehicles?paginated=true&limit=2&page=2")).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["page"], 2);

    // page/limit inválidos caen a los valores por defecto (1 / 10)
    let (_, body) = send(&app, get("/api/vehicles?paginated=true&page=abc&limit=-5")).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_invalid_vehicle_id_is_rejected() {
    let app = build_app();
    let (status, body) = send(&app, get("/api/vehicles/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid vehicle ID");
}

#[tokio::test]
async fn test_unknown_vehicle_returns_404() {
    let app = build_app();
    let (status, body) = send(&app, get("/api/vehicles/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle not found");
}

#[tokio::test]
async fn test_duplicate_vin_is_a_conflict() {
    let app = build_app();
    let vehicle = sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456");
    create_vehicle(&app, &vehicle).await;

    let second = sample_vehicle("Porsche", "Cayman", 99900, "Sports Cars", "WP0AA2A99PS123456");
    let (status, body) = send(&app, json_request(Method::POST, "/api/vehicles", &second)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("WP0AA2A99PS123456"));
}

#[tokio::test]
async fn test_vehicle_validation_failure() {
    let app = build_app();
    let mut vehicle = sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456");
    vehicle["make"] = json!("   ");
    vehicle["year"] = json!(1500);

    let (status, body) = send(&app, json_request(Method::POST, "/api/vehicles", &vehicle)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].is_object());
}

#[tokio::test]
async fn test_search_requires_query_and_matches_case_insensitively() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911 GT3", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query is required");

    let (status, body) = send(&app, get("/api/vehicles/search?q=porsche")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["make"], "Porsche");
}

#[tokio::test]
async fn test_filter_endpoint_requires_a_filter() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/filter")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "At least one filter parameter is required");

    // Los parámetros desconocidos se ignoran sin error
    let (status, _) = send(&app, get("/api/vehicles/filter?unknown=x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/vehicles/filter?make=Porsche")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, get("/api/vehicles/filter?minPrice=200000")).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["make"], "Ferrari");
}

#[tokio::test]
async fn test_category_slug_matches_stored_label() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 249900, "Grand Tourers", "SCBCE9ZA5MC123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/category/sports-cars")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "Sports Cars");
}

#[tokio::test]
async fn test_sort_desc_breaks_ties_by_id_ascending() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 50000, "Grand Tourers", "SCBCE9ZA5MC123456")).await;
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 100000, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 100000, "Sports Cars", "ZFF92LLA9M0123456")).await;

    let (status, body) = send(&app, get("/api/vehicles?sort=price&direction=desc")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_related_excludes_base_vehicle() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;
    create_vehicle(&app, &sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456")).await;
    create_vehicle(&app, &sample_vehicle("Lamborghini", "Huracan", 329900, "Sports Cars", "ZHWUF4ZF5LLA12345")).await;
    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 249900, "Grand Tourers", "SCBCE9ZA5MC123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/1/related")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);

    let (_, body) = send(&app, get("/api/vehicles/1/related?limit=1")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_featured_endpoint_excludes_sold() {
    let app = build_app();
    let mut featured = sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456");
    featured["isFeatured"] = json!(true);
    create_vehicle(&app, &featured).await;

    let mut featured_sold = sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456");
    featured_sold["isFeatured"] = json!(true);
    featured_sold["status"] = json!("sold");
    create_vehicle(&app, &featured_sold).await;

    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 249900, "Grand Tourers", "SCBCE9ZA5MC123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/featured")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["make"], "Porsche");

    let (_, body) = send(&app, get("/api/vehicles/featured?includeAll=true")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_status_update_endpoint() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/vehicles/1/status", &json!({ "status": "sold" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sold");

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/vehicles/1/status", &json!({ "status": "scrapped" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid status. Must be one of: available, sold, reserved, pending"
    );
}

#[tokio::test]
async fn test_partial_update_keeps_unspecified_fields() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/vehicles/1", &json!({ "price": 169900 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 169900);
    assert_eq!(body["make"], "Porsche");
    assert_eq!(body["vin"], "WP0AA2A99PS123456");
}

#[tokio::test]
async fn test_stats_endpoint_counts_by_status() {
    let app = build_app();
    let mut featured = sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456");
    featured["isFeatured"] = json!(true);
    create_vehicle(&app, &featured).await;

    let mut sold = sample_vehicle("Ferrari", "F8", 399900, "Sports Cars", "ZFF92LLA9M0123456");
    sold["status"] = json!("sold");
    create_vehicle(&app, &sold).await;

    create_vehicle(&app, &sample_vehicle("Bentley", "Continental GT", 249900, "Grand Tourers", "SCBCE9ZA5MC123456")).await;

    let (status, body) = send(&app, get("/api/vehicles/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["available"], 2);
    assert_eq!(body["sold"], 1);
    assert_eq!(body["featured"], 1);
}

// ===== Consultas =====

#[tokio::test]
async fn test_inquiry_creation_and_status_flow() {
    let app = build_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/inquiries",
            &json!({
                "name": "James Wilson",
                "email": "james@example.com",
                "subject": "Test drive",
                "message": "Interested in the 911."
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "new");
    assert_eq!(body["id"], 1);

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/inquiries/1/status", &json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid status. Must be one of: new, contacted, closed"
    );

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/inquiries/1/status", &json!({ "status": "contacted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "contacted");

    let (status, body) = send(&app, get("/api/inquiries/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Inquiry not found");
}

#[tokio::test]
async fn test_inquiry_rejects_invalid_email() {
    let app = build_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/inquiries",
            &json!({
                "name": "James Wilson",
                "email": "not-an-email",
                "subject": "Test drive",
                "message": "Interested in the 911."
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deleting_vehicle_nulls_inquiry_reference() {
    let app = build_app();
    create_vehicle(&app, &sample_vehicle("Porsche", "911", 179900, "Sports Cars", "WP0AA2A99PS123456")).await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/inquiries",
            &json!({
                "name": "James Wilson",
                "email": "james@example.com",
                "subject": "Test drive",
                "message": "Interested in the 911.",
                "vehicleId": 1
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, request(Method::DELETE, "/api/vehicles/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get("/api/vehicles/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/api/inquiries/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["vehicleId"].is_null());
}

// ===== Testimonios =====

#[tokio::test]
async fn test_testimonial_moderation_flow() {
    let app = build_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/testimonials",
            &json!({
                "name": "Sarah K.",
                "vehicle": "Mercedes-Benz S580",
                "rating": 5,
                "comment": "Outstanding service."
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["isApproved"], false);

    // Sin aprobar no aparece en la vista pública
    let (_, body) = send(&app, get("/api/testimonials")).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = send(&app, get("/api/testimonials/all")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, request(Method::PUT, "/api/testimonials/1/approve")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isApproved"], true);

    let (_, body) = send(&app, get("/api/testimonials")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, request(Method::DELETE, "/api/testimonials/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/api/testimonials/all")).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_testimonial_rejects_out_of_range_rating() {
    let app = build_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/testimonials",
            &json!({
                "name": "Sarah K.",
                "vehicle": "Mercedes-Benz S580",
                "rating": 6,
                "comment": "Outstanding service."
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ===== Autenticación =====

#[tokio::test]
async fn test_login_success_and_failure() {
    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
    let config = EnvironmentConfig {
        admin_username: "admin".to_string(),
        admin_password: "showroom-secret".to_string(),
        ..test_config()
    };
    ensure_admin_user(storage.as_ref(), &config).await.unwrap();
    let app = build_app_with(storage, config);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": "admin", "password": "showroom-secret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    // El hash de la contraseña nunca viaja en la respuesta
    assert!(body["user"].get("password").is_none());

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": "admin", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    // Usuario desconocido: misma respuesta que contraseña incorrecta
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": "ghost", "password": "showroom-secret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}

// ===== Financiamiento =====

#[tokio::test]
async fn test_financing_estimate_applies_showroom_defaults() {
    let app = build_app();
    let (status, body) = send(&app, get("/api/financing/estimate?price=100000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 100000);
    assert_eq!(body["downPayment"], 20000);
    assert_eq!(body["loanAmount"], 80000);
    assert_eq!(body["interestRate"], 4.5);
    assert_eq!(body["termYears"], 5);

    // 100000 financiados al 4.5% a 5 años ≈ 1864.30/mes
    let (_, body) = send(&app, get("/api/financing/estimate?price=100000&downPayment=0")).await;
    let monthly = body["monthlyPayment"].as_f64().unwrap();
    assert!((monthly - 1864.30).abs() < 0.5, "monthly = {}", monthly);
}

#[tokio::test]
async fn test_financing_zero_apr_is_linear() {
    let app = build_app();
    let (status, body) = send(
        &app,
        get("/api/financing/estimate?price=12000&downPayment=0&interestRate=0&termYears=1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthlyPayment"], 1000.0);
    assert_eq!(body["totalInterest"], 0.0);
}

// ===== Subida de imágenes =====

#[tokio::test]
async fn test_image_upload_and_rejection() {
    let app = build_app();

    let (content_type, payload) =
        multipart_body("image", "gt3.png", "image/png", b"fake image bytes");
    let (status, body) = send(&app, multipart_request("/api/upload/image", &content_type, payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Image uploaded successfully");
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/vehicles/"));
    assert!(url.ends_with(".png"));

    let (content_type, payload) =
        multipart_body("image", "notes.txt", "text/plain", b"not an image");
    let (status, body) = send(&app, multipart_request("/api/upload/image", &content_type, payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only image files are allowed (jpeg, png, webp)");

    // Campo con otro nombre: no hay archivo que procesar
    let (content_type, payload) =
        multipart_body("document", "gt3.png", "image/png", b"fake image bytes");
    let (status, body) = send(&app, multipart_request("/api/upload/image", &content_type, payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_multi_image_upload() {
    let app = build_app();

    let boundary = "rpmAutoTestBoundary";
    let mut payload = Vec::new();
    for name in ["front.jpg", "rear.jpg"] {
        payload.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        payload.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\n",
                name
            )
            .as_bytes(),
        );
        payload.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        payload.extend_from_slice(b"fake image bytes");
        payload.extend_from_slice(b"\r\n");
    }
    payload.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    let content_type = format!("multipart/form-data; boundary={}", boundary);

    let (status, body) = send(&app, multipart_request("/api/upload/images", &content_type, payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Images uploaded successfully");
    assert_eq!(body["files"].as_array().unwrap().len(), 2);
}

// ===== Helpers =====

/// App de test sobre el backend en memoria, sin correo real
fn build_app() -> axum::Router {
    build_app_with(Arc::new(MemStorage::new()), test_config())
}

fn build_app_with(storage: Arc<dyn Storage>, config: EnvironmentConfig) -> axum::Router {
    let state = AppState::new(storage, Arc::new(LogMailer), config);
    axum::Router::new()
        .nest("/api", create_api_router())
        .with_state(state)
}

fn test_config() -> EnvironmentConfig {
    let upload_dir = std::env::temp_dir().join(format!("rpm-auto-tests-{}", Uuid::new_v4()));
    EnvironmentConfig {
        upload_dir: upload_dir.to_string_lossy().to_string(),
        ..EnvironmentConfig::default()
    }
}

fn get(uri: &str) -> Request<Body> {
    request(Method::GET, uri)
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(uri: &str, content_type: &str, payload: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(payload))
        .unwrap()
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "rpmAutoTestBoundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_vehicle(app: &axum::Router, vehicle: &Value) -> Value {
    let (status, body) = send(app, json_request(Method::POST, "/api/vehicles", vehicle)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

fn sample_vehicle(make: &str, model: &str, price: i64, category: &str, vin: &str) -> Value {
    json!({
        "make": make,
        "model": model,
        "year": 2022,
        "price": price,
        "mileage": 15000,
        "fuelType": "Gasoline",
        "transmission": "Automatic",
        "color": "Black",
        "description": format!("{} {} in pristine condition.", make, model),
        "category": category,
        "vin": vin
    })
}
