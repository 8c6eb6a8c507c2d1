use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{api_routes, with_http_layers};
use crate::tests::{TEST_PASSWORD, create_test_state};

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `token=<jwt>` from the login response's Set-Cookie header.
fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets the session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().trim().to_string()
}

async fn register_and_login(app: &Router, name: &str, email: &str, role: &str) -> (Value, String) {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({
                "name": name,
                "email": email,
                "password": TEST_PASSWORD,
                "role": role,
                "specialization": "Cardiology",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    (body["data"].clone(), cookie)
}

#[tokio::test]
async fn test_health_check() {
    let app = api_routes(create_test_state());
    let response = send(&app, get_request("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_without_cookie() {
    let app = api_routes(create_test_state());
    let response = send(&app, get_request("/api/patient", None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "user not authenticated");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_protected_route_with_bad_token() {
    let app = api_routes(create_test_state());
    let response = send(&app, get_request("/api/auth/me", Some("token=not-a-jwt"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token. Please log in again.");
}

#[tokio::test]
async fn test_register_response_envelope() {
    let app = api_routes(create_test_state());
    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Alice", "email": "alice@example.com", "password": TEST_PASSWORD, "role": "PATIENT" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Dear Alice, registration successful, please login");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let app = api_routes(create_test_state());
    register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Alice", "email": "alice@example.com", "password": TEST_PASSWORD, "role": "PATIENT" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_login_cookie_restores_session() {
    let app = api_routes(create_test_state());
    let (profile, cookie) = register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;
    assert_eq!(profile["email"], "alice@example.com");
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());

    let response = send(&app, get_request("/api/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "session restored");
    assert_eq!(body["data"], profile);
}

#[tokio::test]
async fn test_login_cookie_attributes() {
    let app = api_routes(create_test_state());
    register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "alice@example.com", "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=None"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=1209600"));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = api_routes(create_test_state());
    register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "alice@example.com", "password": "wrong" }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = api_routes(create_test_state());
    let response = send(&app, get_request("/api/auth/logout", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_malformed_json_is_enveloped() {
    let app = api_routes(create_test_state());
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_booking_round_trip() {
    let app = api_routes(create_test_state());
    let (doctor, doctor_cookie) = register_and_login(&app, "House", "house@clinic.example.com", "DOCTOR").await;
    let (patient, patient_cookie) = register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/patient",
            json!({
                "doctorId": doctor["id"],
                "date": "20-06-2025",
                "time": "3 PM",
                "reason": "checkup",
                "status": "CONFIRMED",
            }),
            Some(&patient_cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await["data"].clone();
    // A client-supplied status is ignored on booking.
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["date"], "20-06-2025");
    assert_eq!(created["time"], "3 PM");
    let appointment_id = created["id"].as_str().unwrap().to_string();

    let response = send(&app, get_request("/api/patient", Some(&patient_cookie))).await;
    let listed = body_json(response).await["data"].clone();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["doctor"]["name"], "House");

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/doctor/{}", appointment_id),
            json!({ "status": "CONFIRMED" }),
            Some(&doctor_cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "CONFIRMED");

    let response = send(&app, get_request("/api/doctor", Some(&doctor_cookie))).await;
    let listed = body_json(response).await["data"].clone();
    assert_eq!(listed[0]["patient"]["id"], patient["id"]);

    let response = send(
        &app,
        get_request(&format!("/api/patient/{}", patient["id"].as_str().unwrap()), Some(&doctor_cookie)),
    )
    .await;
    let history = body_json(response).await["data"].clone();
    assert_eq!(history["appointments"][0]["doctorName"], "House");

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/doctor/{}", appointment_id))
        .header(header::COOKIE, &patient_cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled = body_json(response).await["data"].clone();
    assert_eq!(cancelled["status"], "CANCELLED");
    assert!(!cancelled["cancelledAt"].is_null());
}

#[tokio::test]
async fn test_patient_cannot_use_doctor_booking() {
    let app = api_routes(create_test_state());
    let (_, patient_cookie) = register_and_login(&app, "Alice", "alice@example.com", "PATIENT").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/doctor",
            json!({ "patientId": "someone", "date": "2025-03-01", "time": "10:00", "reason": "checkup" }),
            Some(&patient_cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_route_is_enveloped() {
    let app = api_routes(create_test_state());
    let response = send(&app, get_request("/api/nowhere", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "route not found");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_http_layers_serve_requests() {
    let app = with_http_layers(api_routes(create_test_state()), "http://localhost:5173").unwrap();
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    assert!(with_http_layers(api_routes(create_test_state()), "bad\norigin").is_err());
}
