use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn create_test_app(backend_url: &str) -> Router {
    doctor_routes(Arc::new(TestConfig::with_backend(backend_url)))
}

#[tokio::test]
async fn test_list_doctors() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "doctors": [
                MockBackendResponses::doctor_profile("doc-1", json!({})),
                MockBackendResponses::doctor_profile("doc-2", json!({}))
            ]
        })))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json_response["doctors"].is_array());
    assert_eq!(json_response["total"], 2);
}

#[tokio::test]
async fn test_get_doctor_includes_booked_map() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::doctor_profile("doc-1", json!({ "5_6_2024": ["10:00 AM"] })),
        ))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/doc-1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["id"], "doc-1");
    assert_eq!(json_response["slots_booked"]["5_6_2024"][0], "10:00 AM");
}

#[tokio::test]
async fn test_unknown_doctor_maps_to_404() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("doctor not found"))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/nope")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_week_slots_endpoint_returns_seven_buckets() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::doctor_profile("doc-1", json!({})),
        ))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/doc-1/slots")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["days"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_week_slots_day_zero_uses_the_local_wall_clock() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::doctor_profile("doc-1", json!({})),
        ))
        .mount(&mock_server)
        .await;

    // The booked map is keyed by local clinic dates, so today's bucket must
    // be derived from the local clock, not UTC.
    let before = chrono::Local::now().date_naive();

    let request = Request::builder()
        .method("GET")
        .uri("/doc-1/slots")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let after = chrono::Local::now().date_naive();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let day_zero = json_response["days"][0]["date_key"].as_str().unwrap();
    assert!(
        day_zero == shared_utils::datekey::date_key(before)
            || day_zero == shared_utils::datekey::date_key(after)
    );
}

#[tokio::test]
async fn test_review_validation_rejected_before_backend() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    // No mock mounted: any backend call would change the status code.
    let request = Request::builder()
        .method("POST")
        .uri("/doc-1/reviews")
        .header("authorization", "Bearer test-token")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "rating": 0, "comment": "fine" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_backend_rejection_surfaces_message() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/api/user/review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::failure_message("Review already submitted"),
        ))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/doc-1/reviews")
        .header("authorization", "Bearer test-token")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "rating": 5, "comment": "Excellent care" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["error"], "Review already submitted");
}

#[tokio::test]
async fn test_dashboard_requires_bearer_header() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    let request = Request::builder()
        .method("GET")
        .uri("/dashboard")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_returns_stats() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/doctor/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": {
                "earnings": 1250.0,
                "appointment_count": 42,
                "patient_count": 17
            }
        })))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/dashboard")
        .header("authorization", "Bearer doctor-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["appointment_count"], 42);
}
