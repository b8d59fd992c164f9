//! HTTP tests driving the router with `tower::ServiceExt::oneshot`

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::*;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let ctx = TestContext::new();
    let (status, body) = ctx.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_success"], true);
    assert_eq!(body["data"]["database_backend"], "memory");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new();

    let (status, body) = ctx.request(Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["is_success"], false);
    assert_eq!(body["status_code"], "401");
    assert_eq!(body["errors"]["code"], "UNAUTHORIZED");

    let (status, _) = ctx.request(Method::GET, "/api/events", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Elisa Rocha", "email": "elisa@example.com", "password": "elisa-pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "elisa@example.com");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "elisa@example.com", "password": "elisa-pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = ctx.request(Method::GET, "/api/users/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Elisa Rocha");
}

#[tokio::test]
async fn test_event_enrollment_flow() {
    let ctx = TestContext::new();
    let token = ctx.login_token().await;

    let (status, body) = ctx
        .request(Method::POST, "/api/event-types", None, Some(json!({ "description": "Conference" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_type_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/events",
            Some(&token),
            Some(json!({
                "name": "Product Launch",
                "start_date": "2025-09-01T09:00:00Z",
                "end_date": "2025-09-02T18:00:00Z",
                "venue": "Main Hall",
                "max_capacity": 10,
                "max_budget_cents": 100000,
                "event_type_id": event_type_id
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["event_type"], "Conference");
    let event_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = ctx
        .request(
            Method::POST,
            "/api/participants",
            Some(&token),
            Some(json!({ "full_name": "Ana Souza", "cpf": "123.456.789-09", "kind": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = ctx
        .request(
            Method::POST,
            "/api/suppliers",
            None,
            Some(json!({ "service_name": "Catering", "cnpj": CNPJ_CATERING, "base_price_cents": 40000 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/events/{}/participants", event_id);
    let (status, body) = ctx.request(Method::POST, &uri, Some(&token), Some(json!({ "cpf": CPF_ANA }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["kind"], "VIP");

    let (status, body) = ctx.request(Method::POST, &uri, Some(&token), Some(json!({ "cpf": CPF_ANA }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"]["code"], "RESOURCE_ALREADY_EXISTS");

    let uri = format!("/api/events/{}/suppliers", event_id);
    let (status, _) = ctx.request(Method::POST, &uri, Some(&token), Some(json!({ "cnpj": CNPJ_CATERING }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.request(Method::GET, &format!("/api/events/{}", event_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contracted_total_cents"], 40000);
    assert_eq!(body["data"]["remaining_budget_cents"], 60000);
    assert_eq!(body["data"]["participants"][0], format!("Ana Souza, CPF:{}", CPF_ANA));
    assert_eq!(body["data"]["suppliers"][0], format!("Catering, CNPJ:{}", CNPJ_CATERING));

    let uri = format!("/api/events/{}/participants/{}", event_id, CPF_ANA);
    let (status, _) = ctx.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ctx.request(Method::GET, "/api/events?page_number=1&page_size=5", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_count"], 1);
    assert_eq!(body["data"]["page_size"], 5);
    assert_eq!(body["data"]["items"][0]["participants"], json!([]));
}

#[tokio::test]
async fn test_error_envelopes() {
    let ctx = TestContext::new();
    let token = ctx.login_token().await;

    let (status, body) = ctx.request(Method::GET, "/api/events/12345", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"]["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Event not found.");

    let (status, body) = ctx.request(Method::GET, "/api/events/not-a-number", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["code"], "VALIDATION_ERROR");

    let (status, body) = ctx
        .request(Method::POST, "/api/suppliers", None, Some(json!({ "service_name": "Broken" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["is_success"], false);

    let (status, body) = ctx.request(Method::GET, "/api/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found.");
}

#[tokio::test]
async fn test_extreme_page_numbers_return_empty_pages() {
    let ctx = TestContext::new();
    let token = ctx.login_token().await;
    let far = format!("page_number={}&page_size={}", i64::MAX, i64::MAX);

    for path in ["/api/events", "/api/participants", "/api/reports/event-budget-balances"] {
        let uri = format!("{}?{}", path, far);
        let (status, body) = ctx.request(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["is_success"], true);
    }

    let uri = format!("/api/events?{}", far);
    let (_, body) = ctx.request(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
#[serial]
async fn test_login_rate_limit_returns_429() {
    let mut settings = test_settings();
    settings.auth.login_attempts_per_minute = 1;
    let ctx = TestContext::with_settings(settings);

    let credentials = json!({ "email": "nobody@example.com", "password": "whatever" });
    let (status, _) = ctx.request(Method::POST, "/api/users/login", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx.request(Method::POST, "/api/users/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["errors"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_reports_require_auth_and_respond() {
    let ctx = TestContext::new();
    let token = ctx.login_token().await;

    let (status, _) = ctx.request(Method::GET, "/api/reports/most-used-suppliers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    for uri in [
        "/api/reports/most-used-suppliers",
        "/api/reports/participant-kinds",
        "/api/reports/event-budget-balances",
    ] {
        let (status, body) = ctx.request(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["data"], json!([]));
    }

    let (status, _) = ctx
        .request(Method::GET, "/api/reports/participant-agenda/12345678909", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
