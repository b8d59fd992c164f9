//! Test context for unified test setup
//! 
//! Builds settings, services and the router over the in-memory store so
//! tests run without external services.

use std::sync::Arc;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use EventDesk::{
    build_router,
    config::Settings,
    database::DatabaseService,
    models::{EventType, EventTypeRequest, LoginRequest, RegisterUserRequest},
    services::ServiceFactory,
};

pub const TEST_JWT_SECRET: &str = "test-secret-with-at-least-thirty-two-bytes";

/// Settings suitable for tests
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.database.url = "memory://".to_string();
    settings.jwt.secret = TEST_JWT_SECRET.to_string();
    settings.auth.login_attempts_per_minute = 5;
    settings
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub router: Router,
}

impl TestContext {
    /// Create a new test context backed by a fresh in-memory store
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let services = Arc::new(ServiceFactory::new(&settings, DatabaseService::in_memory()));
        let router = build_router(services.clone());
        Self { settings, services, router }
    }

    pub async fn create_event_type(&self, description: &str) -> EventType {
        self.services
            .event_type_service
            .create(EventTypeRequest { description: description.to_string() })
            .await
            .expect("Failed to create event type")
    }

    /// Register a user and return a bearer token for them
    pub async fn login_token(&self) -> String {
        self.services
            .user_service
            .register(RegisterUserRequest {
                name: "Test Operator".to_string(),
                email: "operator@example.com".to_string(),
                password: "operator-pass".to_string(),
            })
            .await
            .expect("Failed to register user");

        self.services
            .user_service
            .login(LoginRequest {
                email: "operator@example.com".to_string(),
                password: "operator-pass".to_string(),
            })
            .await
            .expect("Failed to log in")
            .token
    }

    /// Send a request through the router and decode the JSON envelope
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
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

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }
}
