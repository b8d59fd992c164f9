//! User registration and login tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use EventDesk::models::{LoginRequest, RegisterUserRequest};
use EventDesk::EventDeskError;

fn registration(email: &str, password: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: "Diego Alves".to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest { email: email.to_string(), password: password.to_string() }
}

#[tokio::test]
async fn test_register_and_login() {
    let ctx = TestContext::new();
    let service = &ctx.services.user_service;

    let profile = service.register(registration("Diego@Example.com", "secret1")).await.unwrap();
    assert_eq!(profile.email, "diego@example.com");

    let token = service.login(login("diego@example.com", "secret1")).await.unwrap().token;
    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), profile.id);
    assert_eq!(claims.iss, ctx.settings.jwt.issuer);

    let from_token = service.profile(&claims).unwrap();
    assert_eq!(from_token, profile);
}

#[tokio::test]
async fn test_registration_rules() {
    let ctx = TestContext::new();
    let service = &ctx.services.user_service;

    assert_matches!(service.register(registration("", "secret1")).await, Err(EventDeskError::Validation(_)));
    assert_matches!(service.register(registration("not-an-email", "secret1")).await, Err(EventDeskError::Validation(_)));
    assert_matches!(service.register(registration("e@example.com", "12345")).await, Err(EventDeskError::Validation(_)));

    let long_email = format!("{}@example.com", "e".repeat(250));
    assert_matches!(service.register(registration(&long_email, "secret1")).await, Err(EventDeskError::Validation(_)));
    let long_name = RegisterUserRequest { name: "D".repeat(101), ..registration("d@example.com", "secret1") };
    assert_matches!(service.register(long_name).await, Err(EventDeskError::Validation(_)));

    service.register(registration("e@example.com", "secret1")).await.unwrap();
    assert_matches!(
        service.register(registration("e@example.com", "another1")).await,
        Err(EventDeskError::AlreadyExists(_))
    );
}

#[tokio::test]
async fn test_login_failures() {
    let ctx = TestContext::new();
    let service = &ctx.services.user_service;
    service.register(registration("f@example.com", "secret1")).await.unwrap();

    assert_matches!(service.login(login("ghost@example.com", "secret1")).await, Err(EventDeskError::NotFound(_)));
    assert_matches!(service.login(login("f@example.com", "wrong-password")).await, Err(EventDeskError::Validation(_)));
}

#[tokio::test]
async fn test_login_attempts_are_rate_limited() {
    let mut settings = test_settings();
    settings.auth.login_attempts_per_minute = 2;
    let ctx = TestContext::with_settings(settings);
    let service = &ctx.services.user_service;
    service.register(registration("g@example.com", "secret1")).await.unwrap();

    assert!(service.login(login("g@example.com", "bad")).await.is_err());
    assert!(service.login(login("g@example.com", "bad")).await.is_err());
    assert_matches!(
        service.login(login("g@example.com", "secret1")).await,
        Err(EventDeskError::RateLimitExceeded)
    );
}
