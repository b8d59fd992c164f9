//! User service implementation
//! 
//! Registration, login and profile lookup for API users.

use serde::Serialize;
use tracing::{debug, info};
use crate::database::DatabaseService;
use crate::middleware::rate_limit::LoginRateLimiter;
use crate::models::{LoginRequest, NewUser, RegisterUserRequest, User};
use crate::services::auth::{Claims, JwtService, PasswordService};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::{is_blank, is_valid_email};
use crate::utils::logging::{log_auth_event, log_rule_rejection};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;

/// Identity exposed to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self { id: user.id, name: user.name.clone(), email: user.email.clone() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    db: DatabaseService,
    jwt: JwtService,
    passwords: PasswordService,
    login_limiter: LoginRateLimiter,
}

impl UserService {
    pub fn new(db: DatabaseService, jwt: JwtService, login_limiter: LoginRateLimiter) -> Self {
        Self {
            db,
            jwt,
            passwords: PasswordService::new(),
            login_limiter,
        }
    }

    /// Register a new API user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile> {
        async {
            let name = request.name.trim().to_string();
            let email = request.email.trim().to_lowercase();

            if is_blank(&name) || is_blank(&email) || request.password.is_empty() {
                return Err(reject("name, email and password are required"));
            }
            if name.chars().count() > MAX_NAME_LEN {
                return Err(reject(&format!("name must be at most {} characters", MAX_NAME_LEN)));
            }
            if email.chars().count() > MAX_EMAIL_LEN {
                return Err(reject(&format!("email must be at most {} characters", MAX_EMAIL_LEN)));
            }
            if !is_valid_email(&email) {
                return Err(reject("email address is not valid"));
            }
            if request.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(reject(&format!(
                    "password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
            }
            if self.db.users.find_by_email(&email).await?.is_some() {
                return Err(EventDeskError::already_exists(format!(
                    "A user with email {} already exists.",
                    email
                )));
            }

            let password_hash = self.passwords.hash_password(&request.password)?;
            let user = self.db.users.create(&NewUser { name, email, password_hash }).await?;
            info!(user_id = user.id, email = %user.email, "New user registered successfully");
            Ok(UserProfile::from(&user))
        }
        .await
        .or_operation_failed("failed to register user")
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let email = request.email.trim().to_lowercase();
        self.login_limiter.check(&email)?;

        async {
            let user = match self.db.users.find_by_email(&email).await? {
                Some(user) => user,
                None => {
                    log_auth_event(&email, "login", false);
                    return Err(EventDeskError::not_found("User not found."));
                }
            };

            if !self.passwords.verify_password(&request.password, &user.password_hash)? {
                log_auth_event(&email, "login", false);
                return Err(EventDeskError::validation("Invalid password."));
            }

            let token = self.jwt.generate_token(&user)?;
            log_auth_event(&email, "login", true);
            Ok(LoginResponse { token })
        }
        .await
        .or_operation_failed("failed to log in")
    }

    /// Profile of the authenticated caller
    pub fn profile(&self, claims: &Claims) -> Result<UserProfile> {
        debug!(email = %claims.email, "Reading profile from token");
        Ok(UserProfile {
            id: claims.user_id()?,
            name: claims.name.clone(),
            email: claims.email.clone(),
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.jwt.validate_token(token)
    }
}

fn reject(message: &str) -> EventDeskError {
    log_rule_rejection("user", "registration", message);
    EventDeskError::validation(message)
}
