//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod event_type;
pub mod participant;
pub mod report;
pub mod supplier;
pub mod user;

// Re-export commonly used services
pub use auth::{Claims, JwtService, PasswordService};
pub use event::EventService;
pub use event_type::EventTypeService;
pub use participant::ParticipantService;
pub use report::ReportService;
pub use supplier::SupplierService;
pub use user::{UserService, UserProfile, LoginResponse};

use serde::Serialize;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::rate_limit::LoginRateLimiter;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub participant_service: ParticipantService,
    pub supplier_service: SupplierService,
    pub event_type_service: EventTypeService,
    pub user_service: UserService,
    pub report_service: ReportService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Self {
        let jwt = JwtService::new(settings.jwt.clone());
        let login_limiter = LoginRateLimiter::new(settings.auth.login_attempts_per_minute);

        Self {
            event_service: EventService::new(database.clone(), settings.pagination.clone()),
            participant_service: ParticipantService::new(database.clone(), settings.pagination.clone()),
            supplier_service: SupplierService::new(database.clone()),
            event_type_service: EventTypeService::new(database.clone()),
            user_service: UserService::new(database.clone(), jwt, login_limiter),
            report_service: ReportService::new(database.clone(), settings.pagination.clone()),
            database,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_error = self.database.health_check().await.err().map(|e| e.to_string());
        if let Some(error) = &database_error {
            tracing::warn!(error = %error, "Database health check failed");
        }

        ServiceHealthStatus {
            database_backend: self.database.backend(),
            database_healthy: database_error.is_none(),
            database_error,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub database_backend: &'static str,
    pub database_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Some(error) = &self.database_error {
            issues.push(format!("Database connection failed: {}", error));
        }

        issues
    }
}
