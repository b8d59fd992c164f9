//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventDeskError, Result};
use super::Settings;

/// Minimum HS256 secret length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_jwt_config(&settings.jwt)?;
    validate_auth_config(&settings.auth)?;
    validate_pagination_config(&settings.pagination)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(EventDeskError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(EventDeskError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventDeskError::Config(
            "Database URL is required".to_string()
        ));
    }
    
    if config.max_connections == 0 {
        return Err(EventDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }
    
    if config.min_connections > config.max_connections {
        return Err(EventDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }
    
    Ok(())
}

/// Validate JWT configuration
fn validate_jwt_config(config: &super::JwtConfig) -> Result<()> {
    if config.secret.is_empty() {
        return Err(EventDeskError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.secret.len() < MIN_JWT_SECRET_LEN {
        return Err(EventDeskError::Config(
            format!("JWT secret must be at least {} bytes", MIN_JWT_SECRET_LEN)
        ));
    }

    if config.issuer.is_empty() || config.audience.is_empty() {
        return Err(EventDeskError::Config(
            "JWT issuer and audience are required".to_string()
        ));
    }

    if config.expires_in_hours <= 0 {
        return Err(EventDeskError::Config(
            "JWT lifetime must be greater than 0 hours".to_string()
        ));
    }

    Ok(())
}

fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.login_attempts_per_minute == 0 {
        return Err(EventDeskError::Config(
            "Login attempts per minute must be greater than 0".to_string()
        ));
    }

    Ok(())
}

fn validate_pagination_config(config: &super::PaginationConfig) -> Result<()> {
    if config.default_page_size <= 0 || config.max_page_size <= 0 || config.report_page_size <= 0 {
        return Err(EventDeskError::Config(
            "Page sizes must be greater than 0".to_string()
        ));
    }

    if config.default_page_size > config.max_page_size {
        return Err(EventDeskError::Config(
            "Default page size cannot exceed max page size".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventDeskError::Config(
            "Log level is required".to_string()
        ));
    }
    
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }
    
    Ok(())
}
