//! Authentication middleware
//! 
//! Bearer-token extractor guarding the authenticated routes.

use std::sync::Arc;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};
use crate::services::{auth::extract_bearer_token, Claims, ServiceFactory};
use crate::utils::errors::EventDeskError;

/// Claims of the caller, extracted from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl std::ops::Deref for Authenticated {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<Arc<ServiceFactory>> for Authenticated {
    type Rejection = EventDeskError;

    async fn from_request_parts(
        parts: &mut Parts,
        services: &Arc<ServiceFactory>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| EventDeskError::Unauthorized("Missing authentication token".to_string()))?;

        match services.user_service.validate_token(token) {
            Ok(claims) => {
                debug!(email = %claims.email, path = %parts.uri.path(), "Request authenticated");
                Ok(Authenticated(claims))
            }
            Err(e) => {
                warn!(error = %e, path = %parts.uri.path(), "Rejected access token");
                Err(e)
            }
        }
    }
}
