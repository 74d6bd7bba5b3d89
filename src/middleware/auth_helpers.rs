//! Authentication and authorization helper functions.
//!
//! These helpers reduce boilerplate in handlers by providing common patterns for:
//! - Extracting claims from authenticated requests
//! - Requiring admin privileges
//! - Applying a configurable role requirement

use actix_web::{HttpMessage, HttpRequest};
use log::warn;

use crate::constants::{CODE_AUTH_REQUIRED, ERR_ADMIN_REQUIRED, ERR_AUTH_REQUIRED};
use crate::errors::ApiError;
use crate::models::Claims;

/// Extension trait for reading the claims stored by `AuthMiddleware`.
pub trait RequestExt {
    fn get_claims(&self) -> Option<Claims>;
}

impl RequestExt for HttpRequest {
    fn get_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }
}

/// Extract claims from request or return Unauthorized error.
///
/// Use this at the start of any handler that requires authentication.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Failed to get claims from request");
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })
}

/// Require admin role or return Forbidden error.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// require_admin(&claims)?;
/// ```
pub fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if !claims.is_admin() {
        warn!(
            "User {} (role: {}) attempted admin action",
            claims.sub, claims.role
        );
        return Err(ApiError::Forbidden(ERR_ADMIN_REQUIRED.to_string()));
    }
    Ok(())
}

/// Authenticate the caller and, when `admin_only` is set, require the admin role.
///
/// Returns the caller's claims so handlers can log who acted.
pub fn authorize(req: &HttpRequest, admin_only: bool) -> Result<Claims, ApiError> {
    let claims = require_auth(req)?;
    if admin_only {
        require_admin(&claims)?;
    }
    Ok(claims)
}
