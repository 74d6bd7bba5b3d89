//! Request middleware and authorization helpers.

pub mod auth_helpers;
pub mod auth_middleware;

pub use auth_helpers::*;
pub use auth_middleware::AuthMiddleware;
