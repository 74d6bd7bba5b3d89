use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::constants::{CODE_ADMIN_REQUIRED, CODE_VALIDATION_FAILED, ERR_INTERNAL};
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    Forbidden(String),
    NotFound,
    ValidationError(Vec<String>),
    /// Carries nothing: the fault has already been logged by the caller.
    InternalServerError,
}

impl ApiError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::Unauthorized { code, message } => {
                write!(f, "Unauthorized [{}]: {}", code, message)
            }
            ApiError::Forbidden(message) => write!(f, "Forbidden: {}", message),
            ApiError::NotFound => write!(f, "Not Found"),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation Error [{}]: {:?}", CODE_VALIDATION_FAILED, errors)
            }
            ApiError::InternalServerError => write!(f, "Internal Server Error"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest { code, message } => {
                HttpResponse::BadRequest().json(ErrorResponse::new(code, message, None))
            }
            ApiError::Unauthorized { code, message } => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(code, message, None))
            }
            ApiError::Forbidden(message) => HttpResponse::Forbidden().json(ErrorResponse::new(
                CODE_ADMIN_REQUIRED,
                message,
                None,
            )),
            ApiError::NotFound => HttpResponse::NotFound().finish(),
            ApiError::ValidationError(errors) => HttpResponse::BadRequest().json(
                ErrorResponse::new(CODE_VALIDATION_FAILED, "Validation failed", Some(errors.clone())),
            ),
            ApiError::InternalServerError => HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body(ERR_INTERNAL),
        }
    }
}
