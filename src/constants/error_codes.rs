//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";

// Authentication errors
pub const CODE_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";

// Authorization errors
pub const CODE_ADMIN_REQUIRED: &str = "ADMIN_REQUIRED";

// Request errors
pub const CODE_MISSING_BODY: &str = "MISSING_BODY";
pub const CODE_INVALID_ID: &str = "INVALID_ID";
pub const CODE_ID_MISMATCH: &str = "ID_MISMATCH";
