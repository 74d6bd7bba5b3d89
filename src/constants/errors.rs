//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";

// Authorization errors
pub const ERR_ADMIN_REQUIRED: &str = "Only administrators can perform this operation";

// Request errors
pub const ERR_MISSING_BODY: &str = "Request body is missing or is not valid JSON";
pub const ERR_INVALID_ID: &str = "Id must be a positive integer";
pub const ERR_ID_MISMATCH: &str = "Id in the path does not match the id in the request body";

/// The only body ever sent with a 500 response. Fault details stay in the log.
pub const ERR_INTERNAL: &str = "Something failed. Please contact IT Support";
