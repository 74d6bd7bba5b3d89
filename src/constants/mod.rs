//! Application constants module.
//!
//! This module centralizes all constant strings used throughout the application,
//! including error messages, error codes and role definitions.

pub mod error_codes;
pub mod errors;
pub mod roles;

pub use error_codes::*;
pub use errors::*;
pub use roles::*;
