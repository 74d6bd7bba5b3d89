//! Common validation utilities and helpers.

use std::collections::BTreeMap;

use validator::ValidationErrors;

use crate::constants::{CODE_ID_MISMATCH, CODE_INVALID_ID, ERR_ID_MISMATCH, ERR_INVALID_ID};
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// Messages are ordered by field name so responses are stable.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let by_field: BTreeMap<_, _> = e.field_errors().into_iter().collect();
    let errors: Vec<String> = by_field
        .into_values()
        .flat_map(|errs| {
            errs.iter().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => e.code.to_string(),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Reject ids that can never address a stored entity.
pub fn validate_positive_id(id: i64) -> Result<(), ApiError> {
    if id < 1 {
        return Err(ApiError::bad_request(CODE_INVALID_ID, ERR_INVALID_ID));
    }
    Ok(())
}

/// Validate that the id in the path matches the id embedded in the body.
pub fn validate_ids_match(path_id: i64, body_id: i64) -> Result<(), ApiError> {
    if path_id != body_id {
        return Err(ApiError::bad_request(CODE_ID_MISMATCH, ERR_ID_MISMATCH));
    }
    Ok(())
}
