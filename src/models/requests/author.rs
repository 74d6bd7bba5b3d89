//! Author request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating an author
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    /// Author's first name (1-100 characters)
    #[validate(
        required(message = "First name is required"),
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters")
    )]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// Author's last name (1-100 characters)
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

/// Request payload for replacing an author
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    /// Must equal the id in the request path
    #[serde(default)]
    #[schema(example = 1)]
    pub id: i64,
    /// Author's first name (1-100 characters)
    #[validate(
        required(message = "First name is required"),
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters")
    )]
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// Author's last name (1-100 characters)
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters")
    )]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}
