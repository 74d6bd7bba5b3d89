//! Author response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    /// Author's unique identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Ids of books linked to this author
    #[schema(example = json!([3, 7]))]
    pub book_ids: Vec<i64>,
}
