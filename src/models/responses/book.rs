//! Book response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    /// Book's unique identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "The Rust Programming Language")]
    pub title: String,
    #[schema(example = 2019)]
    pub year: i32,
    #[schema(example = "978-1-7185-0044-0")]
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Cover image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ids of the book's authors
    #[schema(example = json!([1, 2]))]
    pub author_ids: Vec<i64>,
}
