//! Book request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::{validate_author_ids, ISBN_REGEX};

/// Request payload for creating a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    /// Book title (1-200 characters)
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters")
    )]
    #[schema(example = "The Rust Programming Language")]
    pub title: Option<String>,
    /// Publication year
    #[validate(
        required(message = "Year is required"),
        range(min = 1, max = 9999, message = "Year must be between 1 and 9999")
    )]
    #[schema(example = 2019)]
    pub year: Option<i32>,
    /// ISBN-10 or ISBN-13, hyphens allowed (at most 17 characters)
    #[validate(
        required(message = "ISBN is required"),
        length(max = 17, message = "ISBN must be at most 17 characters"),
        regex(
            path = "ISBN_REGEX",
            message = "ISBN must contain 10 or 13 digits, optionally separated by hyphens"
        )
    )]
    #[schema(example = "978-1-7185-0044-0")]
    pub isbn: Option<String>,
    /// Short description of the book
    #[validate(length(max = 4000, message = "Summary must be at most 4000 characters"))]
    #[schema(example = "The official book on the Rust programming language")]
    pub summary: Option<String>,
    /// Cover image reference
    #[validate(length(max = 500, message = "Image must be at most 500 characters"))]
    #[schema(example = "https://example.com/covers/rust-book.jpg")]
    pub image: Option<String>,
    /// Ids of the book's authors
    #[validate(custom(function = "validate_author_ids"))]
    #[schema(example = json!([1, 2]))]
    pub author_ids: Option<Vec<i64>>,
}

/// Request payload for replacing a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    /// Must equal the id in the request path
    #[serde(default)]
    #[schema(example = 1)]
    pub id: i64,
    /// Book title (1-200 characters)
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters")
    )]
    #[schema(example = "The Rust Programming Language")]
    pub title: Option<String>,
    /// Publication year
    #[validate(
        required(message = "Year is required"),
        range(min = 1, max = 9999, message = "Year must be between 1 and 9999")
    )]
    #[schema(example = 2023)]
    pub year: Option<i32>,
    /// ISBN-10 or ISBN-13, hyphens allowed (at most 17 characters)
    #[validate(
        required(message = "ISBN is required"),
        length(max = 17, message = "ISBN must be at most 17 characters"),
        regex(
            path = "ISBN_REGEX",
            message = "ISBN must contain 10 or 13 digits, optionally separated by hyphens"
        )
    )]
    #[schema(example = "978-1-7185-0310-6")]
    pub isbn: Option<String>,
    /// Short description of the book
    #[validate(length(max = 4000, message = "Summary must be at most 4000 characters"))]
    pub summary: Option<String>,
    /// Cover image reference
    #[validate(length(max = 500, message = "Image must be at most 500 characters"))]
    pub image: Option<String>,
    /// Ids of the book's authors; replaces the current set
    #[validate(custom(function = "validate_author_ids"))]
    #[schema(example = json!([1]))]
    pub author_ids: Option<Vec<i64>>,
}
