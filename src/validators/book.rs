//! Book-specific custom validators.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// ISBN-10 (check character may be `X`) or ISBN-13, digits optionally hyphen-separated.
    pub static ref ISBN_REGEX: Regex =
        Regex::new(r"^(?:(?:\d-?){9}[\dXx]|(?:\d-?){12}\d)$").expect("ISBN pattern is valid");
}

/// Maximum number of authors that can be linked to a single book.
pub const MAX_AUTHORS_PER_BOOK: usize = 50;

/// Custom validator for the author id list of a book.
/// Ids must be positive and unique, and the list must stay small.
pub fn validate_author_ids(author_ids: &[i64]) -> Result<(), ValidationError> {
    if author_ids.len() > MAX_AUTHORS_PER_BOOK {
        let mut error = ValidationError::new("too_many_authors");
        error.message = Some(
            format!("A book can have at most {} authors", MAX_AUTHORS_PER_BOOK).into(),
        );
        return Err(error);
    }

    if author_ids.iter().any(|id| *id < 1) {
        let mut error = ValidationError::new("invalid_author_id");
        error.message = Some("Author ids must be positive integers".into());
        return Err(error);
    }

    let mut seen = HashSet::with_capacity(author_ids.len());
    if !author_ids.iter().all(|id| seen.insert(*id)) {
        let mut error = ValidationError::new("duplicate_author_id");
        error.message = Some("Author ids must not repeat".into());
        return Err(error);
    }

    Ok(())
}
