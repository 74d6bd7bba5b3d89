//! Field-by-field conversions between entities and transfer objects.
//!
//! Conversions never validate; handlers run `validator` checks before mapping,
//! so required fields are already known to be present here.

pub mod author;
pub mod book;
