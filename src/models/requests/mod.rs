//! Request models for API endpoints.

pub mod author;
pub mod book;

pub use author::*;
pub use book::*;
