//! Response models for API endpoints.

pub mod api;
pub mod author;
pub mod book;

pub use api::*;
pub use author::*;
pub use book::*;
