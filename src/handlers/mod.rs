//! HTTP request handlers organized by domain.
//!
//! Every operation follows the same sequence: authorize, reject malformed
//! input, consult the repository, map to a response DTO. Each step is logged
//! through an [`OperationLog`](crate::utils::OperationLog).

pub mod author_handler;
pub mod book_handler;

pub use author_handler::*;
pub use book_handler::*;
