//! Data models organized by type.

pub mod author;
pub mod book;
pub mod claims;
pub mod requests;
pub mod responses;

pub use author::*;
pub use book::*;
pub use claims::*;
pub use requests::*;
pub use responses::*;

/// A persisted record addressed by a server-assigned numeric id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}
