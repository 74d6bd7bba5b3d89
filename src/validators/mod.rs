//! Request validation helpers and custom field validators.

pub mod book;
pub mod common;

pub use book::*;
pub use common::*;
