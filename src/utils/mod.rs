//! Cross-cutting helpers.

pub mod log_sanitizer;
pub mod op_log;

pub use log_sanitizer::mask_text;
pub use op_log::OperationLog;
