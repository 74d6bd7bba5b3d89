//! Labelled logging for request handlers.
//!
//! Every line a handler writes is prefixed with `[{entity}::{operation}]`,
//! so a request can be followed through the log without knowing which
//! function emitted it.

use std::error::Error;
use std::fmt::{Display, Write};

use log::{error, info, warn};

use crate::errors::ApiError;

use super::log_sanitizer::strip_control;

/// Log sink for one handler operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationLog {
    entity: &'static str,
    operation: &'static str,
}

impl OperationLog {
    pub const fn new(entity: &'static str, operation: &'static str) -> Self {
        Self { entity, operation }
    }

    pub fn info(&self, message: impl Display) {
        info!("{}", self.line(message));
    }

    pub fn warn(&self, message: impl Display) {
        warn!("{}", self.line(message));
    }

    pub fn error(&self, message: impl Display) {
        error!("{}", self.line(message));
    }

    /// Prefixed log line with control characters replaced.
    fn line(&self, message: impl Display) -> String {
        format!(
            "[{}::{}] {}",
            self.entity,
            self.operation,
            strip_control(&message.to_string())
        )
    }

    /// Log a client-side rejection and hand the error back for `?`.
    pub fn reject(&self, err: ApiError) -> ApiError {
        self.warn(&err);
        err
    }

    /// Log an unexpected fault with its full cause chain. The client only
    /// ever sees the generic 500 body.
    pub fn fault(&self, err: &dyn Error) -> ApiError {
        self.error(describe_fault(err));
        ApiError::InternalServerError
    }

    /// Log a write the repository refused and answer with a 500.
    pub fn refused(&self, what: impl Display) -> ApiError {
        self.error(format_args!("{} was not persisted", what));
        ApiError::InternalServerError
    }
}

/// Render an error followed by each of its sources.
pub fn describe_fault(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let _ = write!(out, " | caused by: {}", inner);
        source = inner.source();
    }
    out
}
