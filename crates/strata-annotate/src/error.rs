//! Error types for annotation.

use thiserror::Error;

/// Errors raised by keyword backends.
///
/// These never escape [`crate::annotate`]: a failing backend is logged and replaced by the
/// heuristic.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// A keyword backend could not process the text.
    #[error("keyword backend {backend} failed: {message}")]
    Backend {
        /// Backend name.
        backend: &'static str,
        /// What went wrong.
        message: String,
    },
}
