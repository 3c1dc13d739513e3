//! Error types for the layout engine.

use thiserror::Error;

/// Invalid arguments passed to [`word_wrap`](crate::word_wrap).
///
/// Errors returned by the caller's own callbacks are not wrapped in this
/// type; they reach the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WrapError {
    /// The wrap width must be positive.
    #[error("wrap width must be greater than zero")]
    InvalidWidth,
}
