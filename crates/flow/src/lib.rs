//! Word wrapping for bracket markup.
//!
//! [`word_wrap`] lays out an [`inkmark::Document`] into lines no wider than
//! a given width. Everything about appearance is left to the caller through
//! four callbacks and a caller-defined style state, so the same engine
//! drives terminal output, fixed-width text or pixel-based layouts.
//!
//! ```
//! use flow::{WrapOptions, wrap_to_lines};
//!
//! let doc = inkmark::parse("The [+quick brown] fox jumps").unwrap();
//! let lines = wrap_to_lines(&doc, &WrapOptions::new(12)).unwrap();
//! assert_eq!(lines, vec!["The", "quick brown", "fox jumps"]);
//! ```

pub mod error;
pub mod wrap;

pub use error::WrapError;
pub use wrap::{NOWRAP_TAG, WrapOptions, word_wrap, wrap_to_lines};
