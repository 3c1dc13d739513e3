//! Parser for bracket markup.
//!
//! This module contains the tag header parser and the main markup scanner.

mod markup;
mod tag;

pub use markup::parse;
