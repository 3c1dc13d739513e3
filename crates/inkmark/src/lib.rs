//! Bracket markup: a minimal inline markup language.
//!
//! Markup is plain text with tags written as `[` + tag character + content +
//! `]`. A tag may carry an attribute written between `<` and `>` right after
//! the opening bracket.
//!
//! # Overview
//!
//! - `[*bold]` - Tag `*` containing the text `bold`
//! - `[<red>c warm]` - Tag `c` with attribute `red`
//! - `[(]` / `[)]` - Literal `[` / `]`
//! - `[ text]` - Same as `[(]text[)]`
//!
//! What a tag character means is up to the consumer; this crate only
//! builds the tree.
//!
//! # Usage
//!
//! ```
//! use inkmark::{escape, parse, serialize_document};
//!
//! let doc = parse("Press [*Enter] to [ continue]").unwrap();
//! assert_eq!(doc.text(), "Press Enter to [continue]");
//!
//! let source = format!("[*{}]", escape("a[1]"));
//! let doc = parse(&source).unwrap();
//! assert_eq!(doc.text(), "a[1]");
//! assert_eq!(serialize_document(&doc), source);
//! ```

pub mod error;
pub mod escape;
pub mod parser;
pub mod serialize;
pub mod tree;

// Re-export main types at crate root
pub use error::ParseError;
pub use escape::escape;
pub use parser::parse;
pub use serialize::{serialize, serialize_document};
pub use tree::{Document, Node, NodeId, TagNode, TextNode};
