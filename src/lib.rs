//! Word-wrapped bracket markup for the terminal.
//!
//! Ties the [`inkmark`] parser and the [`flow`] layout engine to a terminal:
//! tags select text styles and colors, widths are measured in terminal
//! cells, and the wrapped result is written with crossterm.
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `[*text]` | bold |
//! | `[/text]` | italic |
//! | `[_text]` | underline |
//! | `[-text]` | strikethrough |
//! | `[~text]` | dim |
//! | `[!text]` | reverse video |
//! | `[<color>c text]` | foreground color |
//! | `[<color>h text]` | background color |
//! | `[+text]` | never broken across lines |
//!
//! ```
//! use inkwrap::{RenderOptions, render_markup};
//!
//! let text = render_markup("[*inkwrap] wraps [<cyan>c markup]", &RenderOptions::new(16)).unwrap();
//! assert_eq!(text.plain_lines(), vec!["inkwrap wraps", "markup"]);
//! ```

pub mod color;
pub mod console;
pub mod error;
pub mod log_init;
pub mod options;
pub mod style;

pub use color::Color;
pub use console::{Line, Run, StyledText, render_document, render_markup};
pub use error::{ColorParseError, InkwrapError, Result};
pub use log_init::init_logger;
pub use options::{FALLBACK_WIDTH, MeasureMode, RenderOptions};
pub use style::{Modifiers, TermStyle};

pub use flow;
pub use inkmark;
