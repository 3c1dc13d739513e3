//! Rendering configuration.

use flow::{NOWRAP_TAG, WrapOptions};

/// Width used when the terminal size cannot be queried.
pub const FALLBACK_WIDTH: usize = 80;

/// How the width of a piece of text is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureMode {
    /// Terminal cells: wide characters count as two, combining marks as zero.
    #[default]
    Cells,
    /// One unit per `char`.
    Chars,
}

impl MeasureMode {
    pub fn measure(self, text: &str) -> usize {
        match self {
            MeasureMode::Cells => unicode_display_width::width(text) as usize,
            MeasureMode::Chars => text.chars().count(),
        }
    }
}

/// Options for [`render_markup`](crate::render_markup).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub hanging_indent: usize,
    pub nowrap_tag: char,
    pub measure: MeasureMode,
}

impl RenderOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Options sized to the current terminal, or [`FALLBACK_WIDTH`] when
    /// there is no terminal to ask.
    pub fn for_terminal() -> Self {
        let width = crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| columns as usize)
            .filter(|&columns| columns > 0)
            .unwrap_or(FALLBACK_WIDTH);
        Self::new(width)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_hanging_indent(mut self, hanging_indent: usize) -> Self {
        self.hanging_indent = hanging_indent;
        self
    }

    pub fn with_nowrap_tag(mut self, tag: char) -> Self {
        self.nowrap_tag = tag;
        self
    }

    pub fn with_measure(mut self, measure: MeasureMode) -> Self {
        self.measure = measure;
        self
    }

    /// The layout engine's share of these options.
    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::new(self.width)
            .with_hanging_indent(self.hanging_indent)
            .with_nowrap_tag(self.nowrap_tag)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            hanging_indent: 0,
            nowrap_tag: NOWRAP_TAG,
            measure: MeasureMode::Cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_count_wide_characters_twice() {
        assert_eq!(MeasureMode::Cells.measure("abc"), 3);
        assert_eq!(MeasureMode::Cells.measure("日本"), 4);
        assert_eq!(MeasureMode::Chars.measure("日本"), 2);
    }

    #[test]
    fn wrap_options_follow_render_options() {
        let options = RenderOptions::new(40)
            .with_hanging_indent(2)
            .with_nowrap_tag('=');
        assert_eq!(
            options.wrap_options(),
            WrapOptions::new(40).with_hanging_indent(2).with_nowrap_tag('=')
        );
    }

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.width, FALLBACK_WIDTH);
        assert_eq!(options.nowrap_tag, '+');
        assert_eq!(options.measure, MeasureMode::Cells);
    }
}
