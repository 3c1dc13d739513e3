//! Wrapped, styled output for the terminal.
//!
//! [`render_markup`] parses markup, wraps it with [`flow::word_wrap`] using
//! [`TermStyle`] as the wrap state, and collects the result as lines of
//! styled runs. [`StyledText::write_to`] then emits those lines with
//! crossterm styling commands.

use std::cell::RefCell;
use std::io::Write;

use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use inkmark::Document;
use log::debug;

use crate::error::{InkwrapError, Result};
use crate::options::RenderOptions;
use crate::style::TermStyle;

/// A stretch of text in one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: TermStyle,
}

/// One output line. Indentation is a leading unstyled run of spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub runs: Vec<Run>,
}

impl Line {
    /// Append text, merging it into the last run when the style matches.
    fn push(&mut self, text: &str, style: &TermStyle) {
        match self.runs.last_mut() {
            Some(last) if last.style == *style => last.text.push_str(text),
            _ => self.runs.push(Run {
                text: text.to_string(),
                style: *style,
            }),
        }
    }

    /// The line's text without styling.
    pub fn plain(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// The result of wrapping a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledText {
    lines: Vec<Line>,
    width: usize,
}

impl StyledText {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Width of the widest line, in the units of the measure used.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain).collect()
    }

    /// Write every line followed by a newline, styled with escape sequences.
    ///
    /// Styles are only re-emitted where they change, and the terminal is left
    /// with attributes reset.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut last = TermStyle::default();

        for line in &self.lines {
            for run in &line.runs {
                if run.style != last {
                    emit_style(out, &run.style)?;
                    last = run.style;
                }
                queue!(out, Print(&run.text))?;
            }
            // Keep backgrounds from bleeding to the end of the row.
            if !last.is_plain() {
                queue!(out, SetAttribute(Attribute::Reset))?;
                last = TermStyle::default();
            }
            queue!(out, Print("\n"))?;
        }

        out.flush()?;
        Ok(())
    }

    /// Write the lines without any styling.
    pub fn write_plain<W: Write>(&self, out: &mut W) -> Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line.plain())?;
        }
        out.flush()?;
        Ok(())
    }
}

fn emit_style<W: Write>(out: &mut W, style: &TermStyle) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    for attribute in style.modifiers.attributes() {
        queue!(out, SetAttribute(attribute))?;
    }
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg.to_crossterm()))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg.to_crossterm()))?;
    }
    Ok(())
}

/// Parse `input` and wrap it for the terminal.
///
/// # Examples
///
/// ```
/// use inkwrap::{RenderOptions, render_markup};
///
/// let text = render_markup("[*Note:] keep it [+short and] simple", &RenderOptions::new(14)).unwrap();
/// assert_eq!(text.plain_lines(), vec!["Note: keep it", "short and", "simple"]);
/// ```
pub fn render_markup(input: &str, options: &RenderOptions) -> Result<StyledText> {
    let doc = inkmark::parse(input)?;
    render_document(&doc, options)
}

/// Wrap an already parsed document for the terminal.
pub fn render_document(doc: &Document, options: &RenderOptions) -> Result<StyledText> {
    let measure = options.measure;
    let lines = RefCell::new(vec![Line::default()]);

    let width = flow::word_wrap(
        doc,
        TermStyle::default(),
        &options.wrap_options(),
        |_, text| measure.measure(text),
        |style, text, _| {
            if let Some(line) = lines.borrow_mut().last_mut() {
                line.push(text, style);
            }
            Ok::<_, InkwrapError>(())
        },
        |_, _, indent| {
            let mut line = Line::default();
            if indent > 0 {
                line.push(&" ".repeat(indent), &TermStyle::default());
            }
            lines.borrow_mut().push(line);
            Ok(indent)
        },
        |style, tag, attribute| (style.enter_tag(tag, attribute), 0),
    )?;

    let lines = lines.into_inner();
    debug!("rendered {} lines, widest {}", lines.len(), width);
    Ok(StyledText { lines, width })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::style::Modifiers;
    use crossterm::style::Color as TermColor;

    fn bold() -> TermStyle {
        TermStyle {
            modifiers: Modifiers::BOLD,
            ..TermStyle::default()
        }
    }

    #[test]
    fn adjacent_runs_merge() {
        let text = render_markup("[*ab][*cd] ef", &RenderOptions::new(20)).unwrap();
        assert_eq!(
            text.lines()[0].runs,
            vec![
                Run {
                    text: "abcd".to_string(),
                    style: bold()
                },
                Run {
                    text: " ef".to_string(),
                    style: TermStyle::default()
                },
            ]
        );
    }

    #[test]
    fn indent_is_unstyled() {
        let options = RenderOptions::new(6).with_hanging_indent(2);
        let text = render_markup("[*aaaa bbbb]", &options).unwrap();
        assert_eq!(text.plain_lines(), vec!["aaaa", "  bbbb"]);
        assert_eq!(text.lines()[1].runs[0].style, TermStyle::default());
        assert_eq!(text.lines()[1].runs[1].style, bold());
        assert_eq!(text.width(), 6);
    }

    #[test]
    fn write_to_emits_and_resets_styles() {
        let text = render_markup("a [<red>cb]", &RenderOptions::new(20)).unwrap();
        let mut out = Vec::new();
        text.write_to(&mut out).unwrap();

        let mut expected = Vec::new();
        queue!(
            expected,
            Print("a "),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(TermColor::DarkRed),
            Print("b"),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )
        .unwrap();
        assert_eq!(out, expected);
        assert_eq!(Color::Palette(TermColor::DarkRed).to_crossterm(), TermColor::DarkRed);
    }

    #[test]
    fn write_plain_has_no_escapes() {
        let text = render_markup("[*x] [<#fff>hy]\nz", &RenderOptions::new(20)).unwrap();
        let mut out = Vec::new();
        text.write_plain(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x y\nz\n");
    }

    #[test]
    fn parse_errors_surface() {
        let err = render_markup("[*open", &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, InkwrapError::Markup(_)));
        let err = render_markup("ok", &RenderOptions::new(0)).unwrap_err();
        assert!(matches!(err, InkwrapError::Wrap(flow::WrapError::InvalidWidth)));
    }
}
