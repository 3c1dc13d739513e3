//! Greedy word wrapping over a markup tree.
//!
//! The engine walks a [`Document`] once, in document order, and hands every
//! placed fragment to the caller. It never looks at what a width means: the
//! caller measures text, decides what a tag does to the current style state
//! and moves to the next line. Widths are only added and compared.
//!
//! ## Words and pieces
//! A word is a run of non-whitespace characters, possibly spanning several
//! tags (`fo[*ob]ar` is one word). Each same-state part of a word is kept as
//! a separate *piece* so the caller sees every style change, and the pieces
//! of a word are rendered together once the word is known to fit.
//!
//! ## Tags
//! - The no-break tag (`+` by default) makes its content one unbreakable
//!   word, whitespace included. It is never passed to `next_state`.
//! - Any other tag is passed to `next_state`, whose returned advance moves
//!   the cursor before the tag's content (for bullets and similar markers).
//!
//! ## Whitespace
//! - Runs of spaces between words collapse into a single rendered space.
//! - Spaces at the start of a paragraph are rendered and become the
//!   paragraph's indent; lines wrapped inside the paragraph start at that
//!   indent plus the hanging indent.
//! - `\n` ends the paragraph.

use std::cell::RefCell;
use std::marker::PhantomData;

use inkmark::{Document, Node, TagNode};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::error::WrapError;

/// Tag character that marks content which must not be broken across lines.
pub const NOWRAP_TAG: char = '+';

/// Layout parameters for [`word_wrap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum line width, in the caller's units. Must be positive.
    pub width: usize,
    /// Extra indent for every wrapped line after the first of a paragraph.
    pub hanging_indent: usize,
    /// Tag character treated as the no-break marker.
    pub nowrap_tag: char,
}

impl WrapOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            hanging_indent: 0,
            nowrap_tag: NOWRAP_TAG,
        }
    }

    pub fn with_hanging_indent(mut self, hanging_indent: usize) -> Self {
        self.hanging_indent = hanging_indent;
        self
    }

    pub fn with_nowrap_tag(mut self, tag: char) -> Self {
        self.nowrap_tag = tag;
        self
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::new(80)
    }
}

/// Word-wrap `doc` to `options.width`.
///
/// The callbacks, all invoked on the calling thread in document order:
///
/// - `measure(state, text)` returns the width of `text` in `state`.
/// - `render(state, text, width)` outputs a placed fragment.
/// - `advance_line(state, new_paragraph, indent)` starts a new line and
///   returns the cursor position on it. `new_paragraph` is true for `\n`
///   (with an indent of zero) and false for breaks forced by the width.
/// - `next_state(state, tag, attribute)` returns the state for the tag's
///   content and a horizontal advance. Unknown tags should return the state
///   unchanged with an advance of zero.
///
/// Returns the largest cursor position reached, i.e. the width of the
/// widest line. Errors from `render` and `advance_line` are returned as-is.
///
/// # Examples
///
/// ```
/// use flow::{WrapError, WrapOptions, word_wrap};
/// use std::cell::RefCell;
///
/// let doc = inkmark::parse("aaaa bbbb cccc").unwrap();
/// let lines = RefCell::new(vec![String::new()]);
/// let width = word_wrap(
///     &doc,
///     (),
///     &WrapOptions::new(9),
///     |_, text| text.chars().count(),
///     |_, text, _| {
///         lines.borrow_mut().last_mut().unwrap().push_str(text);
///         Ok::<_, WrapError>(())
///     },
///     |_, _, indent| {
///         lines.borrow_mut().push(" ".repeat(indent));
///         Ok(indent)
///     },
///     |state, _, _| (*state, 0),
/// )
/// .unwrap();
/// assert_eq!(width, 9);
/// assert_eq!(lines.into_inner(), vec!["aaaa bbbb", "cccc"]);
/// ```
pub fn word_wrap<S, E, M, R, A, N>(
    doc: &Document,
    initial_state: S,
    options: &WrapOptions,
    measure: M,
    render: R,
    advance_line: A,
    next_state: N,
) -> Result<usize, E>
where
    S: Clone,
    E: From<WrapError>,
    M: FnMut(&S, &str) -> usize,
    R: FnMut(&S, &str, usize) -> Result<(), E>,
    A: FnMut(&S, bool, usize) -> Result<usize, E>,
    N: FnMut(&S, char, Option<&str>) -> (S, usize),
{
    if options.width == 0 {
        return Err(WrapError::InvalidWidth.into());
    }

    let mut walker = Walker {
        options,
        measure,
        render,
        advance_line,
        next_state,
        x: 0,
        max_x: 0,
        at_line_start: true,
        paragraph_indent: 0,
        pending: SmallVec::new(),
        pending_width: 0,
        gap: None,
        _error: PhantomData,
    };
    walker.walk_children(doc.root(), &initial_state, false)?;
    walker.flush()?;

    debug!(
        "wrapped {} nodes at width {}: widest line {}",
        doc.node_count(),
        options.width,
        walker.max_x
    );
    Ok(walker.max_x)
}

/// Wrap `doc` as plain text, one unit per `char`, and return the lines.
///
/// Tags other than the no-break tag are ignored. Wrapped lines start with
/// their indent as spaces.
pub fn wrap_to_lines(doc: &Document, options: &WrapOptions) -> Result<Vec<String>, WrapError> {
    let lines = RefCell::new(vec![String::new()]);
    word_wrap(
        doc,
        (),
        options,
        |_, text| text.chars().count(),
        |_, text, _| {
            if let Some(line) = lines.borrow_mut().last_mut() {
                line.push_str(text);
            }
            Ok::<_, WrapError>(())
        },
        |_, _, indent| {
            lines.borrow_mut().push(" ".repeat(indent));
            Ok(indent)
        },
        |_, _, _| ((), 0),
    )?;
    Ok(lines.into_inner())
}

/// A same-state part of a word waiting to be rendered.
struct Piece<'d, S> {
    text: &'d str,
    state: S,
    width: usize,
}

/// What to do with the next fragment of a word.
enum Step {
    /// The fragment fits; buffer it.
    Accept(usize),
    /// Too wide even for an empty line: buffer its longest fitting prefix.
    Split,
    /// Too wide next to the pieces already buffered at the start of a line:
    /// render those pieces and continue on a new line.
    FlushAndBreak,
    /// Does not fit after the text already on this line: move the word to
    /// a new line.
    Break,
}

struct Walker<'o, 'd, S, E, M, R, A, N> {
    options: &'o WrapOptions,
    measure: M,
    render: R,
    advance_line: A,
    next_state: N,
    /// Cursor position on the current line.
    x: usize,
    max_x: usize,
    at_line_start: bool,
    /// Width of the spaces that opened the current paragraph.
    paragraph_indent: usize,
    pending: SmallVec<[Piece<'d, S>; 4]>,
    pending_width: usize,
    /// State of the whitespace before the pending word, used for the gap.
    gap: Option<S>,
    _error: PhantomData<fn() -> E>,
}

impl<'d, S, E, M, R, A, N> Walker<'_, 'd, S, E, M, R, A, N>
where
    S: Clone,
    M: FnMut(&S, &str) -> usize,
    R: FnMut(&S, &str, usize) -> Result<(), E>,
    A: FnMut(&S, bool, usize) -> Result<usize, E>,
    N: FnMut(&S, char, Option<&str>) -> (S, usize),
{
    fn walk_children(&mut self, tag: TagNode<'d>, state: &S, nowrap: bool) -> Result<(), E> {
        for child in tag.children() {
            match child {
                Node::Text(text) => self.text(text.text(), state, nowrap)?,
                Node::Tag(tag) => self.tag(tag, state, nowrap)?,
            }
        }
        Ok(())
    }

    fn tag(&mut self, tag: TagNode<'d>, state: &S, nowrap: bool) -> Result<(), E> {
        match tag.tag() {
            None => self.walk_children(tag, state, nowrap),
            Some(c) if c == self.options.nowrap_tag => self.walk_children(tag, state, true),
            Some(c) => {
                let (next, advance) = (self.next_state)(state, c, tag.attribute());
                self.advance(advance);
                self.walk_children(tag, &next, nowrap)
            }
        }
    }

    fn text(&mut self, text: &'d str, state: &S, nowrap: bool) -> Result<(), E> {
        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            let end = if c == '\n' {
                self.paragraph_break(state)?;
                1
            } else if nowrap {
                let end = rest.find('\n').unwrap_or(rest.len());
                self.place_word(&rest[..end], state)?;
                end
            } else if c.is_whitespace() {
                self.whitespace(c, state)?;
                c.len_utf8()
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                self.place_word(&rest[..end], state)?;
                end
            };
            rest = &rest[end..];
        }
        Ok(())
    }

    fn whitespace(&mut self, c: char, state: &S) -> Result<(), E> {
        self.flush()?;
        if !self.at_line_start {
            self.gap = Some(state.clone());
        } else if c == ' ' {
            let width = (self.measure)(state, " ");
            (self.render)(state, " ", width)?;
            self.paragraph_indent += width;
            self.advance(width);
        }
        Ok(())
    }

    fn paragraph_break(&mut self, state: &S) -> Result<(), E> {
        self.flush()?;
        self.paragraph_indent = 0;
        self.x = (self.advance_line)(state, true, 0)?;
        self.at_line_start = true;
        self.gap = None;
        self.advance(0);
        Ok(())
    }

    fn break_line(&mut self, state: &S) -> Result<(), E> {
        let indent = self.paragraph_indent + self.options.hanging_indent;
        trace!("line full at {}, wrapping with indent {indent}", self.x);
        self.x = (self.advance_line)(state, false, indent)?;
        self.at_line_start = true;
        self.gap = None;
        self.advance(0);
        Ok(())
    }

    fn advance(&mut self, width: usize) {
        self.x += width;
        self.max_x = self.max_x.max(self.x);
    }

    fn step(&mut self, fragment: &str, state: &S) -> Step {
        let width = (self.measure)(state, fragment);
        let limit = self.options.width;
        if self.at_line_start {
            if self.x + self.pending_width + width <= limit {
                Step::Accept(width)
            } else if !self.pending.is_empty() {
                Step::FlushAndBreak
            } else {
                Step::Split
            }
        } else {
            let gap = (self.measure)(self.gap.as_ref().unwrap_or(state), " ");
            if self.x + gap + self.pending_width + width <= limit {
                Step::Accept(width)
            } else {
                Step::Break
            }
        }
    }

    /// Buffer `word` (one same-state part of a word), breaking lines and
    /// splitting it as needed.
    fn place_word(&mut self, word: &'d str, state: &S) -> Result<(), E> {
        let mut rest = word;
        while !rest.is_empty() {
            match self.step(rest, state) {
                Step::Accept(width) => {
                    self.push_piece(rest, state, width);
                    rest = "";
                }
                Step::Split => {
                    let (head, width) = self.longest_fitting_prefix(rest, state);
                    trace!("splitting oversized word {rest:?} after {} bytes", head.len());
                    self.push_piece(head, state, width);
                    rest = &rest[head.len()..];
                }
                Step::FlushAndBreak => {
                    self.flush()?;
                    self.break_line(state)?;
                }
                Step::Break => self.break_line(state)?,
            }
        }
        Ok(())
    }

    /// Halving search for the longest prefix of `fragment` that fits on the
    /// current (empty) line. A single character is always accepted, so a
    /// fragment wider than the whole line still makes progress.
    fn longest_fitting_prefix(&mut self, fragment: &'d str, state: &S) -> (&'d str, usize) {
        let ends: SmallVec<[usize; 32]> = fragment
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        let limit = self.options.width;

        // `lo` is always acceptable, `hi` never fits.
        let mut lo = 0;
        let mut hi = ends.len() - 1;
        let mut lo_width = (self.measure)(state, &fragment[..ends[lo]]);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            let width = (self.measure)(state, &fragment[..ends[mid]]);
            if self.x + width <= limit {
                lo = mid;
                lo_width = width;
            } else {
                hi = mid;
            }
        }
        (&fragment[..ends[lo]], lo_width)
    }

    fn push_piece(&mut self, text: &'d str, state: &S, width: usize) {
        self.pending.push(Piece {
            text,
            state: state.clone(),
            width,
        });
        self.pending_width += width;
    }

    /// Render the buffered word, preceded by a space unless it opens the
    /// line.
    fn flush(&mut self) -> Result<(), E> {
        if self.pending.is_empty() {
            return Ok(());
        }
        if !self.at_line_start {
            let gap = match self.gap.take() {
                Some(gap) => gap,
                None => self.pending[0].state.clone(),
            };
            let width = (self.measure)(&gap, " ");
            (self.render)(&gap, " ", width)?;
            self.advance(width);
        }
        for piece in std::mem::take(&mut self.pending) {
            (self.render)(&piece.state, piece.text, piece.width)?;
            self.advance(piece.width);
        }
        self.pending_width = 0;
        self.at_line_start = false;
        self.gap = None;
        Ok(())
    }
}
