//! Main markup scanner.
//!
//! A single forward scan over the input with an explicit stack of open tags.
//! Tags are collected into owned fragments while they are open and copied
//! into the [`Document`] arena once the whole input has been accepted, so an
//! error never leaves a half-built document behind. Nothing here recurses on
//! nesting depth.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::error::ParseError;
use crate::tree::{Document, NodeId};

use super::tag::TagHeader;

/// Tag character that wraps its content in a literal bracket pair.
const BRACKET_GROUP: char = ' ';
/// Tag characters that stand for a literal `[` and `]`.
const LITERAL_OPEN: char = '(';
const LITERAL_CLOSE: char = ')';

/// Parses markup into a [`Document`].
///
/// # Examples
///
/// ```
/// use inkmark::parser::parse;
///
/// let doc = parse("Hello [*World]").unwrap();
/// assert_eq!(doc.text(), "Hello World");
/// assert_eq!(doc.root().child_count(), 2);
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    scan(input).inspect_err(|err| debug!("markup rejected: {err}"))
}

fn scan(input: &str) -> Result<Document, ParseError> {
    let mut parser = Parser::new(input);
    let mut pos = 0;

    while let Some(offset) = input[pos..].find(['[', ']']) {
        let at = pos + offset;
        parser.push_text(&input[pos..at], pos);
        pos = match input.as_bytes()[at] {
            b'[' => parser.open_tag(at)?,
            b']' => parser.close_tag(at)?,
            other => unreachable!("scanner stopped on {:?} at {at}", other as char),
        };
    }

    parser.push_text(&input[pos..], pos);
    parser.finish()
}

/// A tag whose closing bracket has not been seen yet.
#[derive(Debug)]
struct OpenTag {
    tag: Option<char>,
    attribute: Option<String>,
    index: usize,
    children: Vec<Fragment>,
}

impl OpenTag {
    fn root() -> Self {
        Self {
            tag: None,
            attribute: None,
            index: 0,
            children: Vec::new(),
        }
    }
}

/// A finished child of an open tag.
///
/// A closed tag refers to its children by position in `Parser::bodies`
/// instead of owning them, so fragments never nest.
#[derive(Debug)]
enum Fragment {
    Text {
        text: String,
        index: usize,
    },
    Tag {
        tag: char,
        attribute: Option<String>,
        index: usize,
        body: usize,
    },
}

/// The scanner state.
struct Parser<'a> {
    input: &'a str,
    /// The innermost open tag (the root when nothing is open).
    current: OpenTag,
    /// Ancestors of `current`, outermost first.
    stack: Vec<OpenTag>,
    /// Children of closed tags, indexed by `Fragment::Tag::body`.
    bodies: Vec<Vec<Fragment>>,
    /// Literal text not yet attached to `current`.
    pending: String,
    /// Source offset of the first byte of `pending`.
    pending_index: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            current: OpenTag::root(),
            stack: Vec::new(),
            bodies: Vec::new(),
            pending: String::new(),
            pending_index: 0,
        }
    }

    /// Append literal source text found at `at`.
    fn push_text(&mut self, text: &str, at: usize) {
        if text.is_empty() {
            return;
        }
        if self.pending.is_empty() {
            self.pending_index = at;
        }
        self.pending.push_str(text);
    }

    /// Attach pending text to the current tag, merging with a trailing text
    /// child so that text siblings are never adjacent.
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        match self.current.children.last_mut() {
            Some(Fragment::Text { text: last, .. }) => last.push_str(&text),
            _ => self.current.children.push(Fragment::Text {
                text,
                index: self.pending_index,
            }),
        }
    }

    /// Move the current tag's trailing text child back into `pending` so
    /// that literal text produced by a closing escape joins it.
    fn reclaim_trailing_text(&mut self, fallback_index: usize) {
        debug_assert!(self.pending.is_empty());
        match self.current.children.pop() {
            Some(Fragment::Text { text, index }) => {
                self.pending = text;
                self.pending_index = index;
            }
            Some(other) => {
                self.current.children.push(other);
                self.pending_index = fallback_index;
            }
            None => self.pending_index = fallback_index,
        }
    }

    /// Handle `[` at `at`. Returns the offset where scanning resumes.
    fn open_tag(&mut self, at: usize) -> Result<usize, ParseError> {
        self.flush();
        let header = TagHeader::parse(self.input, at)?;
        trace!("open tag {:?} at {at}", header.tag);

        let tag = OpenTag {
            tag: Some(header.tag),
            attribute: header.attribute,
            index: at,
            children: Vec::new(),
        };
        let parent = std::mem::replace(&mut self.current, tag);
        self.stack.push(parent);
        Ok(header.body_start)
    }

    /// Handle `]` at `at`. Returns the offset where scanning resumes.
    fn close_tag(&mut self, at: usize) -> Result<usize, ParseError> {
        let Some(parent) = self.stack.pop() else {
            return Err(ParseError::UnexpectedClosingBracket { index: at });
        };
        self.flush();
        let closed = std::mem::replace(&mut self.current, parent);
        trace!("close tag {:?} opened at {}", closed.tag, closed.index);

        match closed.tag {
            Some(LITERAL_OPEN) => self.literal_bracket('[', closed.index),
            Some(LITERAL_CLOSE) => self.literal_bracket(']', closed.index),
            Some(BRACKET_GROUP) => self.splice_bracket_group(closed, at),
            Some(tag) => {
                let body = self.bodies.len();
                self.bodies.push(closed.children);
                self.current.children.push(Fragment::Tag {
                    tag,
                    attribute: closed.attribute,
                    index: closed.index,
                    body,
                });
            }
            None => unreachable!("the root tag is never on the stack"),
        }
        Ok(at + 1)
    }

    /// Replace an escape tag by its literal bracket.
    fn literal_bracket(&mut self, bracket: char, index: usize) {
        self.reclaim_trailing_text(index);
        self.pending.push(bracket);
    }

    /// Replace `[ ...]` by its content surrounded with literal brackets.
    ///
    /// The `[` joins the parent's trailing text and the group's leading
    /// text; the `]` joins the group's trailing text and stays pending so
    /// that whatever follows in the source merges with it.
    fn splice_bracket_group(&mut self, group: OpenTag, close: usize) {
        self.reclaim_trailing_text(group.index);
        self.pending.push('[');

        let mut children = VecDeque::from(group.children);
        match children.pop_front() {
            Some(Fragment::Text { text, .. }) => self.pending.push_str(&text),
            Some(other) => children.push_front(other),
            None => {}
        }

        if children.is_empty() {
            self.pending.push(']');
            return;
        }

        let tail = match children.pop_back() {
            Some(Fragment::Text { text, index }) => Some((text, index)),
            Some(other) => {
                children.push_back(other);
                None
            }
            None => None,
        };

        self.flush();
        self.current.children.extend(children);
        match tail {
            Some((text, index)) => {
                self.pending = text;
                self.pending_index = index;
            }
            None => self.pending_index = close,
        }
        self.pending.push(']');
    }

    /// Close the scan at end of input.
    fn finish(mut self) -> Result<Document, ParseError> {
        if !self.stack.is_empty() {
            return Err(ParseError::MissingClosingBracket {
                index: self.input.len(),
                first_index: self.current.index,
            });
        }
        self.flush();

        Ok(build(self.current.children, self.bodies))
    }
}

/// Copy the fragments into a new arena in document order.
fn build(top: Vec<Fragment>, mut bodies: Vec<Vec<Fragment>>) -> Document {
    let mut doc = Document::new();
    let mut work = vec![(NodeId::ROOT, top.into_iter())];

    while let Some((parent, fragments)) = work.last_mut() {
        let parent = *parent;
        let Some(fragment) = fragments.next() else {
            work.pop();
            continue;
        };
        match fragment {
            Fragment::Text { text, index } => {
                doc.add_text(parent, text, index);
            }
            Fragment::Tag {
                tag,
                attribute,
                index,
                body,
            } => {
                let id = doc.add_tag(parent, tag, attribute, index);
                let children = std::mem::take(&mut bodies[body]);
                work.push((id, children.into_iter()));
            }
        }
    }
    doc
}
