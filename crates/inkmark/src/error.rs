//! Error types for markup parsing.

use thiserror::Error;

/// Errors that can occur when parsing markup.
///
/// Every variant records the byte offset of the offending construct. Errors
/// about unterminated constructs also record where that construct began.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `[` opened a tag that is never closed.
    #[error("closing bracket missing for tag opened at position {first_index}")]
    MissingClosingBracket { index: usize, first_index: usize },

    /// `]` with no open tag to close.
    #[error("unexpected closing bracket at position {index}")]
    UnexpectedClosingBracket { index: usize },

    /// `[` (optionally followed by an attribute) at the very end of the input.
    #[error("tag character expected at position {index}")]
    MissingTagCharacter { index: usize, first_index: usize },

    /// `<` without a matching `>`.
    #[error("closing '>' missing for attribute starting at position {first_index}")]
    UnterminatedAttribute { index: usize, first_index: usize },

    /// `<`, `[` or `]` inside an attribute.
    #[error("invalid character {character:?} in attribute at position {index}")]
    InvalidAttributeCharacter {
        index: usize,
        first_index: usize,
        character: char,
    },

    /// A second `<` where the tag character should follow an attribute.
    #[error("tag at position {first_index} has more than one attribute")]
    AttributeAfterAttribute { index: usize, first_index: usize },
}

impl ParseError {
    /// Byte offset of the erroneous construct.
    pub fn index(&self) -> usize {
        match *self {
            ParseError::MissingClosingBracket { index, .. }
            | ParseError::UnexpectedClosingBracket { index }
            | ParseError::MissingTagCharacter { index, .. }
            | ParseError::UnterminatedAttribute { index, .. }
            | ParseError::InvalidAttributeCharacter { index, .. }
            | ParseError::AttributeAfterAttribute { index, .. } => index,
        }
    }

    /// Length in bytes of the erroneous construct (zero at end of input).
    pub fn length(&self) -> usize {
        match *self {
            ParseError::MissingClosingBracket { .. } | ParseError::MissingTagCharacter { .. } => 0,
            ParseError::UnterminatedAttribute { .. } => 0,
            ParseError::InvalidAttributeCharacter { character, .. } => character.len_utf8(),
            ParseError::UnexpectedClosingBracket { .. }
            | ParseError::AttributeAfterAttribute { .. } => 1,
        }
    }

    /// Offset of the construct that was left open, if any.
    pub fn first_index(&self) -> Option<usize> {
        match *self {
            ParseError::MissingClosingBracket { first_index, .. }
            | ParseError::MissingTagCharacter { first_index, .. }
            | ParseError::UnterminatedAttribute { first_index, .. }
            | ParseError::InvalidAttributeCharacter { first_index, .. }
            | ParseError::AttributeAfterAttribute { first_index, .. } => Some(first_index),
            ParseError::UnexpectedClosingBracket { .. } => None,
        }
    }

    /// Convert [`index`](Self::index) into a 1-based `(line, column)` pair
    /// within `input`. Columns count characters, not bytes.
    pub fn line_col(&self, input: &str) -> (usize, usize) {
        let offset = self.index().min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let err = ParseError::MissingClosingBracket {
            index: 6,
            first_index: 0,
        };
        assert_eq!(err.index(), 6);
        assert_eq!(err.length(), 0);
        assert_eq!(err.first_index(), Some(0));

        let err = ParseError::UnexpectedClosingBracket { index: 3 };
        assert_eq!(err.length(), 1);
        assert_eq!(err.first_index(), None);
    }

    #[test]
    fn line_col_counts_characters() {
        let err = ParseError::UnexpectedClosingBracket { index: 7 };
        assert_eq!(err.line_col("ab\ncdé]"), (2, 4));

        let err = ParseError::UnexpectedClosingBracket { index: 9 };
        assert_eq!(err.line_col("abcdefgh ]"), (1, 10));
    }

    #[test]
    fn display_mentions_positions() {
        let err = ParseError::MissingClosingBracket {
            index: 6,
            first_index: 0,
        };
        assert_eq!(
            err.to_string(),
            "closing bracket missing for tag opened at position 0"
        );
    }
}
