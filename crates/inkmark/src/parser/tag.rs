//! Tag header parser.
//!
//! Parses what follows an opening `[`: an optional `<attribute>` and the
//! single tag character.

use crate::error::ParseError;

/// The parsed header of a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TagHeader {
    /// The tag character.
    pub tag: char,
    /// Text between `<` and `>`, if present.
    pub attribute: Option<String>,
    /// Byte offset just past the tag character, where the body starts.
    pub body_start: usize,
}

impl TagHeader {
    /// Parse the header of the tag whose `[` sits at byte offset `open`.
    ///
    /// `open` must be the offset of a `[` found by the scanner.
    pub(crate) fn parse(input: &str, open: usize) -> Result<Self, ParseError> {
        debug_assert!(input[open..].starts_with('['));
        let mut cursor = open + 1;
        let mut attribute = None;

        if input[cursor..].starts_with('<') {
            let (value, end) = Self::parse_attribute(input, cursor)?;
            attribute = Some(value);
            cursor = end;
        }

        let Some(tag) = input[cursor..].chars().next() else {
            return Err(ParseError::MissingTagCharacter {
                index: input.len(),
                first_index: open,
            });
        };

        if tag == '<' {
            return Err(ParseError::AttributeAfterAttribute {
                index: cursor,
                first_index: open,
            });
        }

        Ok(Self {
            tag,
            attribute,
            body_start: cursor + tag.len_utf8(),
        })
    }

    /// Parse `<...>` starting at `lt`. Returns the attribute and the offset
    /// just past the closing `>`.
    fn parse_attribute(input: &str, lt: usize) -> Result<(String, usize), ParseError> {
        let start = lt + 1;
        let rest = &input[start..];

        match rest.find(['<', '[', ']', '>']) {
            Some(i) if rest[i..].starts_with('>') => {
                Ok((rest[..i].to_string(), start + i + 1))
            }
            Some(i) => {
                let character = rest[i..].chars().next().unwrap_or('<');
                Err(ParseError::InvalidAttributeCharacter {
                    index: start + i,
                    first_index: lt,
                    character,
                })
            }
            None => Err(ParseError::UnterminatedAttribute {
                index: input.len(),
                first_index: lt,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tag() {
        let header = TagHeader::parse("[*bold]", 0).unwrap();
        assert_eq!(header.tag, '*');
        assert_eq!(header.attribute, None);
        assert_eq!(header.body_start, 2);
    }

    #[test]
    fn tag_with_attribute() {
        let header = TagHeader::parse("ab[<x y>/z]", 2).unwrap();
        assert_eq!(header.tag, '/');
        assert_eq!(header.attribute.as_deref(), Some("x y"));
        assert_eq!(header.body_start, 9);
    }

    #[test]
    fn color_attribute() {
        let header = TagHeader::parse("[<red>c text]", 0).unwrap();
        assert_eq!(header.tag, 'c');
        assert_eq!(header.attribute.as_deref(), Some("red"));
        assert_eq!(header.body_start, 7);
    }

    #[test]
    fn bracket_after_multibyte_text() {
        let err = TagHeader::parse("é[", 2).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingTagCharacter {
                index: 3,
                first_index: 2
            }
        );
        let header = TagHeader::parse("日[*x]", 3).unwrap();
        assert_eq!(header.body_start, 5);
    }

    #[test]
    fn empty_attribute() {
        let header = TagHeader::parse("[<>c]", 0).unwrap();
        assert_eq!(header.attribute.as_deref(), Some(""));
        assert_eq!(header.tag, 'c');
    }

    #[test]
    fn multibyte_tag() {
        let header = TagHeader::parse("[•item]", 0).unwrap();
        assert_eq!(header.tag, '•');
        assert_eq!(header.body_start, 1 + '•'.len_utf8());
    }

    #[test]
    fn unterminated_attribute() {
        let err = TagHeader::parse("[<abc", 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedAttribute {
                index: 5,
                first_index: 1
            }
        );
    }

    #[test]
    fn forbidden_attribute_characters() {
        for (input, bad) in [("[<a[b>c]", '['), ("[<a]b>c]", ']'), ("[<a<b>c]", '<')] {
            let err = TagHeader::parse(input, 0).unwrap_err();
            assert_eq!(
                err,
                ParseError::InvalidAttributeCharacter {
                    index: 3,
                    first_index: 1,
                    character: bad
                }
            );
        }
    }

    #[test]
    fn missing_tag_character() {
        let err = TagHeader::parse("x[", 1).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingTagCharacter {
                index: 2,
                first_index: 1
            }
        );

        let err = TagHeader::parse("[<a>", 0).unwrap_err();
        assert_eq!(err.first_index(), Some(0));
    }

    #[test]
    fn second_attribute() {
        let err = TagHeader::parse("[<a><b>c]", 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::AttributeAfterAttribute {
                index: 4,
                first_index: 0
            }
        );
    }
}
