//! Escaping of literal text for inclusion in markup.

/// Make `text` safe to embed in markup.
///
/// Every `[` becomes `[(]` and every `]` becomes `[)]`; nothing else
/// changes. Parsing the result yields `text` back as plain content.
///
/// # Examples
///
/// ```
/// use inkmark::escape;
///
/// assert_eq!(escape("a[1]"), "a[(]1[)]");
/// ```
pub fn escape(text: &str) -> String {
    let extra = text.matches(['[', ']']).count() * 2;
    let mut out = String::with_capacity(text.len() + extra);
    for c in text.chars() {
        match c {
            '[' => out.push_str("[(]"),
            ']' => out.push_str("[)]"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape("hello world"), "hello world");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn escapes_both_brackets() {
        assert_eq!(escape("[x]"), "[(]x[)]");
        assert_eq!(escape("]["), "[)][(]");
    }

    #[test]
    fn escaped_text_parses_back() {
        for text in ["[", "]]", "a [b] c", "[<x>*]", "[ ]"] {
            let doc = parse(&escape(text)).unwrap();
            assert_eq!(doc.text(), text);
            assert!(doc.root().child_count() <= 1);
        }
    }
}
