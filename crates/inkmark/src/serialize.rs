//! Reconstructs markup source from a parse tree.

use crate::escape::escape;
use crate::tree::{Document, Node, TagNode};

/// Serialize a node (and everything below it) back into markup.
///
/// Tag nodes are written as `[<attribute>tag...]`, the root contributes only
/// its children, and text is escaped. Parsing the output yields a tree equal
/// to the one serialized.
///
/// # Examples
///
/// ```
/// use inkmark::{parse, serialize};
/// use inkmark::tree::Node;
///
/// let doc = parse("[<red>c [(]hot[)]]").unwrap();
/// assert_eq!(serialize(Node::Tag(doc.root())), "[<red>c [(]hot[)]]");
/// ```
pub fn serialize(node: Node<'_>) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a whole document.
pub fn serialize_document(doc: &Document) -> String {
    serialize(Node::Tag(doc.root()))
}

fn write_node(node: Node<'_>, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text.text())),
        Node::Tag(tag) => write_tag(tag, out),
    }
}

fn write_tag(tag: TagNode<'_>, out: &mut String) {
    let Some(c) = tag.tag() else {
        for child in tag.children() {
            write_node(child, out);
        }
        return;
    };

    out.push('[');
    if let Some(attribute) = tag.attribute() {
        out.push('<');
        out.push_str(attribute);
        out.push('>');
    }
    out.push(c);
    for child in tag.children() {
        write_node(child, out);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn roundtrip(input: &str) -> String {
        serialize_document(&parse(input).unwrap())
    }

    #[test]
    fn plain_text() {
        assert_eq!(roundtrip("hello"), "hello");
        assert_eq!(roundtrip(""), "");
    }

    #[test]
    fn tags_and_attributes() {
        assert_eq!(roundtrip("a [*b [<1>/c]] d"), "a [*b [<1>/c]] d");
    }

    #[test]
    fn bracket_group_becomes_escapes() {
        assert_eq!(roundtrip("[ x]"), "[(]x[)]");
        assert_eq!(roundtrip("a[ b[*c]d]e"), "a[(]b[*c]d[)]e");
    }

    #[test]
    fn serialize_subtree() {
        let doc = parse("x[*y[/z]]").unwrap();
        let bold = doc.root().children().nth(1).unwrap();
        assert_eq!(serialize(bold), "[*y[/z]]");
    }

    #[test]
    fn output_reparses_to_equal_tree() {
        for input in ["[ [*c]]", "[+a b] [(]", "[<>x]", "[[]", "[]x]"] {
            let doc = parse(input).unwrap();
            let again = parse(&serialize_document(&doc)).unwrap();
            assert_eq!(doc, again, "input {input:?}");
        }
    }
}
