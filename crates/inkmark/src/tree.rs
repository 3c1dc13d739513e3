//! Parse tree for bracket markup.
//!
//! A [`Document`] owns every node in a flat arena. Tag nodes list their
//! children by [`NodeId`]; every node records its parent the same way, so the
//! tree can be walked in both directions without reference cycles.
//!
//! Consumers see the tree through borrowed views ([`Node`], [`TagNode`],
//! [`TextNode`]). Once the parser returns a document it is never mutated
//! again, which makes it safe to share between threads.

use std::fmt;

/// Handle of a node inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root tag of every document.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Clone, Debug)]
enum NodeData {
    Text(String),
    Tag {
        tag: Option<char>,
        attribute: Option<String>,
        children: Vec<NodeId>,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    data: NodeData,
    index: usize,
    parent: Option<NodeId>,
}

/// A parsed markup document.
///
/// Equality compares structure, tag characters, attributes and text; source
/// offsets are ignored, so `[ x]` and `[(]x[)]` produce equal documents.
#[derive(Clone)]
pub struct Document {
    slots: Vec<Slot>,
}

impl Document {
    /// Create a document containing only the root tag.
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot {
                data: NodeData::Tag {
                    tag: None,
                    attribute: None,
                    children: Vec::new(),
                },
                index: 0,
                parent: None,
            }],
        }
    }

    /// Attach a text leaf as the last child of `parent`.
    pub(crate) fn add_text(&mut self, parent: NodeId, text: String, index: usize) -> NodeId {
        self.attach(parent, NodeData::Text(text), index)
    }

    /// Attach an empty tag node as the last child of `parent`.
    pub(crate) fn add_tag(
        &mut self,
        parent: NodeId,
        tag: char,
        attribute: Option<String>,
        index: usize,
    ) -> NodeId {
        let data = NodeData::Tag {
            tag: Some(tag),
            attribute,
            children: Vec::new(),
        };
        self.attach(parent, data, index)
    }

    fn attach(&mut self, parent: NodeId, data: NodeData, index: usize) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            data,
            index,
            parent: Some(parent),
        });
        match &mut self.slots[parent.0].data {
            NodeData::Tag { children, .. } => children.push(id),
            NodeData::Text(_) => unreachable!("text node {parent:?} cannot own children"),
        }
        id
    }

    /// The root tag node. It has no tag character and no attribute.
    pub fn root(&self) -> TagNode<'_> {
        TagNode {
            doc: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        let slot = self.slots.get(id.0)?;
        Some(match slot.data {
            NodeData::Text(_) => Node::Text(TextNode { doc: self, id }),
            NodeData::Tag { .. } => Node::Tag(TagNode { doc: self, id }),
        })
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.root().child_count() == 0
    }

    /// The text-only content of the whole document (all tags stripped).
    pub fn text(&self) -> String {
        self.root().text()
    }

    /// Iterate over every node below the root in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.root().child_ids().to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Compare two documents ignoring source offsets.
    pub fn structurally_eq(&self, other: &Document) -> bool {
        Node::Tag(self.root()).structurally_eq(&Node::Tag(other.root()))
    }

    fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.0]
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.root(), f)
    }
}

/// A borrowed view of any node.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Text(TextNode<'a>),
    Tag(TagNode<'a>),
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Text(t) => t.id,
            Node::Tag(t) => t.id,
        }
    }

    /// Byte offset where this node starts in the source.
    pub fn index(&self) -> usize {
        match self {
            Node::Text(t) => t.index(),
            Node::Tag(t) => t.index(),
        }
    }

    pub fn parent(&self) -> Option<TagNode<'a>> {
        match self {
            Node::Text(t) => t.parent(),
            Node::Tag(t) => t.parent(),
        }
    }

    /// Text-only content of this node and everything below it.
    pub fn text(&self) -> String {
        match self {
            Node::Text(t) => t.text().to_string(),
            Node::Tag(t) => t.text(),
        }
    }

    pub fn as_text(&self) -> Option<TextNode<'a>> {
        match *self {
            Node::Text(t) => Some(t),
            Node::Tag(_) => None,
        }
    }

    pub fn as_tag(&self) -> Option<TagNode<'a>> {
        match *self {
            Node::Tag(t) => Some(t),
            Node::Text(_) => None,
        }
    }

    fn structurally_eq(&self, other: &Node<'_>) -> bool {
        let mut pairs = vec![(*self, *other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Text(a), Node::Text(b)) => {
                    if a.text() != b.text() {
                        return false;
                    }
                }
                (Node::Tag(a), Node::Tag(b)) => {
                    if a.tag() != b.tag()
                        || a.attribute() != b.attribute()
                        || a.child_count() != b.child_count()
                    {
                        return false;
                    }
                    pairs.extend(a.children().zip(b.children()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(t) => fmt::Debug::fmt(t, f),
            Node::Tag(t) => fmt::Debug::fmt(t, f),
        }
    }
}

/// A literal text leaf.
#[derive(Clone, Copy)]
pub struct TextNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> TextNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &'a str {
        match &self.doc.slot(self.id).data {
            NodeData::Text(text) => text,
            NodeData::Tag { .. } => "",
        }
    }

    pub fn index(&self) -> usize {
        self.doc.slot(self.id).index
    }

    pub fn parent(&self) -> Option<TagNode<'a>> {
        parent_of(self.doc, self.id)
    }
}

impl fmt::Debug for TextNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Text").field(&self.text()).finish()
    }
}

/// A tag with its children. The document root is a tag without a character.
#[derive(Clone, Copy)]
pub struct TagNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> TagNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tag character, `None` for the root.
    pub fn tag(&self) -> Option<char> {
        match self.doc.slot(self.id).data {
            NodeData::Tag { tag, .. } => tag,
            NodeData::Text(_) => None,
        }
    }

    /// The attribute written between `<` and `>`, if any.
    pub fn attribute(&self) -> Option<&'a str> {
        match &self.doc.slot(self.id).data {
            NodeData::Tag { attribute, .. } => attribute.as_deref(),
            NodeData::Text(_) => None,
        }
    }

    pub fn index(&self) -> usize {
        self.doc.slot(self.id).index
    }

    pub fn parent(&self) -> Option<TagNode<'a>> {
        parent_of(self.doc, self.id)
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    pub fn child_count(&self) -> usize {
        self.child_ids().len()
    }

    pub fn children(&self) -> Children<'a> {
        Children {
            doc: self.doc,
            ids: self.child_ids().iter(),
        }
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self.doc, self.id, &mut out);
        out
    }

    fn child_ids(&self) -> &'a [NodeId] {
        match &self.doc.slot(self.id).data {
            NodeData::Tag { children, .. } => children,
            NodeData::Text(_) => &[],
        }
    }
}

impl fmt::Debug for TagNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Tag");
        if let Some(tag) = self.tag() {
            s.field("tag", &tag);
        }
        if let Some(attribute) = self.attribute() {
            s.field("attribute", &attribute);
        }
        s.field("children", &self.children().collect::<Vec<_>>());
        s.finish()
    }
}

fn parent_of(doc: &Document, id: NodeId) -> Option<TagNode<'_>> {
    doc.slot(id).parent.map(|id| TagNode { doc, id })
}

fn collect_text(doc: &Document, id: NodeId, out: &mut String) {
    let mut stack = vec![id];
    while let Some(id) = stack.pop() {
        match &doc.slot(id).data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Tag { children, .. } => stack.extend(children.iter().rev()),
        }
    }
}

/// Iterator over the children of a tag node.
pub struct Children<'a> {
    doc: &'a Document,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        self.doc.node(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        self.doc.node(id)
    }
}

/// Depth-first, document-order iterator over all nodes below the root.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.doc.node(id)?;
        if let Node::Tag(tag) = node {
            self.stack.extend(tag.child_ids().iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        // "ab[*cd[/e]]f"
        let mut doc = Document::new();
        doc.add_text(NodeId::ROOT, "ab".into(), 0);
        let bold = doc.add_tag(NodeId::ROOT, '*', None, 2);
        doc.add_text(bold, "cd".into(), 4);
        let italic = doc.add_tag(bold, '/', Some("x".into()), 6);
        doc.add_text(italic, "e".into(), 8);
        doc.add_text(NodeId::ROOT, "f".into(), 11);
        doc
    }

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.node_count(), 1);
        assert!(doc.root().is_root());
        assert_eq!(doc.root().tag(), None);
        assert!(doc.root().parent().is_none());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn text_only_content() {
        let doc = sample();
        assert_eq!(doc.text(), "abcdef");
        let bold = doc.root().children().nth(1).and_then(|n| n.as_tag()).unwrap();
        assert_eq!(bold.text(), "cde");
    }

    #[test]
    fn parents_point_back() {
        let doc = sample();
        for node in doc.descendants() {
            let parent = node.parent().unwrap();
            assert!(parent.children().any(|c| c.id() == node.id()));
        }
    }

    #[test]
    fn descendants_in_document_order() {
        let doc = sample();
        let order: Vec<usize> = doc.descendants().map(|n| n.index()).collect();
        assert_eq!(order, vec![0, 2, 4, 6, 8, 11]);
    }

    #[test]
    fn attribute_and_tag() {
        let doc = sample();
        let italic = doc
            .descendants()
            .filter_map(|n| n.as_tag())
            .find(|t| t.tag() == Some('/'))
            .unwrap();
        assert_eq!(italic.attribute(), Some("x"));
        assert_eq!(italic.parent().and_then(|p| p.tag()), Some('*'));
    }

    #[test]
    fn equality_ignores_offsets() {
        let mut a = Document::new();
        a.add_text(NodeId::ROOT, "[x]".into(), 0);
        let mut b = Document::new();
        b.add_text(NodeId::ROOT, "[x]".into(), 3);
        assert_eq!(a, b);

        let mut c = Document::new();
        c.add_text(NodeId::ROOT, "[y]".into(), 0);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_output() {
        let mut doc = Document::new();
        let tag = doc.add_tag(NodeId::ROOT, '*', None, 0);
        doc.add_text(tag, "hi".into(), 2);
        assert_eq!(
            format!("{doc:?}"),
            r#"Tag { children: [Tag { tag: '*', children: [Text("hi")] }] }"#
        );
    }
}
