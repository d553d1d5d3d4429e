//! Read-only tree abstraction the scanner runs over.
//!
//! [`Node`] is the only thing a host tree has to provide. [`ScanTree`] indexes
//! one subtree in document order and adds the navigation the heuristics need
//! (parent, siblings, descendants, same-tag position) without requiring the
//! host nodes to carry back-references.

/// Minimal read-only view of one element
pub trait Node {
    /// Lower-case tag name
    fn tag(&self) -> &str;

    /// Attribute value by lower-case name
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Element children in document order (text is not an element)
    fn children(&self) -> Vec<&dyn Node>;

    /// Concatenated text of the element and all its descendants
    fn text_content(&self) -> String;

    /// Attribute is present, whatever its value
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Attribute value, trimmed, only when non-empty
    fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Whitespace-separated tokens of the `class` attribute
    fn class_tokens(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check the tag name, ignoring ASCII case
    fn is_tag(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }
}

/// Position of an element inside a [`ScanTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

struct Entry<'a> {
    node: &'a dyn Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// One past the last descendant; descendants are contiguous in preorder
    end: usize,
}

/// Document-order index over one subtree
pub struct ScanTree<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> ScanTree<'a> {
    /// Index `root` and everything below it
    #[must_use]
    pub fn build(root: &'a dyn Node) -> Self {
        let mut tree = Self {
            entries: Vec::new(),
        };
        tree.push(root, None);
        tree
    }

    fn push(&mut self, node: &'a dyn Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            node,
            parent,
            children: Vec::new(),
            end: id.0 + 1,
        });

        for child in node.children() {
            let child_id = self.push(child, Some(id));
            self.entries[id.0].children.push(child_id);
        }

        self.entries[id.0].end = self.entries.len();
        id
    }

    /// The indexed root
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of indexed elements, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Element behind an id
    #[must_use]
    pub fn node(&self, id: NodeId) -> &'a dyn Node {
        self.entries[id.0].node
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    /// Strict descendants in document order
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (id.0 + 1..self.entries[id.0].end).map(NodeId)
    }

    /// Descendants of the root in document order, root excluded
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root())
    }

    /// Descendants of the root carrying `tag`, in document order
    pub fn elements_by_tag<'t>(&'t self, tag: &'t str) -> impl Iterator<Item = NodeId> + 't {
        self.elements().filter(move |id| self.node(*id).is_tag(tag))
    }

    /// Preceding siblings, nearest first
    pub fn previous_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|s| *s == id).unwrap_or(0);
        siblings[..position].iter().rev().copied()
    }

    /// Following element sibling
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|s| *s == id)?;
        siblings.get(position + 1).copied()
    }

    /// 1-based index among same-tag siblings; 1 for the root
    #[must_use]
    pub fn nth_of_type(&self, id: NodeId) -> usize {
        let tag = self.node(id).tag();
        let before = self
            .previous_siblings(id)
            .filter(|s| self.node(*s).is_tag(tag))
            .count();
        before + 1
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &[],
        }
    }
}
