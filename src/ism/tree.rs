//! Arena-backed element tree
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. Each element keeps
//! its leading `text` and the `tail` text that follows its closing tag inside the parent,
//! which is how mixed content such as `text <a>link</a> trailing text` is represented.

/// Stable index of an element in an [`XmlTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub tail: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Element {
            name,
            attributes: Vec::new(),
            text: String::new(),
            tail: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlTree {
    nodes: Vec<Element>,
}

impl XmlTree {
    pub fn new(root: impl Into<String>) -> Self {
        XmlTree {
            nodes: vec![Element::new(root.into(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Append a new empty element as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(name.into(), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_text(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> NodeId {
        let id = self.append(parent, name);
        self.nodes[id.0].text = text.into();
        id
    }

    /// Set an attribute, replacing any existing value for the same key
    pub fn set_attribute(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let attributes = &mut self.nodes[id.0].attributes;
        match attributes.iter_mut().find(|(name, _)| *name == key) {
            Some(existing) => existing.1 = value,
            None => attributes.push((key, value)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// First direct child with the given name
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.get(child).name == name)
    }

    /// Every element below `id` in document order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Every element with the given name, in document order
    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        let root = self.root();
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&id| self.get(id).name == name)
            .collect()
    }
}
