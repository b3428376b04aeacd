use core_types::ComputedStyle;

pub type NodeId = u32;

/// Arena handle of a node inside its owning `Document`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const ROOT: Id = Id(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tag attribute. Tags keep attributes in source order, duplicates included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// First attribute named `name`, if any.
pub fn attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| attr.value.as_str())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// One input character outside of markup.
    Text(char),
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub style: ComputedStyle,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            style: ComputedStyle::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: Id,
    /// Back reference into the owning arena; `None` only for the root.
    pub parent: Option<Id>,
    pub children: Vec<Id>,
    pub data: NodeData,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
}

/// Arena-backed document tree. `Id::ROOT` is the synthetic document node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: Id::ROOT,
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    pub fn root(&self) -> Id {
        Id::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Panics on ids from another document.
    pub fn node(&self, id: Id) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: Id) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn element(&self, id: Id) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: Id) -> Option<&mut Element> {
        self.nodes.get_mut(id.index()).and_then(Node::as_element_mut)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        &self.node(id).children
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.node(id).parent
    }

    /// Direct children that are elements, in document order.
    pub fn element_children(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    pub fn append(&mut self, parent: Id, data: NodeData) -> Id {
        let id = Id(self.nodes.len() as NodeId);
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn push_text(&mut self, id: Id, ch: char) {
        if let NodeData::Text(text) = &mut self.node_mut(id).data {
            text.push(ch);
        }
    }

    /// Concatenated content of the direct text children of `id`.
    pub fn child_text(&self, id: Id) -> String {
        self.children(id)
            .iter()
            .filter_map(|&child| self.node(child).as_text())
            .collect()
    }
}
