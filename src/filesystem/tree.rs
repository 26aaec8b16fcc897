use derive_more::IsVariant;
use hashlink::LinkedHashMap;
use snafu::Snafu;

/// Index of a node inside the [`Tree`] arena that minted it.
///
/// Ids are never shared between trees; swapping a tree out invalidates every id
/// handed out for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Represents the type of a virtual filesystem node
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum NodeKind {
    File {
        content: String,
    },
    Directory {
        children: LinkedHashMap<String, NodeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Back-reference used only to rebuild paths towards the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// File content, `None` for directories.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }
}

/// Arena owning every node of one virtual filesystem.
///
/// The root always lives at index 0, has an empty name and no parent. Children
/// keep their insertion order, which is what listings and the structural hash
/// iterate over.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node {
                name: String::new(),
                kind: NodeKind::Directory {
                    children: LinkedHashMap::new(),
                },
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was minted by another tree and is out of range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether anything hangs below the root.
    pub fn has_entries(&self) -> bool {
        self.children(self.root()).next().is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        match &self.node(id).kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            NodeKind::File { .. } => None,
        }
    }

    /// Children of `id` in insertion order; files yield nothing.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let children = match &self.node(id).kind {
            NodeKind::Directory { children } => Some(children.values().copied()),
            NodeKind::File { .. } => None,
        };
        children.into_iter().flatten()
    }

    pub fn add_directory(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.try_insert(
            parent,
            name.into(),
            NodeKind::Directory {
                children: LinkedHashMap::new(),
            },
        )
    }

    pub fn add_file(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.try_insert(
            parent,
            name.into(),
            NodeKind::File {
                content: content.into(),
            },
        )
    }

    fn try_insert(
        &mut self,
        parent: NodeId,
        name: String,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        if !is_valid_name(&name) {
            return Err(TreeError::InvalidName { name });
        }

        match &self.node(parent).kind {
            NodeKind::File { .. } => {
                return Err(TreeError::CannotInsertIntoFile {
                    name,
                    parent: self.node(parent).name.clone(),
                });
            }
            NodeKind::Directory { children } if children.contains_key(&name) => {
                return Err(TreeError::DuplicateName {
                    name,
                    parent: self.node(parent).name.clone(),
                });
            }
            NodeKind::Directory { .. } => {}
        }

        Ok(self.attach(parent, name, kind))
    }

    /// Appends a node without validating its name or uniqueness.
    ///
    /// Callers guarantee that `parent` is a directory and `name` is free in it.
    pub(crate) fn attach(&mut self, parent: NodeId, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let NodeKind::Directory { children } = &mut self.nodes[parent.0].kind {
            children.insert(name.clone(), id);
        }
        self.nodes.push(Node {
            name,
            kind,
            parent: Some(parent),
        });
        id
    }

    /// Compares names, kinds, contents and child order, ignoring arena layout.
    pub fn structurally_eq(&self, other: &Tree) -> bool {
        let mut pending = vec![(self.root(), other.root())];

        while let Some((left, right)) = pending.pop() {
            let (left_node, right_node) = (self.node(left), other.node(right));
            if left_node.name != right_node.name {
                return false;
            }
            match (&left_node.kind, &right_node.kind) {
                (NodeKind::File { content: a }, NodeKind::File { content: b }) => {
                    if a != b {
                        return false;
                    }
                }
                (NodeKind::Directory { children: a }, NodeKind::Directory { children: b }) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.values().copied().zip(b.values().copied()));
                }
                _ => return false,
            }
        }

        true
    }
}

/// Node names may not be empty, contain `/`, shadow `.` and `..`, or hold
/// characters a bootstrap document cannot carry.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && name != "."
        && name != ".."
        && name.chars().all(is_document_char)
}

/// Whether `c` is allowed in an XML 1.0 document, literally or as a
/// character reference.
pub fn is_document_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeError {
    #[snafu(display("Invalid node name '{}'", name))]
    InvalidName { name: String },
    #[snafu(display("'{}' is defined multiple times in directory '{}'", name, parent))]
    DuplicateName { name: String, parent: String },
    #[snafu(display("Cannot insert '{}' into file '{}'", name, parent))]
    CannotInsertIntoFile { name: String, parent: String },
}
