use std::collections::HashMap;
use std::sync::Arc;

/// An index into the node arena of a tree.  The root is always at
/// [`NodeId::ROOT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// A single position in the routing tree.
#[derive(Debug)]
pub(crate) struct Node<A> {
    /// Children keyed by their exact segment; `""` is a valid key.
    pub(crate) literals: HashMap<String, NodeId>,
    /// At most one named capture.
    pub(crate) parameter: Option<(Arc<str>, NodeId)>,
    /// Children keyed by (uppercase) method.
    pub(crate) methods: HashMap<http::Method, NodeId>,
    pub(crate) action: Option<A>,
}

impl<A> Default for Node<A> {
    fn default() -> Self {
        Node {
            literals: HashMap::new(),
            parameter: None,
            methods: HashMap::new(),
            action: None,
        }
    }
}

/// The dense storage for the nodes of a tree.  Nodes are only ever appended,
/// never removed, and every node except the root is owned by exactly one
/// parent edge.
#[derive(Debug)]
pub(crate) struct Arena<A> {
    nodes: Vec<Node<A>>,
}

impl<A> Arena<A> {
    pub(crate) fn new() -> Self {
        Arena {
            nodes: vec![Node::default()],
        }
    }

    pub(crate) fn push(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<A> {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<A> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
