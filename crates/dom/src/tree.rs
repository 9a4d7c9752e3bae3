use crate::error::DomError;
use crate::node::{Element, Node, NodeData, NodeId};
use folio_types::NodeRef;
use std::collections::HashMap;

/// An arena of nodes under a single root.
///
/// Nodes are never freed: detaching a subtree only unlinks it. A tree lives
/// for one page pass (destination) or one document (content), so the arena
/// never grows unbounded.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Ref index for attached nodes only.
    refs: HashMap<NodeRef, NodeId>,
    next_ref: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        let mut root = Node::new(NodeData::Root, None);
        root.attached = true;
        Self {
            nodes: vec![root],
            root: NodeId(0),
            refs: HashMap::new(),
            next_ref: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::UnknownNode(id))
        }
    }

    /// True when `id` belongs to this tree and is reachable from the root.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.attached)
    }

    pub fn is_empty(&self) -> bool {
        self.node(self.root).children.is_empty()
    }

    // --- Creation ---

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, element: Element, node_ref: Option<NodeRef>) -> NodeId {
        self.push(Node::new(NodeData::Element(element), node_ref))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>, node_ref: Option<NodeRef>) -> NodeId {
        self.push(Node::new(NodeData::Text(text.into()), node_ref))
    }

    /// Copies `src`'s data and ref into a new detached node, without children.
    pub fn shallow_clone_from(&mut self, src: &Tree, id: NodeId) -> NodeId {
        let source = src.node(id);
        let mut node = Node::new(source.data.clone(), source.node_ref.clone());
        node.split_from = source.split_from;
        self.push(node)
    }

    /// Copies the subtree at `id` in `src` into a new detached subtree.
    pub fn deep_clone_from(&mut self, src: &Tree, id: NodeId) -> NodeId {
        let copy = self.shallow_clone_from(src, id);
        for &child in src.node(id).children() {
            let child_copy = self.deep_clone_from(src, child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    // --- Mutation ---

    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        let index = self.nodes[parent.0].children.len();
        self.insert(parent, index, child)
    }

    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert(parent, 0, child)
    }

    /// Inserts `child` as the `index`-th child of `parent`, detaching it from
    /// any previous parent first.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if matches!(self.nodes[parent.0].data, NodeData::Text(_)) {
            return Err(DomError::NotAParent(parent));
        }
        if child == self.root || child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        self.detach(child);

        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);

        if self.nodes[parent.0].attached {
            self.set_attached(child, true);
        }
        Ok(())
    }

    /// Unlinks `id` (and its subtree) from its parent. No-op for the root
    /// and for nodes that are already detached.
    pub fn detach(&mut self, id: NodeId) {
        if id == self.root || self.get(id).is_none() {
            return;
        }
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        if self.nodes[id.0].attached {
            self.set_attached(id, false);
        }
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.attached = attached;
            if let Some(r) = node.node_ref.clone() {
                if attached {
                    if let Some(previous) = self.refs.insert(r.clone(), current) {
                        if previous != current {
                            log::warn!(
                                "Ref '{}' attached twice ({} replaces {}).",
                                r,
                                current,
                                previous
                            );
                        }
                    }
                } else if self.refs.get(&r) == Some(&current) {
                    self.refs.remove(&r);
                }
            }
            stack.extend(self.nodes[current.0].children.iter().copied());
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if let NodeData::Text(t) = &mut node.data {
                *t = text.into();
            }
        }
    }

    /// Gives every attached node below the root without a ref a fresh one.
    pub fn ensure_refs(&mut self) {
        let ids: Vec<NodeId> = self.descendants(self.root).skip(1).collect();
        for id in ids {
            if self.nodes[id.0].node_ref.is_none() {
                let r = self.fresh_ref();
                self.nodes[id.0].node_ref = Some(r.clone());
                self.refs.insert(r, id);
            }
        }
    }

    fn fresh_ref(&mut self) -> NodeRef {
        loop {
            self.next_ref += 1;
            let candidate = NodeRef::from(format!("n{}", self.next_ref));
            if !self.refs.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    // --- Queries ---

    pub fn find_by_ref(&self, node_ref: &NodeRef) -> Option<NodeId> {
        self.refs.get(node_ref).copied()
    }

    pub fn node_ref(&self, id: NodeId) -> Option<&NodeRef> {
        self.get(id).and_then(|n| n.node_ref.as_ref())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).map(|i| self.children(parent)[i])
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.previous_sibling(id);
        while let Some(sibling) = current {
            if self.node(sibling).is_element() {
                return Some(sibling);
            }
            current = self.previous_sibling(sibling);
        }
        None
    }

    /// True when `ancestor` is a proper ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Ancestors of `id` from its parent upwards, excluding the tree root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == self.root {
                break;
            }
            chain.push(p);
            current = self.parent(p);
        }
        chain
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::element)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::text)
    }

    /// Concatenated text of the subtree at `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(t) = self.text(node) {
                out.push_str(t);
            }
        }
        out
    }

    /// Pre-order iterator over the subtree at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Pre-order list of the refs under the root, for comparing trees.
    pub fn ref_sequence(&self) -> Vec<NodeRef> {
        self.descendants(self.root)
            .filter_map(|id| self.node_ref(id).cloned())
            .collect()
    }
}

pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
