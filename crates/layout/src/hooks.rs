//! Extension points fired during a layout pass.

use crate::overflow::OverflowRange;
use folio_dom::{NodeId, Tree};
use std::fmt;

pub type LayoutNodeHook = Box<dyn FnMut(&Tree, NodeId)>;
pub type RenderNodeHook = Box<dyn FnMut(&Tree, NodeId, &Tree, NodeId)>;
pub type OverflowHook = Box<dyn FnMut(&Tree, &OverflowRange)>;

/// Callbacks registered by the host.
///
/// - `layout_node`: a content node is about to be placed (content tree, node).
/// - `render_node`: a node has been cloned into the destination (content
///   tree, source node, destination tree, clone).
/// - `overflow`: an overflow range has been located in the destination.
#[derive(Default)]
pub struct LayoutHooks {
    layout_node: Vec<LayoutNodeHook>,
    render_node: Vec<RenderNodeHook>,
    overflow: Vec<OverflowHook>,
}

impl LayoutHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_layout_node(&mut self, hook: impl FnMut(&Tree, NodeId) + 'static) {
        self.layout_node.push(Box::new(hook));
    }

    pub fn on_render_node(&mut self, hook: impl FnMut(&Tree, NodeId, &Tree, NodeId) + 'static) {
        self.render_node.push(Box::new(hook));
    }

    pub fn on_overflow(&mut self, hook: impl FnMut(&Tree, &OverflowRange) + 'static) {
        self.overflow.push(Box::new(hook));
    }

    pub fn is_empty(&self) -> bool {
        self.layout_node.is_empty() && self.render_node.is_empty() && self.overflow.is_empty()
    }

    pub fn clear(&mut self) {
        self.layout_node.clear();
        self.render_node.clear();
        self.overflow.clear();
    }

    pub(crate) fn layout_node(&mut self, content: &Tree, node: NodeId) {
        for hook in &mut self.layout_node {
            hook(content, node);
        }
    }

    pub(crate) fn render_node(&mut self, content: &Tree, node: NodeId, dest: &Tree, clone: NodeId) {
        for hook in &mut self.render_node {
            hook(content, node, dest, clone);
        }
    }

    pub(crate) fn overflow(&mut self, dest: &Tree, range: &OverflowRange) {
        for hook in &mut self.overflow {
            hook(dest, range);
        }
    }
}

impl fmt::Debug for LayoutHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutHooks")
            .field("layout_node", &self.layout_node.len())
            .field("render_node", &self.render_node.len())
            .field("overflow", &self.overflow.len())
            .finish()
    }
}
