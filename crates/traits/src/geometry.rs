//! GeometryOracle trait for abstracting measurement.
//!
//! The engine never computes geometry itself. Whatever renders the
//! destination tree (a browser, a text shaper, a test double) answers these
//! queries.

use folio_dom::{Display, NodeData, NodeId, Tree};
use folio_types::{BoxRect, Size};
use std::fmt::Debug;

pub trait GeometryOracle: Send + Sync + Debug {
    /// Bounding box of `node` in page-box coordinates.
    ///
    /// Returns `None` when the node cannot be measured (detached, not
    /// rendered). Callers treat that as "does not overflow".
    fn bounding_box(&self, tree: &Tree, node: NodeId) -> Option<BoxRect>;

    /// Bounding box of the characters `start..end` of a text node.
    fn text_range_box(
        &self,
        tree: &Tree,
        node: NodeId,
        start: usize,
        end: usize,
    ) -> Option<BoxRect>;

    /// Scroll size of the rendered contents of `tree`.
    fn content_extent(&self, tree: &Tree) -> Option<Size>;

    /// Computed display of `node`.
    ///
    /// The default reads the declared style; text takes its parent's.
    fn computed_display(&self, tree: &Tree, node: NodeId) -> Display {
        match tree.get(node).map(|n| &n.data) {
            Some(NodeData::Element(el)) => el.display(),
            Some(NodeData::Text(_)) => match tree.parent(node) {
                Some(parent) if parent != tree.root() => self.computed_display(tree, parent),
                _ => Display::Inline,
            },
            _ => Display::Block,
        }
    }

    fn is_floated(&self, tree: &Tree, node: NodeId) -> bool {
        tree.element(node).is_some_and(|el| el.is_floated())
    }

    /// Returns a human-readable name for this oracle (for logging/debugging).
    fn name(&self) -> &'static str;
}
