//! Locating the first point of the destination that crosses the page edge.

use crate::text::text_break;
use crate::walker::Walker;
use folio_dom::{Display, NodeData, NodeId, Tree, text::is_blank};
use folio_traits::GeometryOracle;
use folio_types::{BoxRect, FlowAxis};

/// Where the overflowing part of the destination begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStart {
    /// Immediately before a node.
    Before(NodeId),
    /// At a character offset inside a text node.
    Text { node: NodeId, offset: usize },
}

/// Everything from `start` to the end of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowRange {
    pub start: RangeStart,
}

impl OverflowRange {
    pub fn before(node: NodeId) -> Self {
        Self {
            start: RangeStart::Before(node),
        }
    }

    pub fn in_text(node: NodeId, offset: usize) -> Self {
        Self {
            start: RangeStart::Text { node, offset },
        }
    }

    pub fn start_node(&self) -> NodeId {
        match self.start {
            RangeStart::Before(node) | RangeStart::Text { node, .. } => node,
        }
    }

    pub fn offset(&self) -> usize {
        match self.start {
            RangeStart::Before(_) => 0,
            RangeStart::Text { offset, .. } => offset,
        }
    }
}

/// Scans `dest` in flow order for the first content that starts at or past
/// the trailing edge of `available`.
///
/// Subtrees that end before the edge are skipped without descending. Text
/// straddling the edge is narrowed to a word, then a letter. Nothing is cut
/// before the first visible unit of the page, so a page never ends up empty.
pub fn find_overflow(
    oracle: &dyn GeometryOracle,
    dest: &Tree,
    available: BoxRect,
    axis: FlowAxis,
) -> Option<OverflowRange> {
    let end = available.trailing(axis).round();
    let mut walker = Walker::new(dest, dest.root(), dest.root());
    let mut seen_content = false;

    while let Some(node) = walker.next() {
        let Some(rect) = oracle.bounding_box(dest, node) else {
            log::trace!("No box for {}; treating it as fitting.", node);
            continue;
        };
        let left = rect.leading(axis).floor();
        let right = rect.trailing(axis).floor();
        let text = dest.text(node);
        let has_text = text.is_some_and(|t| !is_blank(t));

        if left >= end {
            let floated = oracle.is_floated(dest, node);
            if seen_content {
                if dest.node(node).is_element() && !floated {
                    return Some(OverflowRange::before(node));
                }
                if has_text {
                    return Some(OverflowRange::before(node));
                }
            }
            if floated {
                walker.skip_children(node);
                continue;
            }
        }

        if has_text && right > end {
            match text_break(oracle, dest, node, end, axis, seen_content) {
                Some(0) => return Some(OverflowRange::before(node)),
                Some(offset) => return Some(OverflowRange::in_text(node, offset)),
                None => {}
            }
        }

        if right < end {
            walker.skip_children(node);
            seen_content |= has_visible_content(oracle, dest, node);
        } else if dest.children(node).is_empty() {
            seen_content |= has_visible_content(oracle, dest, node);
        }
    }

    None
}

/// True if the subtree at `node` holds non-blank text or a displayed leaf
/// element.
pub(crate) fn has_visible_content(oracle: &dyn GeometryOracle, tree: &Tree, node: NodeId) -> bool {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match &tree.node(current).data {
            NodeData::Text(text) => {
                if !is_blank(text) {
                    return true;
                }
            }
            NodeData::Element(_) => {
                if oracle.computed_display(tree, current) == Display::None {
                    continue;
                }
                let children = tree.children(current);
                if children.is_empty() {
                    return true;
                }
                stack.extend(children.iter().copied());
            }
            NodeData::Root => stack.extend(tree.children(current).iter().copied()),
        }
    }
    false
}
