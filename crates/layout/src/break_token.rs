//! Mapping an overflow point in the destination back into the content tree.

use crate::overflow::{OverflowRange, RangeStart};
use folio_dom::{NodeId, Tree, text};

/// Where the next page's layout pass resumes.
///
/// `offset` counts characters into `node`'s text and is `0` for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BreakToken {
    pub node: NodeId,
    pub offset: usize,
}

impl BreakToken {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Resume before `node`.
    pub fn at(node: NodeId) -> Self {
        Self { node, offset: 0 }
    }
}

/// Resolves `range`, located in `dest`, to a position in `content`.
///
/// Returns `None` if the clone's ref or text cannot be matched in `content`.
pub fn find_break_token(range: &OverflowRange, dest: &Tree, content: &Tree) -> Option<BreakToken> {
    let (clone, offset) = match range.start {
        RangeStart::Before(node) if dest.node(node).is_element() => {
            let Some(source) = corresponding(dest, node, content) else {
                log::warn!("Overflow starts before {} but it has no content counterpart.", node);
                return None;
            };
            return Some(BreakToken::at(source));
        }
        RangeStart::Before(node) => (node, 0),
        RangeStart::Text { node, offset } => (node, offset),
    };

    let Some(source) = corresponding(dest, clone, content) else {
        log::warn!("Overflowing text {} has no content counterpart.", clone);
        return None;
    };
    let (Some(clone_text), Some(source_text)) = (dest.text(clone), content.text(source)) else {
        log::warn!("Overflowing text {} maps to a non-text content node.", clone);
        return None;
    };

    // A clone may start mid-source when it continues a previous page.
    let remaining = text::slice_from(clone_text, offset);
    let byte_index = if source_text.ends_with(remaining) {
        source_text.len() - remaining.len()
    } else {
        match source_text.find(remaining) {
            Some(index) => index,
            None => {
                log::warn!("Remaining text of {} not found in its source.", clone);
                return None;
            }
        }
    };

    Some(BreakToken::new(source, text::char_len(&source_text[..byte_index])))
}

fn corresponding(dest: &Tree, node: NodeId, content: &Tree) -> Option<NodeId> {
    dest.node_ref(node).and_then(|r| content.find_by_ref(r))
}
