//! Break-constraint predicates.
//!
//! Each predicate is a pure function of a node's resolved style. The host may
//! supply its own rules; [`StyleBreakRules`] reads the declared [`Style`]
//! fields.
//!
//! [`Style`]: folio_dom::Style

use folio_dom::{NodeId, Tag, Tree};
use std::fmt::Debug;

pub trait BreakRules: Send + Sync + Debug {
    /// The node forces a break before itself.
    fn needs_break_before(&self, tree: &Tree, node: NodeId) -> bool;

    /// The node forces a break after itself.
    fn needs_break_after(&self, tree: &Tree, node: NodeId) -> bool;

    /// The previous element sibling forces a break after itself.
    fn needs_previous_sibling_break_after(&self, tree: &Tree, node: NodeId) -> bool {
        tree.previous_element_sibling(node)
            .is_some_and(|prev| self.needs_break_after(tree, prev))
    }

    /// The node is an unconditional page-break marker, or starts a new
    /// named page.
    fn needs_forced_page_break(&self, tree: &Tree, node: NodeId) -> bool;

    /// Any of the above that demands a break before placing `node`.
    fn demands_break_before(&self, tree: &Tree, node: NodeId) -> bool {
        self.needs_break_before(tree, node)
            || self.needs_previous_sibling_break_after(tree, node)
            || self.needs_forced_page_break(tree, node)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleBreakRules;

impl BreakRules for StyleBreakRules {
    fn needs_break_before(&self, tree: &Tree, node: NodeId) -> bool {
        tree.element(node).is_some_and(|el| el.style.break_before.is_forced())
    }

    fn needs_break_after(&self, tree: &Tree, node: NodeId) -> bool {
        tree.element(node).is_some_and(|el| el.style.break_after.is_forced())
    }

    fn needs_forced_page_break(&self, tree: &Tree, node: NodeId) -> bool {
        let Some(el) = tree.element(node) else {
            return false;
        };
        if el.tag == Tag::PageBreak {
            return true;
        }
        let Some(prev) = tree.previous_element_sibling(node).and_then(|p| tree.element(p)) else {
            return false;
        };
        el.style.page != prev.style.page
    }
}
