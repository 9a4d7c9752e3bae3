//! Removing an overflow range from the destination box.

use crate::overflow::{OverflowRange, RangeStart};
use folio_dom::{Fragment, NodeData, NodeId, Tree, text};

/// Moves everything from `range`'s start to the end of `dest` into a new
/// fragment and returns it.
///
/// Ancestors of the cut point stay in `dest`; the fragment receives shallow
/// copies of them (same refs) holding the moved content, so the fragment
/// reads as a continuation of the page. When the cut lands inside a word,
/// `hyphen` is appended to the text left behind. Ancestors left without
/// visible content are removed from `dest` afterwards.
pub fn remove_overflow(dest: &mut Tree, range: &OverflowRange, hyphen: Option<char>) -> Fragment {
    let mut fragment = Fragment::new();
    let start = range.start_node();
    let Some(parent) = dest.parent(start) else {
        log::warn!("Overflow start {} is not attached; nothing extracted.", start);
        return fragment;
    };

    // Bottom level: the split text tail (if any) and the moving siblings.
    let mut tail = None;
    let first_moving = match range.start {
        RangeStart::Text { node, offset } if offset > 0 => {
            let full = dest.text(node).unwrap_or_default().to_string();
            if offset < text::char_len(&full) {
                let head = text::slice_to(&full, offset);
                let rest = text::slice_from(&full, offset);
                let mut kept = head.to_string();
                if let Some(h) = hyphen {
                    if head.chars().last().is_some_and(text::is_word_char) {
                        kept.push(h);
                    }
                }
                let node_ref = dest.node_ref(node).cloned();
                tail = Some(fragment.create_text(rest, node_ref));
                dest.set_text(node, kept);
            }
            dest.next_sibling(node)
        }
        _ => Some(start),
    };

    // Ancestor chain from the top of the tree down to `parent`.
    let mut path = dest.ancestors(start);
    path.reverse();

    let mut containers = Vec::with_capacity(path.len());
    let mut above = fragment.root();
    for &ancestor in &path {
        let copy = fragment.shallow_clone_from(dest, ancestor);
        attach(&mut fragment, above, copy);
        containers.push(copy);
        above = copy;
    }

    if let Some(tail) = tail {
        attach(&mut fragment, above, tail);
    }
    move_from(dest, &mut fragment, first_moving, above);

    // Later siblings of each ancestor, deepest level first.
    for (depth, &ancestor) in path.iter().enumerate().rev() {
        let target = match depth {
            0 => fragment.root(),
            d => containers[d - 1],
        };
        let next = dest.next_sibling(ancestor);
        move_from(dest, &mut fragment, next, target);
    }

    remove_vacant_ancestors(dest, parent);
    fragment
}

/// Moves `first` and all its later siblings from `dest` under `target`.
fn move_from(dest: &mut Tree, fragment: &mut Fragment, first: Option<NodeId>, target: NodeId) {
    let mut current = first;
    while let Some(node) = current {
        current = dest.next_sibling(node);
        let copy = fragment.deep_clone_from(dest, node);
        attach(fragment, target, copy);
        dest.detach(node);
    }
}

fn attach(fragment: &mut Fragment, parent: NodeId, child: NodeId) {
    // Fresh, detached copies cannot form a cycle.
    if let Err(e) = fragment.append(parent, child) {
        log::warn!("Failed to attach extracted node: {}", e);
    }
}

/// Detaches `node` and its ancestors while they hold nothing visible.
fn remove_vacant_ancestors(dest: &mut Tree, node: NodeId) {
    let mut current = Some(node);
    while let Some(node) = current {
        if node == dest.root() || !is_vacant(dest, node) {
            return;
        }
        current = dest.parent(node);
        log::trace!("Removing emptied container {}.", node);
        dest.detach(node);
    }
}

/// No non-blank text and no leaf element anywhere below `node`.
fn is_vacant(tree: &Tree, node: NodeId) -> bool {
    tree.descendants(node).skip(1).all(|id| match &tree.node(id).data {
        NodeData::Text(t) => text::is_blank(t),
        NodeData::Element(_) => !tree.children(id).is_empty(),
        NodeData::Root => true,
    })
}
