//! Cloning content nodes into the destination box.

use crate::LayoutError;
use crate::break_token::BreakToken;
use folio_dom::{BreakValue, NodeData, NodeId, Tree, text};

/// Clones `node` from `content` into `dest` under its already-rendered
/// parent and returns the clone.
///
/// `shallow` copies the node alone; otherwise the whole subtree comes along.
/// When `node` is the text node `token` resumes in, the clone starts at the
/// token's offset. A parent that is not in `dest` yet (the first node of a
/// page that resumes mid-subtree) gets its ancestor chain rebuilt as
/// continuation clones, attached in one step.
pub fn render(
    content: &Tree,
    dest: &mut Tree,
    node: NodeId,
    token: Option<&BreakToken>,
    shallow: bool,
) -> Result<NodeId, LayoutError> {
    let clone = if shallow {
        dest.shallow_clone_from(content, node)
    } else {
        dest.deep_clone_from(content, node)
    };

    if let Some(token) = token.filter(|t| t.node == node && t.offset > 0) {
        if let Some(source) = content.text(node) {
            dest.set_text(clone, text::slice_from(source, token.offset));
        }
    }

    let parent = match content.parent(node) {
        Some(parent) if parent != content.root() => {
            let existing = content.node_ref(parent).and_then(|r| dest.find_by_ref(r));
            match existing {
                Some(existing) => existing,
                None => rebuild_ancestors(content, dest, parent)?,
            }
        }
        _ => dest.root(),
    };

    dest.append(parent, clone)?;
    Ok(clone)
}

/// Recreates the missing ancestors of a resumed node, from `parent` up to
/// the nearest ancestor already in `dest`, and returns `parent`'s clone.
fn rebuild_ancestors(
    content: &Tree,
    dest: &mut Tree,
    parent: NodeId,
) -> Result<NodeId, LayoutError> {
    let mut missing = vec![parent];
    let mut anchor = dest.root();
    let mut current = content.parent(parent);
    while let Some(ancestor) = current {
        if ancestor == content.root() {
            break;
        }
        if let Some(existing) = content.node_ref(ancestor).and_then(|r| dest.find_by_ref(r)) {
            anchor = existing;
            break;
        }
        missing.push(ancestor);
        current = content.parent(ancestor);
    }

    log::debug!(
        "Rebuilding {} continuation ancestor(s) above {}.",
        missing.len(),
        parent
    );

    let mut top = None;
    let mut below: Option<NodeId> = None;
    for &ancestor in missing.iter().rev() {
        let clone = continuation_clone(content, dest, ancestor);
        match below {
            Some(above) => dest.append(above, clone)?,
            None => top = Some(clone),
        }
        below = Some(clone);
    }

    if let Some(top) = top {
        dest.append(anchor, top)?;
    }
    Ok(below.unwrap_or(anchor))
}

/// Shallow clone of an ancestor continuing from a previous page. Forced
/// breaks are dropped and an `id` moves to `data-id` so it stays unique.
fn continuation_clone(content: &Tree, dest: &mut Tree, ancestor: NodeId) -> NodeId {
    let clone = dest.shallow_clone_from(content, ancestor);
    let node = dest.node_mut(clone);
    node.split_from = true;
    if let NodeData::Element(el) = &mut node.data {
        el.style.break_before = BreakValue::Auto;
        el.style.break_after = BreakValue::Auto;
        if let Some(id) = el.attrs.remove("id") {
            el.attrs.insert("data-id".to_string(), id);
        }
    }
    clone
}
