//! Lazy depth-first traversal.

use folio_dom::{NodeId, Tree};

/// Pre-order walk over `tree`, bounded by `limiter`.
///
/// The limiter itself is never yielded; starting the walk at the limiter
/// yields its descendants. Callers skip the descendants of nodes they consumed
/// whole with [`skip_children`](Self::skip_children).
#[derive(Debug, Clone)]
pub struct Walker<'a> {
    tree: &'a Tree,
    limiter: NodeId,
    next: Option<NodeId>,
}

impl<'a> Walker<'a> {
    pub fn new(tree: &'a Tree, start: NodeId, limiter: NodeId) -> Self {
        let next = if start == limiter {
            tree.first_child(limiter)
        } else {
            Some(start)
        };
        Self {
            tree,
            limiter,
            next,
        }
    }

    /// Continues after `node`'s subtree instead of descending into it.
    pub fn skip_children(&mut self, node: NodeId) {
        self.next = node_after(self.tree, node, self.limiter);
    }
}

impl Iterator for Walker<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.next = match self.tree.first_child(node) {
            Some(first) => Some(first),
            None => node_after(self.tree, node, self.limiter),
        };
        Some(node)
    }
}

/// The next node in document order outside `node`'s subtree, staying within
/// `limiter`.
pub fn node_after(tree: &Tree, node: NodeId, limiter: NodeId) -> Option<NodeId> {
    if node == limiter {
        return None;
    }
    let mut current = node;
    loop {
        if let Some(sibling) = tree.next_sibling(current) {
            return Some(sibling);
        }
        current = tree.parent(current)?;
        if current == limiter {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{ContentSpec, NodeRef};

    fn tree() -> Tree {
        Tree::from_specs(&[
            ContentSpec::element(
                "section",
                vec![
                    ContentSpec::element("p", vec![]).with_ref("a"),
                    ContentSpec::element(
                        "div",
                        vec![ContentSpec::element("p", vec![]).with_ref("c")],
                    )
                    .with_ref("b"),
                ],
            )
            .with_ref("s"),
            ContentSpec::element("p", vec![]).with_ref("d"),
        ])
        .unwrap()
    }

    fn refs(tree: &Tree, ids: impl Iterator<Item = NodeId>) -> Vec<String> {
        ids.map(|id| tree.node_ref(id).unwrap().to_string()).collect()
    }

    #[test]
    fn test_walk_from_root_is_preorder() {
        let tree = tree();
        let walker = Walker::new(&tree, tree.root(), tree.root());
        assert_eq!(refs(&tree, walker), vec!["s", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_walk_resumes_mid_tree_and_climbs_out() {
        let tree = tree();
        let c = tree.find_by_ref(&NodeRef::new("c")).unwrap();
        let walker = Walker::new(&tree, c, tree.root());
        assert_eq!(refs(&tree, walker), vec!["c", "d"]);
    }

    #[test]
    fn test_walk_stays_inside_limiter() {
        let tree = tree();
        let s = tree.find_by_ref(&NodeRef::new("s")).unwrap();
        let a = tree.find_by_ref(&NodeRef::new("a")).unwrap();
        let walker = Walker::new(&tree, a, s);
        assert_eq!(refs(&tree, walker), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_skip_children() {
        let tree = tree();
        let mut walker = Walker::new(&tree, tree.root(), tree.root());
        let mut seen = Vec::new();
        while let Some(node) = walker.next() {
            let r = tree.node_ref(node).unwrap().to_string();
            if r == "s" {
                walker.skip_children(node);
            }
            seen.push(r);
        }
        assert_eq!(seen, vec!["s", "d"]);
    }

    #[test]
    fn test_node_after() {
        let tree = tree();
        let id = |r: &str| tree.find_by_ref(&NodeRef::new(r)).unwrap();
        assert_eq!(node_after(&tree, id("a"), tree.root()), Some(id("b")));
        assert_eq!(node_after(&tree, id("c"), tree.root()), Some(id("d")));
        assert_eq!(node_after(&tree, id("d"), tree.root()), None);
        assert_eq!(node_after(&tree, id("c"), id("s")), None);
    }
}
