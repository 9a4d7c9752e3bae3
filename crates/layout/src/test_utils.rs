#![cfg(test)]

use crate::LayoutError;
use crate::break_token::BreakToken;
use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::testing::ColumnFlowOracle;
use folio_dom::{ContentSpec, NodeId, NodeRef, Tree};
use folio_traits::GeometryOracle;
use folio_types::{BoxRect, Size};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a layout engine over a column-flow oracle for testing purposes.
pub fn create_test_engine(oracle: ColumnFlowOracle) -> LayoutEngine {
    init_logger();
    LayoutEngine::new(Arc::new(oracle), LayoutConfig::default())
}

pub fn create_paragraph(r: &str, text: &str) -> ContentSpec {
    ContentSpec::element("p", vec![ContentSpec::text(text)]).with_ref(r)
}

/// `count` paragraphs "Paragraph N" with refs `pN`.
pub fn numbered_paragraphs(count: usize) -> Vec<ContentSpec> {
    (1..=count)
        .map(|i| create_paragraph(&format!("p{}", i), &format!("Paragraph {}", i)))
        .collect()
}

pub fn build(specs: Vec<ContentSpec>) -> Tree {
    Tree::from_specs(&specs).unwrap()
}

pub fn id(tree: &Tree, r: &str) -> NodeId {
    tree.find_by_ref(&NodeRef::new(r))
        .unwrap_or_else(|| panic!("no node with ref {}", r))
}

/// Refs of the direct children of `node`.
pub fn child_refs(tree: &Tree, node: NodeId) -> Vec<String> {
    tree.children(node)
        .iter()
        .filter_map(|&c| tree.node_ref(c).map(|r| r.to_string()))
        .collect()
}

pub fn root_refs(tree: &Tree) -> Vec<String> {
    child_refs(tree, tree.root())
}

pub struct Page {
    pub tree: Tree,
    pub token: Option<BreakToken>,
}

/// Lays out `content` page after page until it is exhausted or `max_pages`
/// pages were produced.
pub fn paginate_test_content(
    engine: &mut LayoutEngine,
    available: BoxRect,
    content: &Tree,
    max_pages: usize,
) -> Result<Vec<Page>, LayoutError> {
    let mut pages = Vec::new();
    let mut token = None;
    loop {
        let next = engine.layout(available, content, token.as_ref())?;
        pages.push(Page {
            tree: engine.take_destination(),
            token: next,
        });
        if next.is_none() || pages.len() >= max_pages {
            return Ok(pages);
        }
        token = next;
    }
}

/// Text of all pages in order with whitespace and inserted hyphens removed.
pub fn inked_text(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|p| p.tree.text_content(p.tree.root()))
        .collect::<String>()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{2010}')
        .collect()
}

pub fn inked(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Counts every geometry query.
#[derive(Debug)]
pub struct CountingOracle {
    pub inner: ColumnFlowOracle,
    pub calls: AtomicUsize,
}

impl CountingOracle {
    pub fn new(inner: ColumnFlowOracle) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl GeometryOracle for CountingOracle {
    fn bounding_box(&self, tree: &Tree, node: NodeId) -> Option<BoxRect> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.bounding_box(tree, node)
    }

    fn text_range_box(
        &self,
        tree: &Tree,
        node: NodeId,
        start: usize,
        end: usize,
    ) -> Option<BoxRect> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.text_range_box(tree, node, start, end)
    }

    fn content_extent(&self, tree: &Tree) -> Option<Size> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.content_extent(tree)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Cannot measure anything.
#[derive(Debug)]
pub struct BlindOracle;

impl GeometryOracle for BlindOracle {
    fn bounding_box(&self, _tree: &Tree, _node: NodeId) -> Option<BoxRect> {
        None
    }

    fn text_range_box(
        &self,
        _tree: &Tree,
        _node: NodeId,
        _start: usize,
        _end: usize,
    ) -> Option<BoxRect> {
        None
    }

    fn content_extent(&self, _tree: &Tree) -> Option<Size> {
        None
    }

    fn name(&self) -> &'static str {
        "blind"
    }
}
