pub mod fixtures;

use folio::{BoxRect, BreakToken, ColumnFlowOracle, LayoutConfig, LayoutEngine, LayoutError, Tree};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine over monospace column-flow geometry, plus the matching page box.
pub fn column_engine(line_chars: usize, lines: usize) -> (LayoutEngine, BoxRect) {
    init_logger();
    let oracle = ColumnFlowOracle::new(line_chars, lines);
    let page = oracle.page_box();
    (LayoutEngine::new(Arc::new(oracle), LayoutConfig::default()), page)
}

/// One settled page and the token the next page resumes from.
#[derive(Debug)]
pub struct Page {
    pub tree: Tree,
    pub break_token: Option<BreakToken>,
}

impl Page {
    pub fn text(&self) -> String {
        self.tree.text_content(self.tree.root())
    }
}

/// Lays out `content` page after page from `start` until the content is
/// exhausted or `max_pages` pages were produced.
pub fn paginate_from(
    engine: &mut LayoutEngine,
    content: &Tree,
    page: BoxRect,
    start: Option<BreakToken>,
    max_pages: usize,
) -> Result<Vec<Page>, LayoutError> {
    let mut pages = Vec::new();
    let mut token = start;
    while pages.len() < max_pages {
        let next = engine.layout(page, content, token.as_ref())?;
        pages.push(Page {
            tree: engine.take_destination(),
            break_token: next,
        });
        if next.is_none() {
            break;
        }
        token = next;
    }
    Ok(pages)
}

pub fn paginate_all(
    engine: &mut LayoutEngine,
    content: &Tree,
    page: BoxRect,
    max_pages: usize,
) -> Result<Vec<Page>, LayoutError> {
    paginate_from(engine, content, page, None, max_pages)
}

/// Refs of the top-level nodes of a page.
pub fn page_refs(page: &Page) -> Vec<String> {
    child_refs(&page.tree, page.tree.root())
}

pub fn child_refs(tree: &Tree, node: folio::NodeId) -> Vec<String> {
    tree.children(node)
        .iter()
        .filter_map(|&c| tree.node_ref(c).map(|r| r.to_string()))
        .collect()
}

/// Visible characters only: drops whitespace and inserted hyphens.
pub fn inked(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{2010}')
        .collect()
}

pub fn inked_pages(pages: &[Page]) -> String {
    pages.iter().map(|p| inked(&p.text())).collect()
}

pub fn node(tree: &Tree, r: &str) -> folio::NodeId {
    tree.find_by_ref(&folio::NodeRef::new(r))
        .unwrap_or_else(|| panic!("no node with ref {}", r))
}
