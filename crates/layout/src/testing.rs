//! Deterministic geometry for tests, benches and headless hosts.

use folio_dom::{Display, NodeData, NodeId, Tag, Tree};
use folio_traits::GeometryOracle;
use folio_types::{BoxRect, Size};
use std::collections::HashMap;

const HYPHEN: char = '\u{2010}';

/// Monospace column-flow geometry.
///
/// Text is set in lines of `line_chars` fixed-width characters, wrapped at
/// word boundaries (words longer than a line wrap per character). Lines
/// stack into columns of `lines_per_column`; a full column continues in the
/// next one to the right, so content past the first column has
/// `left >= column_width()`. Block-level elements start and end on a line
/// boundary, `br` ends a line, and an empty element with a `lines="n"`
/// attribute occupies `n` whole lines.
///
/// Whitespace at the start of a line takes no room, and a trailing U+2010
/// hangs past the end of a full line.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFlowOracle {
    pub line_chars: usize,
    pub lines_per_column: usize,
    pub char_width: f32,
    pub line_height: f32,
}

impl ColumnFlowOracle {
    pub fn new(line_chars: usize, lines_per_column: usize) -> Self {
        Self {
            line_chars: line_chars.max(1),
            lines_per_column: lines_per_column.max(1),
            char_width: 1.0,
            line_height: 1.0,
        }
    }

    /// A single endless column, for vertical flow.
    pub fn vertical(line_chars: usize) -> Self {
        Self::new(line_chars, usize::MAX)
    }

    pub fn column_width(&self) -> f32 {
        self.line_chars as f32 * self.char_width
    }

    /// One column: the page box for horizontal flow.
    pub fn page_box(&self) -> BoxRect {
        BoxRect::new(
            0.0,
            0.0,
            self.column_width(),
            self.lines_per_column as f32 * self.line_height,
        )
    }

    /// `lines` lines of one column: the page box for vertical flow.
    pub fn page_box_lines(&self, lines: usize) -> BoxRect {
        BoxRect::new(0.0, 0.0, self.column_width(), lines as f32 * self.line_height)
    }

    fn flow(&self, tree: &Tree) -> FlowMap {
        let mut flow = Flow {
            oracle: self,
            tree,
            line: 0,
            col: 0,
            map: FlowMap::default(),
        };
        flow.visit(tree.root());
        flow.map
    }
}

#[derive(Debug, Default)]
struct FlowMap {
    boxes: HashMap<NodeId, BoxRect>,
    glyphs: HashMap<NodeId, Vec<BoxRect>>,
    max_column: Option<usize>,
    max_bottom: f32,
}

struct Flow<'a> {
    oracle: &'a ColumnFlowOracle,
    tree: &'a Tree,
    line: usize,
    col: usize,
    map: FlowMap,
}

impl Flow<'_> {
    fn cell(&self, line: usize, col: usize, chars: usize) -> BoxRect {
        let o = self.oracle;
        let column = line / o.lines_per_column;
        let row = line % o.lines_per_column;
        let left = column as f32 * o.column_width() + col as f32 * o.char_width;
        let top = row as f32 * o.line_height;
        BoxRect::new(left, top, left + chars as f32 * o.char_width, top + o.line_height)
    }

    /// Zero-sized box at the cursor.
    fn point(&self) -> BoxRect {
        let cell = self.cell(self.line, self.col, 0);
        BoxRect::new(cell.left, cell.top, cell.left, cell.top)
    }

    fn mark(&mut self, rect: BoxRect) {
        let column = self.line / self.oracle.lines_per_column;
        self.map.max_column = Some(self.map.max_column.map_or(column, |c| c.max(column)));
        self.map.max_bottom = self.map.max_bottom.max(rect.bottom);
    }

    fn newline(&mut self) {
        self.line = self.line.saturating_add(1);
        self.col = 0;
    }

    fn place(&mut self) -> BoxRect {
        if self.col >= self.oracle.line_chars {
            self.newline();
        }
        let rect = self.cell(self.line, self.col, 1);
        self.mark(rect);
        self.col += 1;
        rect
    }

    /// Lays out `node` and returns the union of its visible content.
    fn visit(&mut self, node: NodeId) -> Option<BoxRect> {
        let tree = self.tree;
        match &tree.node(node).data {
            NodeData::Root => {
                let mut content = None;
                for &child in tree.children(node) {
                    content = union(content, self.visit(child));
                }
                content
            }
            NodeData::Text(text) => {
                let start = self.point();
                let glyphs = self.flow_text(text);
                let content = glyphs.iter().copied().filter(is_inked).reduce(|a, b| a.union(&b));
                self.map.boxes.insert(node, content.unwrap_or(start));
                self.map.glyphs.insert(node, glyphs);
                content
            }
            NodeData::Element(el) => {
                let display = self.oracle.computed_display(tree, node);
                if display == Display::None {
                    return None;
                }
                if el.tag == Tag::Br {
                    let at = self.point();
                    self.map.boxes.insert(node, at);
                    self.newline();
                    return None;
                }

                let block = !matches!(display, Display::Inline | Display::InlineBlock);
                if block && self.col > 0 {
                    self.newline();
                }
                let start = self.point();
                let mut content = None;
                let children = tree.children(node);
                if children.is_empty() {
                    let lines = el.attr("lines").and_then(|n| n.parse::<usize>().ok()).unwrap_or(0);
                    if lines > 0 && self.col > 0 {
                        self.newline();
                    }
                    for _ in 0..lines {
                        let rect = self.cell(self.line, 0, self.oracle.line_chars);
                        self.mark(rect);
                        content = union(content, Some(rect));
                        self.newline();
                    }
                } else {
                    for &child in children {
                        content = union(content, self.visit(child));
                    }
                }
                if block && self.col > 0 {
                    self.newline();
                }
                self.map.boxes.insert(node, content.unwrap_or(start));
                content
            }
        }
    }

    fn flow_text(&mut self, text: &str) -> Vec<BoxRect> {
        let chars: Vec<char> = text.chars().collect();
        let line_chars = self.oracle.line_chars;
        let mut glyphs = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            if chars[i].is_whitespace() {
                if self.col >= line_chars {
                    self.newline();
                }
                if self.col == 0 {
                    glyphs.push(self.point());
                } else {
                    glyphs.push(self.place());
                }
                i += 1;
                continue;
            }

            let end = chars[i..]
                .iter()
                .position(|c| c.is_whitespace())
                .map_or(chars.len(), |p| i + p);
            let hangs = chars[end - 1] == HYPHEN;
            let width = end - i - usize::from(hangs);
            if self.col > 0 && self.col + width > line_chars && width <= line_chars {
                self.newline();
            }
            for k in i..end {
                if hangs && k == end - 1 && self.col >= line_chars {
                    let rect = self.cell(self.line, self.col, 0);
                    glyphs.push(rect);
                } else {
                    glyphs.push(self.place());
                }
            }
            i = end;
        }
        glyphs
    }
}

fn is_inked(rect: &BoxRect) -> bool {
    rect.bottom > rect.top
}

fn union(a: Option<BoxRect>, b: Option<BoxRect>) -> Option<BoxRect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl GeometryOracle for ColumnFlowOracle {
    fn bounding_box(&self, tree: &Tree, node: NodeId) -> Option<BoxRect> {
        if !tree.contains(node) {
            return None;
        }
        self.flow(tree).boxes.get(&node).copied()
    }

    fn text_range_box(
        &self,
        tree: &Tree,
        node: NodeId,
        start: usize,
        end: usize,
    ) -> Option<BoxRect> {
        if !tree.contains(node) || start >= end {
            return None;
        }
        let map = self.flow(tree);
        let glyphs = map.glyphs.get(&node)?.get(start..end)?;
        glyphs
            .iter()
            .copied()
            .filter(is_inked)
            .reduce(|a, b| a.union(&b))
            .or_else(|| glyphs.first().copied())
    }

    fn content_extent(&self, tree: &Tree) -> Option<Size> {
        let map = self.flow(tree);
        let width = map
            .max_column
            .map_or(0.0, |c| (c + 1) as f32 * self.column_width());
        Some(Size::new(width, map.max_bottom))
    }

    fn name(&self) -> &'static str {
        "column-flow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{ContentSpec, NodeRef};

    fn paragraphs(texts: &[&str]) -> Tree {
        let specs: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                ContentSpec::element("p", vec![ContentSpec::text(*t)])
                    .with_ref(&format!("p{}", i + 1))
            })
            .collect();
        Tree::from_specs(&specs).unwrap()
    }

    #[test]
    fn test_blocks_stack_into_columns() {
        let oracle = ColumnFlowOracle::new(10, 2);
        let tree = paragraphs(&["one", "two", "three"]);
        let id = |r: &str| tree.find_by_ref(&NodeRef::new(r)).unwrap();

        assert_eq!(oracle.bounding_box(&tree, id("p1")), Some(BoxRect::new(0.0, 0.0, 3.0, 1.0)));
        assert_eq!(oracle.bounding_box(&tree, id("p2")), Some(BoxRect::new(0.0, 1.0, 3.0, 2.0)));
        assert_eq!(oracle.bounding_box(&tree, id("p3")), Some(BoxRect::new(10.0, 0.0, 15.0, 1.0)));
        assert_eq!(oracle.content_extent(&tree), Some(Size::new(20.0, 2.0)));
    }

    #[test]
    fn test_words_wrap_and_leading_space_collapses() {
        let oracle = ColumnFlowOracle::vertical(10);
        let tree = paragraphs(&["aaaa bbbb cccc"]);
        let text = tree.first_child(tree.first_child(tree.root()).unwrap()).unwrap();

        // "aaaa bbbb " fills line 0, "cccc" starts line 1.
        assert_eq!(
            oracle.text_range_box(&tree, text, 10, 14),
            Some(BoxRect::new(0.0, 1.0, 4.0, 2.0))
        );
        assert_eq!(oracle.content_extent(&tree), Some(Size::new(10.0, 2.0)));
    }

    #[test]
    fn test_long_words_wrap_per_character() {
        let oracle = ColumnFlowOracle::new(4, 1);
        let tree = paragraphs(&["abcdefg"]);
        let text = tree.first_child(tree.first_child(tree.root()).unwrap()).unwrap();

        let char_box = |i: usize| oracle.text_range_box(&tree, text, i, i + 1);
        assert_eq!(char_box(3), Some(BoxRect::new(3.0, 0.0, 4.0, 1.0)));
        assert_eq!(char_box(4), Some(BoxRect::new(4.0, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn test_hyphen_hangs_at_line_end() {
        let oracle = ColumnFlowOracle::new(4, 1);
        let tree = paragraphs(&["abcd\u{2010}"]);
        assert_eq!(oracle.content_extent(&tree), Some(Size::new(4.0, 1.0)));
    }

    #[test]
    fn test_spacers_and_hidden_elements() {
        let oracle = ColumnFlowOracle::new(10, 4);
        let hidden = folio_dom::Style {
            display: Some(Display::None),
            ..Default::default()
        };
        let tree = Tree::from_specs(&[
            ContentSpec::element("div", vec![]).with_attr("lines", "3").with_ref("spacer"),
            ContentSpec::element("div", vec![ContentSpec::text("gone")])
                .with_ref("hidden")
                .with_style(hidden),
            ContentSpec::element("p", vec![ContentSpec::text("x")]).with_ref("after"),
        ])
        .unwrap();
        let id = |r: &str| tree.find_by_ref(&NodeRef::new(r)).unwrap();

        assert_eq!(
            oracle.bounding_box(&tree, id("spacer")),
            Some(BoxRect::new(0.0, 0.0, 10.0, 3.0))
        );
        assert_eq!(oracle.bounding_box(&tree, id("hidden")), None);
        assert_eq!(oracle.bounding_box(&tree, id("after")), Some(BoxRect::new(0.0, 3.0, 1.0, 4.0)));
    }
}
