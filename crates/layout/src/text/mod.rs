//! Word and letter narrowing inside a single text node.
//!
//! Both iterators yield character spans lazily, so a search that stops at
//! the first word past the edge never measures the rest of the node.

use folio_dom::{NodeId, Tree};
use folio_traits::GeometryOracle;
use folio_types::FlowAxis;
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

/// A half-open range of character offsets within one text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Maximal runs of non-whitespace characters.
pub struct Words<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
}

impl<'a> Words<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().enumerate().peekable(),
        }
    }
}

impl Iterator for Words<'_> {
    type Item = TextSpan;

    fn next(&mut self) -> Option<TextSpan> {
        let start = loop {
            let (i, c) = self.chars.next()?;
            if !c.is_whitespace() {
                break i;
            }
        };
        let mut end = start + 1;
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() {
                break;
            }
            end = i + 1;
            self.chars.next();
        }
        Some(TextSpan { start, end })
    }
}

/// One span per character of `word`.
#[derive(Debug, Clone)]
pub struct Letters {
    next: usize,
    end: usize,
}

impl Letters {
    pub fn new(word: TextSpan) -> Self {
        Self {
            next: word.start,
            end: word.end,
        }
    }
}

impl Iterator for Letters {
    type Item = TextSpan;

    fn next(&mut self) -> Option<TextSpan> {
        if self.next >= self.end {
            return None;
        }
        let span = TextSpan {
            start: self.next,
            end: self.next + 1,
        };
        self.next += 1;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Letters {}

/// Finds the first character offset of `node` whose box starts at or past
/// `end` along `axis`.
///
/// Words are checked in order; a word straddling the edge is narrowed to the
/// first letter past it by binary search over its letters. An offset of `0`
/// is only returned when `allow_zero` is set. Unmeasurable spans count as
/// fitting. Returns `None` when nothing in the node crosses the edge.
pub fn text_break(
    oracle: &dyn GeometryOracle,
    tree: &Tree,
    node: NodeId,
    end: f32,
    axis: FlowAxis,
    allow_zero: bool,
) -> Option<usize> {
    let text = tree.text(node)?;
    let accept = |offset: usize| (offset > 0 || allow_zero).then_some(offset);

    for word in Words::new(text) {
        let Some(rect) = oracle.text_range_box(tree, node, word.start, word.end) else {
            continue;
        };
        let left = rect.leading(axis).floor();
        let right = rect.trailing(axis).floor();

        if left >= end {
            return accept(word.start);
        }
        if right > end {
            let letters: Vec<TextSpan> = Letters::new(word).collect();
            let past_edge = |span: &TextSpan| {
                oracle
                    .text_range_box(tree, node, span.start, span.end)
                    .is_some_and(|r| r.leading(axis).floor() >= end)
            };
            let first = letters.partition_point(|span| !past_edge(span));
            if let Some(letter) = letters.get(first) {
                log::trace!(
                    "Word {}..{} of {} straddles the edge; cut at {}.",
                    word.start,
                    word.end,
                    node,
                    letter.start
                );
                return accept(letter.start);
            }
        }
    }

    None
}
