use folio::{DomError, Tree};
use serde_json::{Value, json};

/// A paragraph with a single text child.
pub fn paragraph(r: &str, text: &str) -> Value {
    json!({ "tag": "p", "ref": r, "children": [text] })
}

/// `count` paragraphs "Paragraph N" with refs `pN`, numbered from `first`.
pub fn numbered_paragraphs(first: usize, count: usize) -> Vec<Value> {
    (first..first + count)
        .map(|i| paragraph(&format!("p{}", i), &format!("Paragraph {}", i)))
        .collect()
}

pub fn page_break(r: &str) -> Value {
    json!({ "tag": "page-break", "ref": r })
}

pub fn section(r: &str, children: Vec<Value>) -> Value {
    json!({ "tag": "section", "ref": r, "children": children })
}

pub fn with_style(mut node: Value, style: Value) -> Value {
    node["style"] = style;
    node
}

/// An empty block occupying `lines` whole lines, standing in for an image.
pub fn figure(r: &str, lines: usize) -> Value {
    json!({ "tag": "figure", "ref": r, "attrs": { "lines": lines.to_string() } })
}

/// `count` space-separated words "w01", "w02", ...
pub fn words(count: usize) -> String {
    (1..=count)
        .map(|i| format!("w{:02}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serializes `nodes` and parses them back through the JSON fixture loader.
pub fn load(nodes: Vec<Value>) -> Result<Tree, DomError> {
    Tree::from_json_str(&Value::Array(nodes).to_string())
}

/// Chapters of headings and long paragraphs with inline emphasis.
pub fn report(chapters: usize, paragraphs: usize) -> Vec<Value> {
    let body = "Lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                tempor incididunt ut labore et dolore magna aliqua";
    (0..chapters)
        .map(|c| {
            let mut children = vec![json!({ "tag": "h1", "children": [format!("Chapter {}", c)] })];
            for p in 0..paragraphs {
                children.push(json!({
                    "tag": "p",
                    "children": [
                        format!("{} {} ", c, body),
                        { "tag": "em", "children": ["emphasised"] },
                        format!(" tail{} of the paragraph", p)
                    ]
                }));
            }
            section(&format!("chapter{}", c), children)
        })
        .collect()
}
