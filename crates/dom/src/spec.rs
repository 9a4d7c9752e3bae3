//! Declarative content description, used to build trees from JSON fixtures.
//!
//! ```json
//! [
//!   { "tag": "h1", "children": ["Title"] },
//!   { "tag": "p", "ref": "intro", "style": { "break-before": "page" }, "children": ["Hello"] }
//! ]
//! ```

use crate::error::DomError;
use crate::node::{Element, NodeId, Style, Tag};
use crate::tree::Tree;
use folio_types::NodeRef;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentSpec {
    Text(String),
    Element {
        tag: String,
        #[serde(default, rename = "ref")]
        node_ref: Option<String>,
        #[serde(default)]
        style: Style,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<ContentSpec>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecDocument {
    Many(Vec<ContentSpec>),
    One(ContentSpec),
}

impl ContentSpec {
    pub fn text(text: impl Into<String>) -> Self {
        ContentSpec::Text(text.into())
    }

    pub fn element(tag: &str, children: Vec<ContentSpec>) -> Self {
        ContentSpec::Element {
            tag: tag.to_string(),
            node_ref: None,
            style: Style::default(),
            attrs: BTreeMap::new(),
            children,
        }
    }

    /// Sets the ref; ignored for text.
    pub fn with_ref(mut self, r: &str) -> Self {
        if let ContentSpec::Element { node_ref, .. } = &mut self {
            *node_ref = Some(r.to_string());
        }
        self
    }

    pub fn with_style(mut self, new_style: Style) -> Self {
        if let ContentSpec::Element { style, .. } = &mut self {
            *style = new_style;
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let ContentSpec::Element { attrs, .. } = &mut self {
            attrs.insert(name.to_string(), value.to_string());
        }
        self
    }
}

impl Tree {
    /// Builds a content tree whose root holds `specs`, assigning refs to
    /// every node that does not declare one.
    pub fn from_specs(specs: &[ContentSpec]) -> Result<Tree, DomError> {
        let mut tree = Tree::new();
        let root = tree.root();
        for spec in specs {
            let id = tree.build_spec(spec);
            tree.append(root, id)?;
        }
        tree.ensure_refs();
        Ok(tree)
    }

    /// Parses either a single node or an array of nodes.
    pub fn from_json_str(json: &str) -> Result<Tree, DomError> {
        match serde_json::from_str::<SpecDocument>(json)? {
            SpecDocument::Many(specs) => Tree::from_specs(&specs),
            SpecDocument::One(spec) => Tree::from_specs(std::slice::from_ref(&spec)),
        }
    }

    fn build_spec(&mut self, spec: &ContentSpec) -> NodeId {
        match spec {
            ContentSpec::Text(text) => self.create_text(text.clone(), None),
            ContentSpec::Element {
                tag,
                node_ref,
                style,
                attrs,
                children,
            } => {
                let element = Element {
                    tag: Tag::from_name(tag),
                    style: style.clone(),
                    attrs: attrs.clone(),
                };
                let id = self.create_element(element, node_ref.as_deref().map(NodeRef::from));
                for child in children {
                    let child_id = self.build_spec(child);
                    // Freshly created nodes cannot form a cycle.
                    if let Err(e) = self.append(id, child_id) {
                        log::warn!("Dropping fixture child: {}", e);
                    }
                }
                id
            }
        }
    }
}
