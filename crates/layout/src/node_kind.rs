use folio_dom::{Display, NodeData, NodeId, Tag, Tree};

/// How the layout engine consumes a node.
///
/// This replaces ad-hoc tag checks at the call sites: a node is either
/// walked into (its children are checked for fit one by one) or placed whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Children need individual fit evaluation.
    Container,
    /// Rendered in one shot, fit-or-nothing for recursion purposes.
    Atomic,
    /// `display: none`; placed whole, contributes nothing.
    Hidden,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Container => "Container",
            NodeKind::Atomic => "Atomic",
            NodeKind::Hidden => "Hidden",
        }
    }
}

/// Classifies `node` from its tag and declared display only.
pub fn classify(tree: &Tree, node: NodeId) -> NodeKind {
    let el = match tree.get(node).map(|n| &n.data) {
        Some(NodeData::Element(el)) => el,
        Some(NodeData::Text(_)) => return NodeKind::Atomic,
        Some(NodeData::Root) | None => return NodeKind::Container,
    };

    if el.style.display == Some(Display::None) {
        return NodeKind::Hidden;
    }

    match el.tag {
        // Inline
        Tag::A
        | Tag::Abbr
        | Tag::Acronym
        | Tag::B
        | Tag::Bdo
        | Tag::Big
        | Tag::Br
        | Tag::Button
        | Tag::Cite
        | Tag::Code
        | Tag::Dfn
        | Tag::Em
        | Tag::I
        | Tag::Img
        | Tag::Input
        | Tag::Kbd
        | Tag::Label
        | Tag::Map
        | Tag::Object
        | Tag::Q
        | Tag::Samp
        | Tag::Script
        | Tag::Select
        | Tag::Small
        | Tag::Span
        | Tag::Strong
        | Tag::Sub
        | Tag::Sup
        | Tag::Textarea
        | Tag::Time
        | Tag::Tt
        | Tag::Var
        // Content
        | Tag::P
        | Tag::H1
        | Tag::H2
        | Tag::H3
        | Tag::H4
        | Tag::H5
        | Tag::H6
        | Tag::Figcaption
        | Tag::Blockquote
        | Tag::Pre
        | Tag::Li
        | Tag::Tr
        | Tag::Dt
        | Tag::Dd
        | Tag::Video
        | Tag::Canvas => NodeKind::Atomic,
        _ => NodeKind::Container,
    }
}

pub fn is_container(tree: &Tree, node: NodeId) -> bool {
    classify(tree, node) == NodeKind::Container
}
