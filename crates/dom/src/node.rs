use folio_types::NodeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Arena index of a node inside one [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The element name of a node.
///
/// Parsed case-insensitively; anything unrecognised is kept verbatim in
/// [`Tag::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    // Inline
    A,
    Abbr,
    Acronym,
    B,
    Bdo,
    Big,
    Br,
    Button,
    Cite,
    Code,
    Dfn,
    Em,
    I,
    Img,
    Input,
    Kbd,
    Label,
    Map,
    Object,
    Q,
    Samp,
    Script,
    Select,
    Small,
    Span,
    Strong,
    Sub,
    Sup,
    Textarea,
    Time,
    Tt,
    Var,
    // Content
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Figcaption,
    Blockquote,
    Pre,
    Li,
    Tr,
    Dt,
    Dd,
    Video,
    Canvas,
    // Structural
    Body,
    Main,
    Article,
    Section,
    Aside,
    Nav,
    Header,
    Footer,
    Div,
    Figure,
    Ul,
    Ol,
    Dl,
    Table,
    Thead,
    Tbody,
    Tfoot,
    /// An explicit, unconditional page-break marker.
    PageBreak,
    Other(String),
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::A => "a",
            Tag::Abbr => "abbr",
            Tag::Acronym => "acronym",
            Tag::B => "b",
            Tag::Bdo => "bdo",
            Tag::Big => "big",
            Tag::Br => "br",
            Tag::Button => "button",
            Tag::Cite => "cite",
            Tag::Code => "code",
            Tag::Dfn => "dfn",
            Tag::Em => "em",
            Tag::I => "i",
            Tag::Img => "img",
            Tag::Input => "input",
            Tag::Kbd => "kbd",
            Tag::Label => "label",
            Tag::Map => "map",
            Tag::Object => "object",
            Tag::Q => "q",
            Tag::Samp => "samp",
            Tag::Script => "script",
            Tag::Select => "select",
            Tag::Small => "small",
            Tag::Span => "span",
            Tag::Strong => "strong",
            Tag::Sub => "sub",
            Tag::Sup => "sup",
            Tag::Textarea => "textarea",
            Tag::Time => "time",
            Tag::Tt => "tt",
            Tag::Var => "var",
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Figcaption => "figcaption",
            Tag::Blockquote => "blockquote",
            Tag::Pre => "pre",
            Tag::Li => "li",
            Tag::Tr => "tr",
            Tag::Dt => "dt",
            Tag::Dd => "dd",
            Tag::Video => "video",
            Tag::Canvas => "canvas",
            Tag::Body => "body",
            Tag::Main => "main",
            Tag::Article => "article",
            Tag::Section => "section",
            Tag::Aside => "aside",
            Tag::Nav => "nav",
            Tag::Header => "header",
            Tag::Footer => "footer",
            Tag::Div => "div",
            Tag::Figure => "figure",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Dl => "dl",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tfoot => "tfoot",
            Tag::PageBreak => "page-break",
            Tag::Other(name) => name,
        }
    }

    /// Whether elements with this tag are laid out inline by default.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
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
        )
    }
}

impl Tag {
    /// Parses an element name, case-insensitively.
    pub fn from_name(name: &str) -> Tag {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "a" => Tag::A,
            "abbr" => Tag::Abbr,
            "acronym" => Tag::Acronym,
            "b" => Tag::B,
            "bdo" => Tag::Bdo,
            "big" => Tag::Big,
            "br" => Tag::Br,
            "button" => Tag::Button,
            "cite" => Tag::Cite,
            "code" => Tag::Code,
            "dfn" => Tag::Dfn,
            "em" => Tag::Em,
            "i" => Tag::I,
            "img" => Tag::Img,
            "input" => Tag::Input,
            "kbd" => Tag::Kbd,
            "label" => Tag::Label,
            "map" => Tag::Map,
            "object" => Tag::Object,
            "q" => Tag::Q,
            "samp" => Tag::Samp,
            "script" => Tag::Script,
            "select" => Tag::Select,
            "small" => Tag::Small,
            "span" => Tag::Span,
            "strong" => Tag::Strong,
            "sub" => Tag::Sub,
            "sup" => Tag::Sup,
            "textarea" => Tag::Textarea,
            "time" => Tag::Time,
            "tt" => Tag::Tt,
            "var" => Tag::Var,
            "p" => Tag::P,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "figcaption" => Tag::Figcaption,
            "blockquote" => Tag::Blockquote,
            "pre" => Tag::Pre,
            "li" => Tag::Li,
            "tr" => Tag::Tr,
            "dt" => Tag::Dt,
            "dd" => Tag::Dd,
            "video" => Tag::Video,
            "canvas" => Tag::Canvas,
            "body" => Tag::Body,
            "main" => Tag::Main,
            "article" => Tag::Article,
            "section" => Tag::Section,
            "aside" => Tag::Aside,
            "nav" => Tag::Nav,
            "header" => Tag::Header,
            "footer" => Tag::Footer,
            "div" => Tag::Div,
            "figure" => Tag::Figure,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "dl" => Tag::Dl,
            "table" => Tag::Table,
            "thead" => Tag::Thead,
            "tbody" => Tag::Tbody,
            "tfoot" => Tag::Tfoot,
            "page-break" | "pagebreak" => Tag::PageBreak,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl FromStr for Tag {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tag::from_name(s))
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::from_name(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Table,
    TableRow,
    TableCell,
    Flex,
    Grid,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

/// Value of a `break-before` / `break-after` declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakValue {
    #[default]
    Auto,
    Avoid,
    AvoidPage,
    Column,
    Page,
    Left,
    Right,
    Recto,
    Verso,
}

impl BreakValue {
    /// Whether this value forces a page break.
    pub fn is_forced(self) -> bool {
        matches!(
            self,
            BreakValue::Page
                | BreakValue::Left
                | BreakValue::Right
                | BreakValue::Recto
                | BreakValue::Verso
        )
    }
}

/// The resolved style properties the engine consults.
///
/// Style computation happens upstream; this only carries its results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Style {
    pub display: Option<Display>,
    pub float: Float,
    pub break_before: BreakValue,
    pub break_after: BreakValue,
    /// Named page this element must be placed on.
    pub page: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub style: Style,
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            style: Style::default(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Declared display, falling back to the tag's default.
    pub fn display(&self) -> Display {
        match self.style.display {
            Some(display) => display,
            None if self.tag.is_inline() => Display::Inline,
            None if self.tag == Tag::Li => Display::ListItem,
            None if self.tag == Tag::Tr => Display::TableRow,
            None => Display::Block,
        }
    }

    pub fn is_floated(&self) -> bool {
        self.style.float != Float::None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Root,
    Element(Element),
    Text(String),
}

impl NodeData {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeData::Root => "root",
            NodeData::Element(_) => "element",
            NodeData::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub node_ref: Option<NodeRef>,
    /// Set on clones rebuilt as continuation ancestors of a split node.
    pub split_from: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attached: bool,
}

impl Node {
    pub(crate) fn new(data: NodeData, node_ref: Option<NodeRef>) -> Self {
        Self {
            data,
            node_ref,
            split_from: false,
            parent: None,
            children: Vec::new(),
            attached: false,
        }
    }

    pub fn element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
