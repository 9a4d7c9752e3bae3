//! Document trees for pagination.
//!
//! One arena-backed [`Tree`] type serves three roles: the immutable content
//! tree being paginated, the mutable destination box a page is filled into,
//! and the detached fragments extracted when a page overflows. Nodes are
//! addressed by [`NodeId`] (an arena index, only meaningful for the tree that
//! issued it) and correlated across trees by their [`NodeRef`].

mod error;
pub mod node;
pub mod spec;
pub mod text;
pub mod tree;

pub use error::DomError;
pub use folio_types::NodeRef;
pub use node::{BreakValue, Display, Element, Float, Node, NodeData, NodeId, Style, Tag};
pub use spec::ContentSpec;
pub use tree::{Descendants, Tree};

/// Extracted overflow content, ancestor chain included.
pub type Fragment = Tree;
