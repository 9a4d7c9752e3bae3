//! Newtype wrapper for the stable node identity shared by a content node and its clones.

use std::fmt;
use std::sync::Arc;

/// Stable identity correlating a content-tree node with its clone(s) in a
/// destination tree and across page boundaries.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeRef(Arc<str>);

impl NodeRef {
    /// Creates a new NodeRef from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this ref
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeRef {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<Arc<str>> for NodeRef {
    fn from(s: Arc<str>) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
