use crate::node::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Node {0:?} does not belong to this tree.")]
    UnknownNode(NodeId),
    #[error("Cannot insert node {child:?} under {parent:?}: it would create a cycle.")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("Node {0:?} cannot have children.")]
    NotAParent(NodeId),
    #[error("Invalid content fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}
