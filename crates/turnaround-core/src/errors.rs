use crate::types::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnError {
    #[error("Layer '{0}' was not found")]
    MissingNode(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Layer '{0}' has no geometry")]
    EmptyGeometry(String),
    #[error("Node {0} is no longer part of the scene")]
    StaleNode(NodeId),
    #[error("Layer '{0}' has no parent to duplicate into")]
    DetachedNode(String),
    #[error("Run cancelled before frame '{0}' was transformed")]
    Cancelled(String),
    #[error("Shapes must have the same number of points ({0} vs {1})")]
    PointCountMismatch(usize, usize),
}

/// Failure to copy a single item during a deep duplication.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemCopyError {
    #[error("Item '{0}' has non-finite coordinates")]
    NonFiniteGeometry(String),
}
