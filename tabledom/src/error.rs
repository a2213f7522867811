use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    Missing(NodeId),

    #[error("node {0} has no parent")]
    NoParent(NodeId),

    #[error("cannot move node {node} into its own subtree at {target}")]
    Cycle { node: NodeId, target: NodeId },

    #[error("node {0} cannot have children")]
    NotAContainer(NodeId),
}

/// Errors raised while parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("unterminated attribute selector starting at offset {0}")]
    UnterminatedAttribute(usize),

    #[error("missing name after {0:?}")]
    MissingName(char),
}
