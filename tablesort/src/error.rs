use tabledom::{DomError, NodeId};
use thiserror::Error;

/// Failures of the programmatic sort API.
///
/// Bound header handlers never surface these; they are logged and the
/// table is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("node {0} is not a table")]
    NotATable(NodeId),

    #[error("node {0} is no longer part of the document")]
    Detached(NodeId),

    #[error("table {table} has no header cell for column {column}")]
    NoHeaderCell { table: NodeId, column: usize },

    #[error("no document is available, table sorting is disabled")]
    DocumentUnavailable,

    #[error(transparent)]
    Dom(#[from] DomError),
}
