//! Error types for drag/drop configuration.
//!
//! Only configuration mistakes surface as errors. Geometry misses (nothing
//! under the pointer, a container scrolled out of view) and no-op conditions
//! (sorting disabled, duplicate sibling registration) are resolved internally.

use thiserror::Error;

use crate::types::{DragId, DropListId, NodeId, NodeKind, ResizeId};

/// Errors raised synchronously at the point of misuse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragDropError {
    /// The configured root resolved to something that cannot be dragged or
    /// resized (a text node, a comment, the document itself).
    #[error("root of node {node:?} resolved to a {kind:?} node; a root must be an element")]
    InvalidRootElement { node: NodeId, kind: NodeKind },

    /// The same drop container was registered twice.
    #[error("drop container {0:?} is already registered")]
    DuplicateRegistration(DropListId),

    /// A resize boundary that does not contain the resizable element.
    #[error("resize boundary {boundary:?} does not contain element {element:?}")]
    BoundaryDoesNotContain { boundary: NodeId, element: NodeId },

    #[error("unknown drag item {0:?}")]
    UnknownDrag(DragId),

    #[error("unknown drop container {0:?}")]
    UnknownDropList(DropListId),

    #[error("unknown resizable {0:?}")]
    UnknownResizable(ResizeId),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for engine operations
pub type DragDropResult<T> = Result<T, DragDropError>;

impl From<String> for DragDropError {
    fn from(s: String) -> Self {
        DragDropError::Config(s)
    }
}

impl From<&str> for DragDropError {
    fn from(s: &str) -> Self {
        DragDropError::Config(s.to_string())
    }
}
