//! Graph-subsystem error types.

use thiserror::Error;

use er_core::ResourceId;

use crate::ResourceKind;

/// Errors produced while loading a resource graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge list parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors produced by [`ResourceTracker`](crate::ResourceTracker) allocation.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource {0} is not registered")]
    NotFound(ResourceId),

    #[error("resource {0} is not available")]
    Unavailable(ResourceId),

    #[error("resource {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id:       ResourceId,
        expected: ResourceKind,
        actual:   ResourceKind,
    },
}

pub type ResourceResult<T> = Result<T, ResourceError>;
