use std::fmt::Debug;

use thiserror::Error;

/// Errors raised by graph operations whose preconditions must fail loudly.
///
/// Structural mutations report failure through their boolean result; only
/// traversals that cannot start return an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {label} not found")]
    VertexNotFound { label: String },
}

impl GraphError {
    pub(crate) fn vertex_not_found<T: Debug>(label: &T) -> Self {
        GraphError::VertexNotFound {
            label: format!("{:?}", label),
        }
    }
}
