use crate::surface::{NodeId, StyleProperty};

/// Errors raised by the simulation engine and its style surfaces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node {0} is not available on this surface")]
    NodeUnavailable(NodeId),

    #[error("surface rejected {property} on node {node}: {reason}")]
    Rejected {
        node: NodeId,
        property: StyleProperty,
        reason: String,
    },
}
