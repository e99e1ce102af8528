use thiserror::Error;

/// Rejected input. Raised before any flow is written to the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaximumFlowError {
    #[error("node {0} is out of range")]
    NodeOutOfRange(usize),

    #[error("node {0} is used as both source and sink")]
    SourceIsSink(usize),

    #[error("edge {edge_id} has a negative or non-finite capacity")]
    InvalidCapacity { edge_id: usize },

    #[error("maximum flow requires a directed graph")]
    UndirectedGraph,

    #[error("no source vertex given")]
    NoSource,

    #[error("no sink vertex given")]
    NoSink,

    #[error("capacities on both the source side and the sink side overflow the flow type")]
    CapacityOverflow,
}
