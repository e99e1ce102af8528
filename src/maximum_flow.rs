pub mod config;
mod csr;
pub mod error;
pub mod graph;
mod height_buckets;
pub mod minimum_cut;
pub mod network;
pub mod push_relabel;
pub mod push_relabel_fifo;
pub mod push_relabel_to_front;
mod terminals;
pub mod value;

use crate::maximum_flow::error::MaximumFlowError;
use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::push_relabel_to_front::PushRelabelToFront;
use crate::maximum_flow::value::FlowValue;

/// Maximum flow from `source` to `sink` with relabel-to-front and the default heuristics.
/// The flow of every edge is written back to `graph`.
pub fn compute_maximum_flow<Flow, G>(source: usize, sink: usize, graph: &mut G) -> Result<Flow, MaximumFlowError>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    PushRelabelToFront::default().solve(source, sink, graph)
}
