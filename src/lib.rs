//! Maximum flow on capacitated directed networks with the push-relabel family of
//! algorithms: FIFO and relabel-to-front discharge orders sharing one preflow core, with
//! the global relabeling and gap heuristics.

pub mod maximum_flow;

#[cfg(test)]
pub(crate) mod test_utility;

pub use maximum_flow::compute_maximum_flow;
pub use maximum_flow::config::PushRelabelConfig;
pub use maximum_flow::error::MaximumFlowError;
pub use maximum_flow::graph::{Edge, Graph};
pub use maximum_flow::minimum_cut::{cut_capacity, minimum_cut};
pub use maximum_flow::network::{FlowNetwork, Topology};
pub use maximum_flow::push_relabel::{DischargeOrder, PushRelabel, PushRelabelStats};
pub use maximum_flow::push_relabel_fifo::{FifoOrder, PushRelabelFIFO};
pub use maximum_flow::push_relabel_to_front::{PushRelabelToFront, RelabelToFrontOrder};
pub use maximum_flow::value::FlowValue;
