/// Read-only structure of a directed network. Edge ids are dense in `0..num_edges()`.
pub trait Topology {
    fn num_nodes(&self) -> usize;

    fn num_edges(&self) -> usize;

    fn edge_source(&self, edge_id: usize) -> usize;

    fn edge_target(&self, edge_id: usize) -> usize;

    fn out_edges(&self, u: usize) -> &[usize];

    fn in_edges(&self, u: usize) -> &[usize];

    fn is_directed(&self) -> bool {
        true
    }
}

/// Per-edge capacities and the flow written back by a solver.
pub trait FlowNetwork<Flow> {
    fn capacity(&self, edge_id: usize) -> Flow;

    fn flow(&self, edge_id: usize) -> Flow;

    fn set_flow(&mut self, edge_id: usize, flow: Flow);

    fn set_capacity(&mut self, edge_id: usize, capacity: Flow);
}
