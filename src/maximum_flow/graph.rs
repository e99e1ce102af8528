use crate::maximum_flow::minimum_cut;
use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::value::FlowValue;
use std::fmt::Debug;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
}

#[derive(Default, Clone)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
}

impl<Flow> Graph<Flow>
where
    Flow: FlowValue,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.out_edges.resize_with(self.num_nodes + num_nodes, Vec::new);
        self.in_edges.resize_with(self.num_nodes + num_nodes, Vec::new);
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    // capacities are validated when a solver runs, not here
    pub fn add_directed_edge(&mut self, from: usize, to: usize, upper: Flow) -> Option<usize> {
        if from >= self.num_nodes || to >= self.num_nodes {
            return None;
        }

        self.edges.push(Edge { from, to, flow: Flow::zero(), upper });
        self.out_edges[from].push(self.num_edges);
        self.in_edges[to].push(self.num_edges);

        self.num_edges += 1;
        Some(self.num_edges - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    // net flow leaving `source`
    pub fn maximum_flow(&self, source: usize) -> Flow {
        self.edges.iter().fold(Flow::zero(), |mut flow, edge| {
            if edge.from == source && edge.to != source {
                flow += edge.flow;
            } else if edge.to == source && edge.from != source {
                flow -= edge.flow;
            }
            flow
        })
    }

    // source side of the minimum cut, valid once a solver has written a maximum flow
    pub fn minimum_cut(&self, source: usize) -> Vec<usize> {
        if source >= self.num_nodes {
            return Vec::new();
        }
        minimum_cut::minimum_cut(self, &[source])
    }
}

impl<Flow> Topology for Graph<Flow> {
    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    fn edge_source(&self, edge_id: usize) -> usize {
        self.edges[edge_id].from
    }

    #[inline]
    fn edge_target(&self, edge_id: usize) -> usize {
        self.edges[edge_id].to
    }

    #[inline]
    fn out_edges(&self, u: usize) -> &[usize] {
        &self.out_edges[u]
    }

    #[inline]
    fn in_edges(&self, u: usize) -> &[usize] {
        &self.in_edges[u]
    }
}

impl<Flow> FlowNetwork<Flow> for Graph<Flow>
where
    Flow: Copy,
{
    #[inline]
    fn capacity(&self, edge_id: usize) -> Flow {
        self.edges[edge_id].upper
    }

    #[inline]
    fn flow(&self, edge_id: usize) -> Flow {
        self.edges[edge_id].flow
    }

    #[inline]
    fn set_flow(&mut self, edge_id: usize, flow: Flow) {
        self.edges[edge_id].flow = flow;
    }

    #[inline]
    fn set_capacity(&mut self, edge_id: usize, capacity: Flow) {
        self.edges[edge_id].upper = capacity;
    }
}
