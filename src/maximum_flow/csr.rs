use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::terminals::Terminals;
use crate::maximum_flow::value::FlowValue;
use std::collections::VecDeque;

pub(crate) const NO_EDGE: usize = usize::MAX;

// One residual arc. Every original edge has a forward arc (upper = capacity) and a twin
// (upper = 0) such that flow(twin) == -flow(forward).
#[derive(Default, PartialEq, Debug, Clone)]
pub struct InsideEdge<Flow> {
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub rev: usize,
}

impl<Flow> InsideEdge<Flow>
where
    Flow: FlowValue,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.upper - self.flow
    }
}

#[derive(Default)]
pub struct CSR<Flow> {
    pub num_nodes: usize,
    pub num_edges: usize,
    // NO_EDGE for self loops, which never enter the residual network
    pub edge_index_to_inside_edge_index: Vec<usize>,

    pub start: Vec<usize>,
    pub inside_edge_list: Vec<InsideEdge<Flow>>,
    pub heights: Vec<usize>,
    que: VecDeque<usize>,
}

impl<Flow> CSR<Flow>
where
    Flow: FlowValue,
{
    pub fn build<G>(&mut self, graph: &G, terminals: &Terminals<Flow>)
    where
        G: Topology + FlowNetwork<Flow>,
    {
        self.num_nodes = terminals.num_nodes;
        self.num_edges = graph.num_edges();

        // (from, to, upper, original edge index), every arc turned around for a reversed run
        let reversed = terminals.reversed;
        let arcs: Vec<(usize, usize, Flow, usize)> = (0..self.num_edges)
            .map(|edge_id| (graph.edge_source(edge_id), graph.edge_target(edge_id), graph.capacity(edge_id), edge_id))
            .filter(|&(u, v, _, _)| u != v)
            .chain(terminals.artificial_edges.iter().map(|e| (e.from, e.to, e.upper, NO_EDGE)))
            .map(|(u, v, upper, edge_id)| if reversed { (v, u, upper, edge_id) } else { (u, v, upper, edge_id) })
            .collect();

        // initialize
        self.edge_index_to_inside_edge_index = vec![NO_EDGE; self.num_edges];
        self.start = vec![0; self.num_nodes + 1];
        self.inside_edge_list = vec![InsideEdge { to: 0, flow: Flow::zero(), upper: Flow::zero(), rev: 0 }; 2 * arcs.len()];
        self.heights = vec![0; self.num_nodes];
        self.que.clear();

        let mut degree = vec![0; self.num_nodes];
        for &(u, v, _, _) in arcs.iter() {
            degree[u] += 1;
            degree[v] += 1;
        }

        for i in 1..=self.num_nodes {
            self.start[i] = self.start[i - 1] + degree[i - 1];
        }

        let mut counter = vec![0; self.num_nodes];
        for &(u, v, upper, edge_id) in arcs.iter() {
            let inside_edge_index_u = self.start[u] + counter[u];
            counter[u] += 1;
            let inside_edge_index_v = self.start[v] + counter[v];
            counter[v] += 1;
            if edge_id != NO_EDGE {
                self.edge_index_to_inside_edge_index[edge_id] = inside_edge_index_u;
            }

            self.inside_edge_list[inside_edge_index_u] = InsideEdge { to: v, flow: Flow::zero(), upper, rev: inside_edge_index_v };
            self.inside_edge_list[inside_edge_index_v] = InsideEdge { to: u, flow: Flow::zero(), upper: Flow::zero(), rev: inside_edge_index_u };
        }
    }

    // copy the flow of the original edges back, artificial edges are dropped
    pub fn set_flow<G>(&self, graph: &mut G)
    where
        G: FlowNetwork<Flow>,
    {
        for edge_id in 0..self.num_edges {
            let i = self.edge_index_to_inside_edge_index[edge_id];
            let flow = if i == NO_EDGE { Flow::zero() } else { self.inside_edge_list[i].flow };
            graph.set_flow(edge_id, flow);
        }
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> std::slice::Iter<'_, InsideEdge<Flow>> {
        self.inside_edge_list[self.start[u]..self.start[u + 1]].iter()
    }

    #[inline]
    pub fn push_flow(&mut self, inside_edge_index: usize, flow: Flow) {
        let rev = self.inside_edge_list[inside_edge_index].rev;

        // update flow
        self.inside_edge_list[inside_edge_index].flow += flow;
        self.inside_edge_list[rev].flow -= flow;
    }

    #[inline]
    pub fn is_admissible_edge(&self, from: usize, i: usize) -> bool {
        let edge = &self.inside_edge_list[i];
        edge.residual_capacity().exceeds_epsilon() && self.heights[from] == self.heights[edge.to] + 1
    }

    // net flow leaving u
    pub fn outflow(&self, u: usize) -> Flow {
        self.neighbors(u).fold(Flow::zero(), |sum, e| sum + e.flow)
    }

    #[inline]
    pub fn unreachable_height(&self) -> usize {
        2 * self.num_nodes
    }

    // O(n + m)
    // exact heights in the residual network:
    //   distance to the sink for nodes that can still reach it,
    //   n + distance to the source for nodes that can only reach the source,
    //   2n for nodes that reach neither
    pub fn update_heights(&mut self, source: usize, sink: usize) {
        let n = self.num_nodes;
        let unreachable = self.unreachable_height();
        self.heights.fill(unreachable);
        self.heights[sink] = 0;
        self.heights[source] = n;

        self.reverse_bfs(sink, source);
        self.reverse_bfs(source, sink);
    }

    fn reverse_bfs(&mut self, root: usize, excluded: usize) {
        let unreachable = self.unreachable_height();
        self.que.clear();
        self.que.push_back(root);

        while let Some(v) = self.que.pop_front() {
            for e in self.inside_edge_list[self.start[v]..self.start[v + 1]].iter() {
                // e.to -> v in the residual network
                let u = e.to;
                if u == excluded || self.heights[u] != unreachable {
                    continue;
                }
                if self.inside_edge_list[e.rev].residual_capacity().exceeds_epsilon() {
                    self.heights[u] = self.heights[v] + 1;
                    self.que.push_back(u);
                }
            }
        }
    }

    // -upper(twin) <= flow <= upper on every arc (within tolerance) and twins cancel
    pub fn satisfy_constraints(&self) -> bool {
        self.inside_edge_list.iter().all(|e| {
            let twin = &self.inside_edge_list[e.rev];
            !(e.flow - e.upper).exceeds_epsilon() && !(Flow::zero() - e.flow - twin.upper).exceeds_epsilon() && e.flow + twin.flow == Flow::zero()
        })
    }

    // residual arcs never drop more than one level
    pub fn satisfy_height_condition(&self) -> bool {
        (0..self.num_nodes).all(|u| self.neighbors(u).all(|e| !e.residual_capacity().exceeds_epsilon() || self.heights[u] <= self.heights[e.to] + 1))
    }
}
