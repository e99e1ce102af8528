use crate::maximum_flow::config::PushRelabelConfig;
use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::error::MaximumFlowError;
use crate::maximum_flow::height_buckets::HeightBuckets;
use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::terminals::Terminals;
use crate::maximum_flow::value::FlowValue;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Decides which active node is discharged next.
///
/// The engine calls `activate` whenever a node other than the source or the sink goes
/// from no excess to positive excess, and `after_relabel` whenever a node's height grows
/// (including nodes lifted by the gap heuristic). `has_excess` reports the current state
/// of any node.
pub trait DischargeOrder {
    fn new(num_nodes: usize) -> Self;

    fn activate(&mut self, u: usize);

    fn has_more_vertices_to_discharge<F: Fn(usize) -> bool>(&mut self, has_excess: F) -> bool;

    fn next_vertex_to_discharge<F: Fn(usize) -> bool>(&mut self, has_excess: F) -> Option<usize>;

    fn after_relabel(&mut self, _u: usize) {}

    /// Called once heights were computed from scratch, including the initial labelling.
    fn after_global_relabeling<F: Fn(usize) -> bool>(&mut self, _heights: &[usize], _source: usize, _sink: usize, _has_excess: F) {}
}

/// Counters of the most recent run.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PushRelabelStats {
    pub discharges: usize,
    pub pushes: usize,
    pub relabels: usize,
    pub global_relabels: usize,
    pub gaps: usize,
    pub lifted_nodes: usize,
}

/// Push-relabel maximum flow, parameterized by the order in which active nodes are
/// discharged.
///
/// Each call to [`PushRelabel::solve`] builds a fresh residual network, runs to
/// completion and writes the resulting flow back through [`FlowNetwork::set_flow`].
/// Nothing is shared between calls, so separate solvers may run on separate threads.
pub struct PushRelabel<Flow, Order> {
    config: PushRelabelConfig,
    stats: PushRelabelStats,
    _marker: PhantomData<fn() -> (Flow, Order)>,
}

impl<Flow, Order> Default for PushRelabel<Flow, Order> {
    fn default() -> Self {
        Self { config: PushRelabelConfig::default(), stats: PushRelabelStats::default(), _marker: PhantomData }
    }
}

impl<Flow, Order> PushRelabel<Flow, Order>
where
    Flow: FlowValue,
    Order: DischargeOrder,
{
    pub fn new(config: PushRelabelConfig) -> Self {
        Self { config, stats: PushRelabelStats::default(), _marker: PhantomData }
    }

    pub fn config(&self) -> &PushRelabelConfig {
        &self.config
    }

    pub fn stats(&self) -> PushRelabelStats {
        self.stats
    }

    pub fn solve<G>(&mut self, source: usize, sink: usize, graph: &mut G) -> Result<Flow, MaximumFlowError>
    where
        G: Topology + FlowNetwork<Flow>,
    {
        let terminals = Terminals::single(graph, source, sink)?;
        Ok(self.run(&terminals, graph))
    }

    /// Maximum flow from any of `sources` to any of `sinks`. Duplicates are ignored; a
    /// vertex in both sets is rejected.
    pub fn solve_multi_terminal<G>(&mut self, sources: &[usize], sinks: &[usize], graph: &mut G) -> Result<Flow, MaximumFlowError>
    where
        G: Topology + FlowNetwork<Flow>,
    {
        let terminals = Terminals::multi(graph, sources, sinks)?;
        Ok(self.run(&terminals, graph))
    }

    fn run<G>(&mut self, terminals: &Terminals<Flow>, graph: &mut G) -> Flow
    where
        G: Topology + FlowNetwork<Flow>,
    {
        debug!(
            num_nodes = graph.num_nodes(),
            num_edges = graph.num_edges(),
            source = terminals.source,
            sink = terminals.sink,
            artificial_edges = terminals.artificial_edges.len(),
            reversed = terminals.reversed,
            "push-relabel started"
        );

        let mut worker = Worker::<Flow, Order>::new(graph, terminals, &self.config);
        worker.run();

        // the sink never pushes, so its excess is the flow value
        let flow = worker.excesses[worker.sink];
        worker.csr.set_flow(graph);
        self.stats = worker.stats;

        debug!(
            flow = ?flow,
            discharges = self.stats.discharges,
            pushes = self.stats.pushes,
            relabels = self.stats.relabels,
            global_relabels = self.stats.global_relabels,
            gaps = self.stats.gaps,
            "push-relabel finished"
        );
        flow
    }
}

// State of one computation: created per call, dropped once the flow is written back.
struct Worker<'a, Flow, Order> {
    csr: CSR<Flow>,
    excesses: Vec<Flow>,
    current_edge: Vec<usize>,
    buckets: HeightBuckets,
    order: Order,
    source: usize,
    sink: usize,
    config: &'a PushRelabelConfig,
    relabels_since_global: usize,
    stats: PushRelabelStats,
}

impl<'a, Flow, Order> Worker<'a, Flow, Order>
where
    Flow: FlowValue,
    Order: DischargeOrder,
{
    fn new<G>(graph: &G, terminals: &Terminals<Flow>, config: &'a PushRelabelConfig) -> Self
    where
        G: Topology + FlowNetwork<Flow>,
    {
        let mut csr = CSR::default();
        csr.build(graph, terminals);
        let n = csr.num_nodes;

        Self {
            csr,
            excesses: vec![Flow::zero(); n],
            current_edge: vec![0; n],
            buckets: HeightBuckets::default(),
            order: Order::new(n),
            source: terminals.run_source(),
            sink: terminals.run_sink(),
            config,
            relabels_since_global: 0,
            stats: PushRelabelStats::default(),
        }
    }

    fn run(&mut self) {
        self.pre_process();
        let threshold = self.config.global_relabel_threshold(self.csr.num_nodes);

        while self.step(threshold) {
            debug_assert!(self.satisfies_invariants());
        }

        debug_assert!(self.satisfies_invariants());
        debug_assert!(self.is_flow());
    }

    // discharges the next active node; false once none is left
    fn step(&mut self, threshold: Option<usize>) -> bool {
        let excesses = &self.excesses;
        let has_excess = |u: usize| excesses[u].exceeds_epsilon();
        if !self.order.has_more_vertices_to_discharge(has_excess) {
            return false;
        }
        let Some(u) = self.order.next_vertex_to_discharge(has_excess) else {
            return false;
        };

        if u != self.source && u != self.sink {
            self.discharge(u);
        }

        if threshold.is_some_and(|threshold| self.relabels_since_global >= threshold) {
            self.global_relabeling();
        }
        true
    }

    fn pre_process(&mut self) {
        let (source, sink, n) = (self.source, self.sink, self.csr.num_nodes);

        // saturate every arc leaving the source
        for i in self.csr.start[source]..self.csr.start[source + 1] {
            let edge = &self.csr.inside_edge_list[i];
            let (to, delta) = (edge.to, edge.residual_capacity());
            if delta.exceeds_epsilon() {
                self.csr.push_flow(i, delta);
                self.excesses[to] += delta;
            }
        }

        self.csr.update_heights(source, sink);
        self.current_edge.copy_from_slice(&self.csr.start[..n]);
        self.buckets.build(&self.csr.heights, self.csr.unreachable_height(), n);

        let excesses = &self.excesses;
        self.order.after_global_relabeling(&self.csr.heights, source, sink, |u| excesses[u].exceeds_epsilon());
        for u in 0..n {
            if u != source && u != sink && self.excesses[u].exceeds_epsilon() {
                self.order.activate(u);
            }
        }
    }

    fn discharge(&mut self, u: usize) {
        self.stats.discharges += 1;
        let end = self.csr.start[u + 1];

        while self.excesses[u].exceeds_epsilon() {
            let i = self.current_edge[u];
            if i == end {
                if !self.relabel(u) {
                    break;
                }
                continue;
            }

            if self.csr.is_admissible_edge(u, i) {
                self.push(u, i);
                if self.csr.inside_edge_list[i].residual_capacity().exceeds_epsilon() {
                    // non-saturating push, u is done
                    debug_assert!(!self.excesses[u].exceeds_epsilon());
                    break;
                }
            }
            self.current_edge[u] += 1;
        }
    }

    // push from u along inside edge i
    fn push(&mut self, u: usize, i: usize) {
        let edge = &self.csr.inside_edge_list[i];
        let to = edge.to;
        let delta = self.excesses[u].min_flow(edge.residual_capacity());
        let was_active = self.excesses[to].exceeds_epsilon();

        self.csr.push_flow(i, delta);
        self.excesses[u] -= delta;
        self.excesses[to] += delta;
        self.stats.pushes += 1;

        if !was_active && to != self.source && to != self.sink && self.excesses[to].exceeds_epsilon() {
            self.order.activate(to);
        }
    }

    // Returns false when u has no residual arc left; it is parked at the unreachable height
    // then. This cannot happen to a node with excess in a valid preflow.
    fn relabel(&mut self, u: usize) -> bool {
        let n = self.csr.num_nodes;
        let unreachable = self.csr.unreachable_height();
        let old_height = self.csr.heights[u];

        let lowest = self.csr.neighbors(u).filter(|edge| edge.residual_capacity().exceeds_epsilon()).map(|edge| self.csr.heights[edge.to]).min();
        let new_height = lowest.map_or(unreachable, |height| (height + 1).min(unreachable));
        debug_assert!(new_height > old_height);

        self.buckets.move_node(u, old_height, new_height);
        self.csr.heights[u] = new_height;
        self.current_edge[u] = self.csr.start[u];
        self.stats.relabels += 1;
        self.relabels_since_global += 1;
        self.order.after_relabel(u);

        if self.config.gap_heuristic && old_height < n && self.buckets.count(old_height) == 0 {
            self.gap_relabeling(old_height);
        }

        lowest.is_some() && self.csr.heights[u] < unreachable
    }

    // gap relabeling heuristic
    // no node is left at height `gap` < n, so nodes strictly between gap and n can no
    // longer reach the sink: lift them to n + 1
    fn gap_relabeling(&mut self, gap: usize) {
        let n = self.csr.num_nodes;
        let start = &self.csr.start;
        let current_edge = &mut self.current_edge;
        let order = &mut self.order;

        let lifted = self.buckets.lift_above(gap, n + 1, &mut self.csr.heights, |v| {
            current_edge[v] = start[v];
            order.after_relabel(v);
        });

        self.stats.gaps += 1;
        self.stats.lifted_nodes += lifted;
        trace!(gap, lifted, "gap relabeling");
    }

    // global relabeling heuristic
    // O(n + m)
    fn global_relabeling(&mut self) {
        let previous = self.csr.heights.clone();
        self.csr.update_heights(self.source, self.sink);

        // exact heights are lower bounds too, except for nodes that were out of reach and
        // became reachable again; heights never decrease
        for (height, &old) in self.csr.heights.iter_mut().zip(previous.iter()) {
            *height = (*height).max(old);
        }

        let n = self.csr.num_nodes;
        self.current_edge.copy_from_slice(&self.csr.start[..n]);
        self.buckets.build(&self.csr.heights, self.csr.unreachable_height(), n);

        let excesses = &self.excesses;
        self.order.after_global_relabeling(&self.csr.heights, self.source, self.sink, |u| excesses[u].exceeds_epsilon());

        trace!(relabels = self.relabels_since_global, "global relabeling");
        self.relabels_since_global = 0;
        self.stats.global_relabels += 1;
    }

    fn satisfies_invariants(&self) -> bool {
        let n = self.csr.num_nodes;
        self.csr.satisfy_constraints()
            && self.csr.satisfy_height_condition()
            && self.excess_is_consistent()
            && self.csr.heights[self.source] == n
            && self.csr.heights[self.sink] == 0
    }

    // excess(u) == inflow(u) - outflow(u) >= 0 away from the terminals
    fn excess_is_consistent(&self) -> bool {
        (0..self.csr.num_nodes).filter(|&u| u != self.source && u != self.sink).all(|u| {
            let excess = self.excesses[u];
            let drift = excess + self.csr.outflow(u);
            !(Flow::zero() - excess).exceeds_epsilon() && !drift.exceeds_epsilon() && !(Flow::zero() - drift).exceeds_epsilon()
        })
    }

    // no node other than the terminals holds excess
    fn is_flow(&self) -> bool {
        (0..self.csr.num_nodes).all(|u| u == self.source || u == self.sink || !self.excesses[u].exceeds_epsilon())
    }
}
