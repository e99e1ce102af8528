use crate::maximum_flow::error::MaximumFlowError;
use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::value::FlowValue;

// An edge that exists only inside the residual arena.
#[derive(PartialEq, Debug, Clone)]
pub(crate) struct ArtificialEdge<Flow> {
    pub from: usize,
    pub to: usize,
    pub upper: Flow,
}

// Source and sink of one run, possibly a super-source / super-sink appended after the
// original vertices. A reversed run pushes from the sink side over reversed edges, which
// yields the same flow on every edge.
#[derive(PartialEq, Debug)]
pub(crate) struct Terminals<Flow> {
    pub source: usize,
    pub sink: usize,
    pub num_nodes: usize,
    pub artificial_edges: Vec<ArtificialEdge<Flow>>,
    pub reversed: bool,
}

impl<Flow> Terminals<Flow>
where
    Flow: FlowValue,
{
    pub fn single<G>(graph: &G, source: usize, sink: usize) -> Result<Self, MaximumFlowError>
    where
        G: Topology + FlowNetwork<Flow>,
    {
        validate_graph(graph)?;
        validate_node(graph, source)?;
        validate_node(graph, sink)?;
        if source == sink {
            return Err(MaximumFlowError::SourceIsSink(source));
        }

        // every excess in the run is bounded by what the first push injects
        let reversed = match (outgoing_capacity(graph, source), incoming_capacity(graph, sink)) {
            (Some(_), _) => false,
            (None, Some(_)) => true,
            (None, None) => return Err(MaximumFlowError::CapacityOverflow),
        };

        Ok(Self { source, sink, num_nodes: graph.num_nodes(), artificial_edges: Vec::new(), reversed })
    }

    pub fn multi<G>(graph: &G, sources: &[usize], sinks: &[usize]) -> Result<Self, MaximumFlowError>
    where
        G: Topology + FlowNetwork<Flow>,
    {
        let sources = normalize(graph, sources)?;
        let sinks = normalize(graph, sinks)?;
        if sources.is_empty() {
            return Err(MaximumFlowError::NoSource);
        }
        if sinks.is_empty() {
            return Err(MaximumFlowError::NoSink);
        }
        if let Some(&both) = sources.iter().find(|&&u| sinks.binary_search(&u).is_ok()) {
            return Err(MaximumFlowError::SourceIsSink(both));
        }
        if sources.len() == 1 && sinks.len() == 1 {
            return Self::single(graph, sources[0], sinks[0]);
        }
        validate_graph(graph)?;

        // a terminal can never use more than the capacity on its own edges, so that
        // bound stands in for an unbounded artificial edge
        let source_bounds: Vec<Option<Flow>> = sources.iter().map(|&u| outgoing_capacity(graph, u)).collect();
        let sink_bounds: Vec<Option<Flow>> = sinks.iter().map(|&u| incoming_capacity(graph, u)).collect();
        let (total, reversed) = match (checked_total(&source_bounds), checked_total(&sink_bounds)) {
            (Some(total), _) => (total, false),
            (None, Some(total)) => (total, true),
            (None, None) => return Err(MaximumFlowError::CapacityOverflow),
        };

        // no flow exceeds `total`
        let upper = |bound: Option<Flow>| bound.map_or(total, |bound| bound.min_flow(total));

        let n = graph.num_nodes();
        let (super_source, super_sink) = (n, n + 1);
        let mut artificial_edges = Vec::with_capacity(sources.len() + sinks.len());
        for (&u, &bound) in sources.iter().zip(source_bounds.iter()) {
            artificial_edges.push(ArtificialEdge { from: super_source, to: u, upper: upper(bound) });
        }
        for (&u, &bound) in sinks.iter().zip(sink_bounds.iter()) {
            artificial_edges.push(ArtificialEdge { from: u, to: super_sink, upper: upper(bound) });
        }

        Ok(Self { source: super_source, sink: super_sink, num_nodes: n + 2, artificial_edges, reversed })
    }

    // terminals of the residual run
    #[inline]
    pub fn run_source(&self) -> usize {
        if self.reversed {
            self.sink
        } else {
            self.source
        }
    }

    #[inline]
    pub fn run_sink(&self) -> usize {
        if self.reversed {
            self.source
        } else {
            self.sink
        }
    }
}

fn validate_graph<Flow, G>(graph: &G) -> Result<(), MaximumFlowError>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    if !graph.is_directed() {
        return Err(MaximumFlowError::UndirectedGraph);
    }
    match (0..graph.num_edges()).find(|&edge_id| !graph.capacity(edge_id).is_valid_capacity()) {
        Some(edge_id) => Err(MaximumFlowError::InvalidCapacity { edge_id }),
        None => Ok(()),
    }
}

fn validate_node<G: Topology>(graph: &G, u: usize) -> Result<(), MaximumFlowError> {
    if u >= graph.num_nodes() {
        return Err(MaximumFlowError::NodeOutOfRange(u));
    }
    Ok(())
}

// sorted, deduplicated, range checked
fn normalize<G: Topology>(graph: &G, nodes: &[usize]) -> Result<Vec<usize>, MaximumFlowError> {
    let mut nodes = nodes.to_vec();
    nodes.sort_unstable();
    nodes.dedup();
    for &u in nodes.iter() {
        validate_node(graph, u)?;
    }
    Ok(nodes)
}

// None when the sum does not fit the flow type
fn outgoing_capacity<Flow, G>(graph: &G, u: usize) -> Option<Flow>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    sum_capacities(graph, graph.out_edges(u))
}

fn incoming_capacity<Flow, G>(graph: &G, u: usize) -> Option<Flow>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    sum_capacities(graph, graph.in_edges(u))
}

fn sum_capacities<Flow, G>(graph: &G, edges: &[usize]) -> Option<Flow>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    edges
        .iter()
        .filter(|&&edge_id| graph.edge_source(edge_id) != graph.edge_target(edge_id))
        .try_fold(Flow::zero(), |sum, &edge_id| sum.checked_sum(graph.capacity(edge_id)))
}

fn checked_total<Flow: FlowValue>(bounds: &[Option<Flow>]) -> Option<Flow> {
    bounds.iter().try_fold(Flow::zero(), |sum, &bound| sum.checked_sum(bound?))
}
