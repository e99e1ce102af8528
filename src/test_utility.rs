use crate::maximum_flow::graph::Graph;
use crate::maximum_flow::minimum_cut::{cut_capacity, minimum_cut};
use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::value::FlowValue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct GraphInstance<Flow> {
    pub graph: Graph<Flow>,
    pub source: usize,
    pub sink: usize,
}

// self loops, parallel edges and zero capacities included
pub fn random_instance<Flow, F>(seed: u64, num_nodes: usize, num_edges: usize, mut capacity: F) -> GraphInstance<Flow>
where
    Flow: FlowValue,
    F: FnMut(&mut StdRng) -> Flow,
{
    assert!(num_nodes >= 2);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::default();
    graph.add_nodes(num_nodes);
    for _ in 0..num_edges {
        let (u, v) = (rng.gen_range(0..num_nodes), rng.gen_range(0..num_nodes));
        let upper = capacity(&mut rng);
        graph.add_directed_edge(u, v, upper);
    }

    let source = rng.gen_range(0..num_nodes);
    let mut sink = rng.gen_range(0..num_nodes - 1);
    if sink >= source {
        sink += 1;
    }
    GraphInstance { graph, source, sink }
}

pub fn random_instance_int(seed: u64, num_nodes: usize, num_edges: usize) -> GraphInstance<i64> {
    random_instance(seed, num_nodes, num_edges, |rng| rng.gen_range(0..=100))
}

// multiples of 1/8 keep every sum exact, so runs agree to the last bit
pub fn random_instance_float(seed: u64, num_nodes: usize, num_edges: usize) -> GraphInstance<f64> {
    random_instance(seed, num_nodes, num_edges, |rng| rng.gen_range(1..=800) as f64 / 8.0)
}

fn close<Flow: FlowValue>(a: Flow, b: Flow, tolerance: Flow) -> bool {
    a - b <= tolerance && b - a <= tolerance
}

// capacity bounds, conservation, value and max-flow/min-cut duality
pub fn assert_maximum_flow<Flow: FlowValue>(graph: &Graph<Flow>, sources: &[usize], sinks: &[usize], value: Flow, tolerance: Flow) {
    for edge_id in 0..graph.num_edges() {
        let (flow, upper) = (graph.flow(edge_id), graph.capacity(edge_id));
        assert!(flow >= Flow::zero() - tolerance && flow <= upper + tolerance, "edge {edge_id}: flow {flow:?} capacity {upper:?}");
        if graph.edge_source(edge_id) == graph.edge_target(edge_id) {
            assert_eq!(flow, Flow::zero(), "self loop {edge_id} carries flow");
        }
    }

    let net_outflow = |u: usize| {
        let outflow = graph.out_edges(u).iter().fold(Flow::zero(), |sum, &e| sum + graph.flow(e));
        graph.in_edges(u).iter().fold(outflow, |sum, &e| sum - graph.flow(e))
    };

    for u in 0..graph.num_nodes() {
        if sources.contains(&u) || sinks.contains(&u) {
            continue;
        }
        assert!(close(net_outflow(u), Flow::zero(), tolerance), "node {u} violates conservation");
    }

    let total = sources.iter().fold(Flow::zero(), |sum, &u| sum + net_outflow(u));
    assert!(close(total, value, tolerance), "flow value {value:?}, net outflow of sources {total:?}");

    let cut = minimum_cut(graph, sources);
    assert!(sinks.iter().all(|t| !cut.contains(t)), "a sink is reachable in the residual network");
    let capacity = cut_capacity(graph, &cut);
    assert!(close(capacity, value, tolerance), "flow value {value:?}, cut capacity {capacity:?}");
}
