use crate::maximum_flow::network::{FlowNetwork, Topology};
use crate::maximum_flow::value::FlowValue;
use std::collections::VecDeque;

/// Source side of a minimum cut, read off a maximum flow already written to `graph`.
///
/// Breadth-first search from `sources` over the residual network: an out-edge is followed
/// while it is not saturated, an in-edge while it carries flow. Nodes are returned in
/// visiting order; sources outside the graph are ignored.
pub fn minimum_cut<Flow, G>(graph: &G, sources: &[usize]) -> Vec<usize>
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    let mut cut = Vec::new();
    let mut visited = vec![false; graph.num_nodes()];
    let mut que = VecDeque::new();

    for &source in sources.iter().filter(|&&u| u < graph.num_nodes()) {
        if !visited[source] {
            visited[source] = true;
            que.push_back(source);
        }
    }

    while let Some(u) = que.pop_front() {
        cut.push(u);

        for &edge_id in graph.out_edges(u).iter() {
            let v = graph.edge_target(edge_id);
            if !visited[v] && (graph.capacity(edge_id) - graph.flow(edge_id)).exceeds_epsilon() {
                visited[v] = true;
                que.push_back(v);
            }
        }

        // flow on an incoming edge can be sent back
        for &edge_id in graph.in_edges(u).iter() {
            let v = graph.edge_source(edge_id);
            if !visited[v] && graph.flow(edge_id).exceeds_epsilon() {
                visited[v] = true;
                que.push_back(v);
            }
        }
    }

    cut
}

/// Total capacity of the edges leaving `cut`. Nodes outside the graph are ignored.
pub fn cut_capacity<Flow, G>(graph: &G, cut: &[usize]) -> Flow
where
    Flow: FlowValue,
    G: Topology + FlowNetwork<Flow>,
{
    let mut in_cut = vec![false; graph.num_nodes()];
    for &u in cut.iter().filter(|&&u| u < graph.num_nodes()) {
        in_cut[u] = true;
    }

    (0..graph.num_nodes())
        .filter(|&u| in_cut[u])
        .flat_map(|u| graph.out_edges(u).iter())
        .filter(|&&edge_id| !in_cut[graph.edge_target(edge_id)])
        .fold(Flow::zero(), |sum, &edge_id| sum + graph.capacity(edge_id))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maximum_flow::graph::Graph;

    #[test]
    fn cut_follows_unsaturated_and_backward_edges() {
        let mut graph = Graph::<i32>::default();
        graph.add_nodes(5);
        let a = graph.add_directed_edge(0, 1, 4).unwrap();
        let b = graph.add_directed_edge(1, 2, 3).unwrap();
        let c = graph.add_directed_edge(3, 1, 2).unwrap();
        let d = graph.add_directed_edge(2, 4, 3).unwrap();
        graph.set_flow(a, 3);
        graph.set_flow(b, 3);
        graph.set_flow(c, 0);
        graph.set_flow(d, 3);

        // 0 -> 1 has room; 1 -> 2 is saturated; 3 -> 1 carries nothing
        let cut = minimum_cut(&graph, &[0]);
        assert_eq!(cut, vec![0, 1]);
        assert_eq!(cut_capacity(&graph, &cut), 3);

        graph.set_flow(c, 1);
        graph.set_flow(a, 2);
        assert_eq!(minimum_cut(&graph, &[0]), vec![0, 1, 3]);
    }

    #[test]
    fn nodes_outside_the_graph_are_ignored() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(2);
        graph.add_directed_edge(0, 1, 4);

        assert_eq!(minimum_cut(&graph, &[5, 0, 2]), vec![0, 1]);
        assert!(minimum_cut(&graph, &[7]).is_empty());
        assert_eq!(cut_capacity(&graph, &[0, 9]), 4);
        assert_eq!(cut_capacity(&graph, &[0, 0]), 4);
    }

    #[test]
    fn graph_minimum_cut_matches_free_function() {
        let mut graph = Graph::<f64>::default();
        graph.add_nodes(3);
        let a = graph.add_directed_edge(0, 1, 1.5).unwrap();
        graph.add_directed_edge(1, 2, 1.0).unwrap();
        graph.set_flow(a, 1.49995);

        // residual within tolerance counts as saturated
        assert_eq!(graph.minimum_cut(0), vec![0]);
        assert_eq!(graph.minimum_cut(0), minimum_cut(&graph, &[0]));
        assert!(graph.minimum_cut(7).is_empty());
    }
}
