use crate::maximum_flow::push_relabel::{DischargeOrder, PushRelabel};

/// Push-relabel with the relabel-to-front rule.
///
/// All nodes are kept in one list ordered topologically with respect to the admissible
/// network (higher nodes first). The list is scanned front to back and every node with
/// excess is discharged; a relabeled node moves to the front and the scan restarts there.
/// A full scan without excess means the preflow is a maximum flow. O(n^3).
pub type PushRelabelToFront<Flow> = PushRelabel<Flow, RelabelToFrontOrder>;

const NONE: usize = usize::MAX;

#[derive(Default)]
pub struct RelabelToFrontOrder {
    next: Vec<usize>,
    prev: Vec<usize>,
    in_list: Vec<bool>,
    head: usize,
    // next node to look at
    cursor: usize,
}

impl RelabelToFrontOrder {
    fn clear(&mut self) {
        self.next.fill(NONE);
        self.prev.fill(NONE);
        self.in_list.fill(false);
        self.head = NONE;
        self.cursor = NONE;
    }

    fn push_front(&mut self, u: usize) {
        self.next[u] = self.head;
        self.prev[u] = NONE;
        if self.head != NONE {
            self.prev[self.head] = u;
        }
        self.head = u;
        self.in_list[u] = true;
    }

    fn unlink(&mut self, u: usize) {
        let (prev, next) = (self.prev[u], self.next[u]);
        if prev != NONE {
            self.next[prev] = next;
        } else {
            self.head = next;
        }
        if next != NONE {
            self.prev[next] = prev;
        }
        self.in_list[u] = false;
    }

    #[cfg(test)]
    fn nodes(&self) -> Vec<usize> {
        let mut nodes = Vec::new();
        let mut u = self.head;
        while u != NONE {
            nodes.push(u);
            u = self.next[u];
        }
        nodes
    }
}

impl DischargeOrder for RelabelToFrontOrder {
    fn new(num_nodes: usize) -> Self {
        Self { next: vec![NONE; num_nodes], prev: vec![NONE; num_nodes], in_list: vec![false; num_nodes], head: NONE, cursor: NONE }
    }

    fn activate(&mut self, u: usize) {
        if !self.in_list[u] {
            self.push_front(u);
            self.cursor = self.head;
        }
    }

    fn has_more_vertices_to_discharge<F: Fn(usize) -> bool>(&mut self, has_excess: F) -> bool {
        while self.cursor != NONE && !has_excess(self.cursor) {
            self.cursor = self.next[self.cursor];
        }
        self.cursor != NONE
    }

    fn next_vertex_to_discharge<F: Fn(usize) -> bool>(&mut self, has_excess: F) -> Option<usize> {
        if !self.has_more_vertices_to_discharge(has_excess) {
            return None;
        }
        let u = self.cursor;
        self.cursor = self.next[u];
        Some(u)
    }

    // move to front
    fn after_relabel(&mut self, u: usize) {
        if self.in_list[u] {
            if u == self.head {
                self.cursor = self.head;
                return;
            }
            self.unlink(u);
        }
        self.push_front(u);
        self.cursor = self.head;
    }

    // rebuild the list in decreasing height order
    fn after_global_relabeling<F: Fn(usize) -> bool>(&mut self, heights: &[usize], source: usize, sink: usize, _has_excess: F) {
        self.clear();
        let mut nodes: Vec<usize> = (0..heights.len()).filter(|&u| u != source && u != sink).collect();
        nodes.sort_by_key(|&u| heights[u]);
        for u in nodes {
            self.push_front(u);
        }
        self.cursor = self.head;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maximum_flow::config::PushRelabelConfig;
    use crate::maximum_flow::graph::Graph;
    use rstest::rstest;

    #[test]
    fn list_follows_heights_after_global_relabeling() {
        let mut order = RelabelToFrontOrder::new(6);
        order.after_global_relabeling(&[6, 3, 1, 0, 2, 12], 0, 3, |_| false);
        assert_eq!(order.nodes(), vec![5, 1, 4, 2]);
    }

    #[test]
    fn scan_skips_nodes_without_excess() {
        let mut order = RelabelToFrontOrder::new(5);
        order.after_global_relabeling(&[5, 4, 3, 2, 0], 0, 4, |_| false);
        let excess = [false, false, true, true, false];

        assert!(order.has_more_vertices_to_discharge(|u| excess[u]));
        assert_eq!(order.next_vertex_to_discharge(|u| excess[u]), Some(2));
        assert_eq!(order.next_vertex_to_discharge(|u| excess[u]), Some(3));
        assert_eq!(order.next_vertex_to_discharge(|u| excess[u]), None);
        assert!(!order.has_more_vertices_to_discharge(|u| excess[u]));
    }

    #[test]
    fn relabel_moves_to_front_and_restarts_scan() {
        let mut order = RelabelToFrontOrder::new(5);
        order.after_global_relabeling(&[5, 4, 3, 2, 0], 0, 4, |_| false);
        let all = |_: usize| true;
        assert_eq!(order.next_vertex_to_discharge(all), Some(1));
        assert_eq!(order.next_vertex_to_discharge(all), Some(2));

        order.after_relabel(3);
        assert_eq!(order.nodes(), vec![3, 1, 2]);
        assert_eq!(order.next_vertex_to_discharge(all), Some(3));

        order.after_relabel(3);
        assert_eq!(order.nodes(), vec![3, 1, 2]);
        assert_eq!(order.next_vertex_to_discharge(all), Some(3));
    }

    #[test]
    fn activate_inserts_missing_nodes_only() {
        let mut order = RelabelToFrontOrder::new(4);
        order.after_global_relabeling(&[4, 1, 2, 0], 0, 3, |_| false);
        order.activate(1);
        assert_eq!(order.nodes(), vec![2, 1]);
        order.activate(0);
        assert_eq!(order.nodes(), vec![0, 2, 1]);
    }

    #[rstest]
    #[case(PushRelabelConfig::default())]
    #[case(PushRelabelConfig::without_heuristics())]
    #[case(PushRelabelConfig::without_heuristics().with_gap_heuristic(true))]
    #[case(PushRelabelConfig::without_heuristics().with_global_relabel_frequency(1))]
    fn solves_textbook_network(#[case] config: PushRelabelConfig) {
        // CLRS figure 26.1
        let mut graph = Graph::default();
        graph.add_nodes(6);
        let edges = [(0, 1, 16), (0, 2, 13), (2, 1, 4), (1, 3, 12), (3, 2, 9), (2, 4, 14), (4, 3, 7), (3, 5, 20), (4, 5, 4)];
        for (u, v, c) in edges {
            graph.add_directed_edge(u, v, c);
        }

        let mut solver = PushRelabelToFront::new(config);
        assert_eq!(solver.solve(0, 5, &mut graph), Ok(23));
        assert_eq!(graph.maximum_flow(0), 23);
    }

    #[test]
    fn relabeled_node_goes_first_on_a_real_run() {
        // 1 must be relabeled to send its excess back, 2 is reached afterwards
        let mut graph = Graph::default();
        graph.add_nodes(4);
        graph.add_directed_edge(0, 1, 5);
        graph.add_directed_edge(1, 2, 2);
        graph.add_directed_edge(2, 3, 9);
        let mut solver = PushRelabelToFront::new(PushRelabelConfig::without_heuristics());
        assert_eq!(solver.solve(0, 3, &mut graph), Ok(2));
        assert_eq!(solver.stats().relabels, 1);
        assert_eq!(graph.get_edge(0).unwrap().flow, 2);
    }
}
