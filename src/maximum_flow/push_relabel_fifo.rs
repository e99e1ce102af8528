use crate::maximum_flow::push_relabel::{DischargeOrder, PushRelabel};
use std::collections::VecDeque;

/// Push-relabel discharging active nodes in first-in-first-out order.
pub type PushRelabelFIFO<Flow> = PushRelabel<Flow, FifoOrder>;

#[derive(Default)]
pub struct FifoOrder {
    active_nodes: VecDeque<usize>,
    in_queue: Vec<bool>,
}

impl DischargeOrder for FifoOrder {
    fn new(num_nodes: usize) -> Self {
        Self { active_nodes: VecDeque::with_capacity(num_nodes), in_queue: vec![false; num_nodes] }
    }

    fn activate(&mut self, u: usize) {
        if !self.in_queue[u] {
            self.in_queue[u] = true;
            self.active_nodes.push_back(u);
        }
    }

    fn has_more_vertices_to_discharge<F: Fn(usize) -> bool>(&mut self, _has_excess: F) -> bool {
        !self.active_nodes.is_empty()
    }

    fn next_vertex_to_discharge<F: Fn(usize) -> bool>(&mut self, has_excess: F) -> Option<usize> {
        while let Some(u) = self.active_nodes.pop_front() {
            self.in_queue[u] = false;
            if has_excess(u) {
                return Some(u);
            }
        }
        None
    }

    fn after_global_relabeling<F: Fn(usize) -> bool>(&mut self, _heights: &[usize], _source: usize, _sink: usize, has_excess: F) {
        let in_queue = &mut self.in_queue;
        self.active_nodes.retain(|&u| {
            let keep = has_excess(u);
            in_queue[u] = keep;
            keep
        });
    }
}
