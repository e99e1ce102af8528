const NONE: usize = usize::MAX;

// All nodes grouped by height: one intrusive doubly linked list per height, stored in flat
// arrays. `highest_below_limit` is an upper bound on the highest non-empty height below
// `limit`, so a gap only walks levels that may hold nodes.
#[derive(Default)]
pub struct HeightBuckets {
    head: Vec<usize>,
    next: Vec<usize>,
    prev: Vec<usize>,
    count: Vec<usize>,
    limit: usize,
    highest_below_limit: usize,
}

impl HeightBuckets {
    // heights must lie in 0..=max_height, gaps are only looked for below `limit`
    pub fn build(&mut self, heights: &[usize], max_height: usize, limit: usize) {
        self.head = vec![NONE; max_height + 1];
        self.next = vec![NONE; heights.len()];
        self.prev = vec![NONE; heights.len()];
        self.count = vec![0; max_height + 1];
        self.limit = limit;
        self.highest_below_limit = 0;

        for (u, &height) in heights.iter().enumerate() {
            self.insert(u, height);
        }
    }

    #[inline]
    pub fn count(&self, height: usize) -> usize {
        self.count[height]
    }

    pub fn move_node(&mut self, u: usize, from: usize, to: usize) {
        self.remove(u, from);
        self.insert(u, to);
    }

    // Every node with gap < height < limit is moved to `new_height`; `on_lift` sees each
    // of them after `heights` is updated. Returns the number of lifted nodes.
    pub fn lift_above<F>(&mut self, gap: usize, new_height: usize, heights: &mut [usize], mut on_lift: F) -> usize
    where
        F: FnMut(usize),
    {
        debug_assert!(new_height >= self.limit);
        let mut lifted = 0;
        let top = self.highest_below_limit.min(self.limit.saturating_sub(1));
        for height in (gap + 1)..=top {
            while self.head[height] != NONE {
                let u = self.head[height];
                debug_assert_eq!(heights[u], height);
                self.move_node(u, height, new_height);
                heights[u] = new_height;
                on_lift(u);
                lifted += 1;
            }
        }
        self.highest_below_limit = self.highest_below_limit.min(gap);
        lifted
    }

    fn insert(&mut self, u: usize, height: usize) {
        let head = self.head[height];
        self.next[u] = head;
        self.prev[u] = NONE;
        if head != NONE {
            self.prev[head] = u;
        }
        self.head[height] = u;
        self.count[height] += 1;

        if height < self.limit && height > self.highest_below_limit {
            self.highest_below_limit = height;
        }
    }

    fn remove(&mut self, u: usize, height: usize) {
        let (prev, next) = (self.prev[u], self.next[u]);
        if prev != NONE {
            self.next[prev] = next;
        } else {
            self.head[height] = next;
        }
        if next != NONE {
            self.prev[next] = prev;
        }
        self.next[u] = NONE;
        self.prev[u] = NONE;
        self.count[height] -= 1;
    }

    #[cfg(test)]
    fn nodes_at(&self, height: usize) -> Vec<usize> {
        let mut nodes = Vec::new();
        let mut u = self.head[height];
        while u != NONE {
            nodes.push(u);
            u = self.next[u];
        }
        nodes.sort_unstable();
        nodes
    }
}
