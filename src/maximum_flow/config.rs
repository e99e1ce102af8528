#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PushRelabelConfig {
    // recompute exact heights after `global_relabel_frequency * n` relabels, 0 disables
    pub global_relabel_frequency: usize,
    pub gap_heuristic: bool,
}

impl Default for PushRelabelConfig {
    fn default() -> Self {
        Self { global_relabel_frequency: 1, gap_heuristic: true }
    }
}

impl PushRelabelConfig {
    /// Plain push-relabel, no heuristics.
    pub fn without_heuristics() -> Self {
        Self { global_relabel_frequency: 0, gap_heuristic: false }
    }

    pub fn with_global_relabel_frequency(mut self, frequency: usize) -> Self {
        self.global_relabel_frequency = frequency;
        self
    }

    pub fn with_gap_heuristic(mut self, enabled: bool) -> Self {
        self.gap_heuristic = enabled;
        self
    }

    // number of relabels after which heights are recomputed, None when disabled
    pub(crate) fn global_relabel_threshold(&self, num_nodes: usize) -> Option<usize> {
        if self.global_relabel_frequency == 0 {
            return None;
        }
        Some(self.global_relabel_frequency.saturating_mul(num_nodes).max(1))
    }
}
