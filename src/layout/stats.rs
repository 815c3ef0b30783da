//! Counters collected while paginating.

use serde::{Deserialize, Serialize};

/// Statistics collected during pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationStats {
    /// Pages produced
    pub page_count: u32,

    /// Blocks placed (fragments count individually)
    pub blocks_placed: u32,

    /// Paragraphs split across a page break
    pub splits: u32,

    /// Splits that cut inside a word because no space was available
    pub hard_cuts: u32,

    /// Blocks placed alone on a page they do not fit
    pub overflows: u32,
}

impl PaginationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another flow's counters to these.
    pub fn merge(&mut self, other: &PaginationStats) {
        self.page_count += other.page_count;
        self.blocks_placed += other.blocks_placed;
        self.splits += other.splits;
        self.hard_cuts += other.hard_cuts;
        self.overflows += other.overflows;
    }

    /// Check if any placement may be visibly wrong in print.
    pub fn has_degraded_output(&self) -> bool {
        self.hard_cuts > 0 || self.overflows > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = PaginationStats {
            page_count: 2,
            splits: 1,
            ..Default::default()
        };
        let b = PaginationStats {
            page_count: 3,
            hard_cuts: 1,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.page_count, 5);
        assert_eq!(a.splits, 1);
        assert!(a.has_degraded_output());
        assert!(!PaginationStats::new().has_degraded_output());
    }
}
