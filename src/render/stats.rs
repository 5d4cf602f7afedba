// Wed Jan 21 2026 - Alex

use crate::structure::StructLayout;
use serde::Serialize;

/// Efficiency below this percentage is flagged.
pub const LOW_EFFICIENCY_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutStats {
    pub total_size: usize,
    pub data_bytes: usize,
    pub padding_bytes: usize,
    pub tail_padding: usize,
    pub efficiency_percent: f64,
    pub low_efficiency: bool,
    pub row_count: usize,
}

impl LayoutStats {
    pub fn compute(layout: &StructLayout) -> Self {
        let total_size = layout.total_size();
        let data_bytes = layout.data_bytes();
        let efficiency_percent = if total_size > 0 {
            round1(data_bytes as f64 / total_size as f64 * 100.0)
        } else {
            0.0
        };
        let row_count = match layout.row_width() {
            0 => 0,
            width => total_size.div_ceil(width),
        };

        Self {
            total_size,
            data_bytes,
            padding_bytes: total_size.saturating_sub(data_bytes),
            tail_padding: layout.tail_padding(),
            efficiency_percent,
            low_efficiency: efficiency_percent < LOW_EFFICIENCY_THRESHOLD,
            row_count,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::StructureBuilder;

    #[test]
    fn test_full_efficiency() {
        let layout = StructureBuilder::new(8, 4).pack(4).scalar("a", 0, 4).scalar("b", 4, 2).scalar("c", 6, 2).build();
        let stats = LayoutStats::compute(&layout);
        assert_eq!(stats.data_bytes, 8);
        assert_eq!(stats.padding_bytes, 0);
        assert_eq!(stats.efficiency_percent, 100.0);
        assert!(!stats.low_efficiency);
        assert_eq!(stats.row_count, 2);
    }

    #[test]
    fn test_low_efficiency() {
        let layout = StructureBuilder::new(8, 4).scalar("a", 0, 1).scalar("b", 4, 4).build();
        let stats = LayoutStats::compute(&layout);
        assert_eq!(stats.data_bytes, 5);
        assert_eq!(stats.padding_bytes, 3);
        assert_eq!(stats.efficiency_percent, 62.5);
        assert!(stats.low_efficiency);
    }

    #[test]
    fn test_rounding() {
        let layout = StructureBuilder::new(3, 1).scalar("a", 0, 1).build();
        assert_eq!(LayoutStats::compute(&layout).efficiency_percent, 33.3);
        let layout = StructureBuilder::new(3, 1).scalar("a", 0, 2).build();
        assert_eq!(LayoutStats::compute(&layout).efficiency_percent, 66.7);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let layout = StructureBuilder::new(10, 1).scalar("a", 0, 7).build();
        let stats = LayoutStats::compute(&layout);
        assert_eq!(stats.efficiency_percent, 70.0);
        assert!(!stats.low_efficiency);
        assert_eq!(stats.tail_padding, 3);
    }

    #[test]
    fn test_empty_layout() {
        let stats = LayoutStats::compute(&StructureBuilder::new(0, 1).build());
        assert_eq!(stats.efficiency_percent, 0.0);
        assert_eq!(stats.row_count, 0);
        assert!(stats.low_efficiency);
    }
}
