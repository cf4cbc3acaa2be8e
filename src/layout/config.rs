//! Configuration for the layout engine

use super::types::Tier;

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Drawing surface size (width, height)
    pub canvas_size: (f64, f64),

    /// Size of every node (width, height); never shrunk to fit
    pub node_size: (f64, f64),

    /// Horizontal gap between neighbouring suppliers
    pub node_gap: f64,

    /// Top y-coordinate of each tier, top to bottom
    pub tier_y: [f64; 4],

    /// Distance from the canvas center to the assembler and distributor centers
    pub side_offset: f64,

    /// Vertical displacement of the control point for curved edges
    pub curve_offset: f64,

    /// How far edge labels sit above the path midpoint
    pub label_lift: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: (1400.0, 700.0),
            node_size: (140.0, 70.0),
            node_gap: 40.0,
            tier_y: [50.0, 200.0, 350.0, 500.0],
            side_offset: 200.0,
            curve_offset: 20.0,
            label_lift: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_size = (width, height);
        self
    }

    /// Set the node size
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_size = (width, height);
        self
    }

    /// Set the gap between suppliers
    pub fn with_node_gap(mut self, gap: f64) -> Self {
        self.node_gap = gap;
        self
    }

    /// Set the curve offset for bent edges
    pub fn with_curve_offset(mut self, offset: f64) -> Self {
        self.curve_offset = offset;
        self
    }

    pub fn tier_top(&self, tier: Tier) -> f64 {
        self.tier_y[tier.index()]
    }

    /// Width taken by a row of `count` suppliers, trailing gap included
    pub fn supplier_row_width(&self, count: usize) -> f64 {
        count as f64 * (self.node_size.0 + self.node_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.canvas_size, (1400.0, 700.0));
        assert_eq!(config.node_size, (140.0, 70.0));
        assert_eq!(config.node_gap, 40.0);
        assert_eq!(config.tier_top(Tier::Production), 350.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_canvas(800.0, 600.0)
            .with_node_size(100.0, 50.0)
            .with_node_gap(10.0)
            .with_curve_offset(0.0);

        assert_eq!(config.canvas_size, (800.0, 600.0));
        assert_eq!(config.supplier_row_width(2), 220.0);
        assert_eq!(config.curve_offset, 0.0);
    }
}
