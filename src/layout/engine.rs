//! Fixed four-tier pyramid placement

use super::config::LayoutConfig;
use super::types::{Point, Positions, Tier};

/// Place every node for `supplier_count` suppliers on a canvas of the given size
///
/// Uses the default node size, gap and tier heights.
pub fn compute_layout(supplier_count: usize, canvas_width: f64, canvas_height: f64) -> Positions {
    let config = LayoutConfig::default().with_canvas(canvas_width, canvas_height);
    compute_layout_with(&config, supplier_count)
}

/// Place every node using an explicit configuration
///
/// The supplier row is centered on the canvas. When it is wider than the
/// canvas, nodes keep their size and spill past the edges; the rendering
/// surface is expected to scroll.
pub fn compute_layout_with(config: &LayoutConfig, supplier_count: usize) -> Positions {
    let (canvas_width, canvas_height) = config.canvas_size;
    let (node_width, node_height) = config.node_size;
    let center_x = canvas_width / 2.0;
    let centered = center_x - node_width / 2.0;

    let step = node_width + config.node_gap;
    let start_x = (canvas_width - config.supplier_row_width(supplier_count)) / 2.0;
    let supply_y = config.tier_top(Tier::Supply);
    let suppliers = (0..supplier_count)
        .map(|i| Point::new(start_x + i as f64 * step, supply_y))
        .collect();

    let production_y = config.tier_top(Tier::Production);
    Positions {
        canvas_width,
        canvas_height,
        node_width,
        node_height,
        consultant: Point::new(centered, config.tier_top(Tier::Consulting)),
        suppliers,
        assembler: Point::new(centered - config.side_offset, production_y),
        distributor: Point::new(centered + config.side_offset, production_y),
        end_user: Point::new(centered, config.tier_top(Tier::EndUser)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pyramid() {
        let p = compute_layout(5, 1400.0, 700.0);
        assert_eq!(p.consultant, Point::new(630.0, 50.0));
        assert_eq!(p.assembler, Point::new(430.0, 350.0));
        assert_eq!(p.distributor, Point::new(830.0, 350.0));
        assert_eq!(p.end_user, Point::new(630.0, 500.0));
        // (1400 - 5 * 180) / 2
        assert_eq!(p.suppliers[0], Point::new(250.0, 200.0));
        assert_eq!(p.suppliers[4], Point::new(970.0, 200.0));
    }

    #[test]
    fn test_zero_suppliers() {
        let p = compute_layout(0, 1400.0, 700.0);
        assert!(p.suppliers.is_empty());
        assert_eq!(p.consultant.x, 630.0);
    }

    #[test]
    fn test_overflow_keeps_node_size() {
        let p = compute_layout(12, 1400.0, 700.0);
        assert!(p.suppliers[0].x < 0.0);
        let gap = p.suppliers[1].x - p.suppliers[0].x;
        assert_eq!(gap, 180.0);
        assert_eq!(p.node_width, 140.0);
        assert!(p.extent().width > 1400.0);
    }

    #[test]
    fn test_production_tier_is_symmetric() {
        let p = compute_layout(3, 1000.0, 700.0);
        let center = 500.0;
        let left = center - (p.assembler.x + p.node_width / 2.0);
        let right = (p.distributor.x + p.node_width / 2.0) - center;
        assert_eq!(left, right);
    }

    #[test]
    fn test_nodes_never_overlap() {
        for count in [0, 1, 5, 12] {
            let p = compute_layout(count, 1400.0, 700.0);
            let boxes: Vec<_> = [p.consultant, p.assembler, p.distributor, p.end_user]
                .iter()
                .chain(&p.suppliers)
                .map(|o| p.node_bounds(*o))
                .collect();
            for (i, a) in boxes.iter().enumerate() {
                for b in &boxes[i + 1..] {
                    assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
}
