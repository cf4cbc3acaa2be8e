//! Edge routing between placed nodes

use serde::Serialize;

use crate::edges::{Edge, EdgeStyle};

use super::config::LayoutConfig;
use super::types::*;

/// Side of a node box where an edge attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Get the attachment point on a bounding box side
pub fn attachment_point(bounds: &BoundingBox, side: Side) -> Point {
    match side {
        Side::Top => Point::new(bounds.x + bounds.width / 2.0, bounds.y),
        Side::Bottom => Point::new(bounds.x + bounds.width / 2.0, bounds.bottom()),
        Side::Left => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
        Side::Right => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
    }
}

/// Sides to connect for an edge between two nodes
///
/// Nodes in the same tier connect side by side, everything else flows
/// downward from bottom-center to top-center.
pub fn sides_for(from: &NodeKey, to: &NodeKey) -> (Side, Side) {
    if from.tier() == to.tier() {
        (Side::Right, Side::Left)
    } else if from.tier() < to.tier() {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    }
}

/// Shape of a routed edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum EdgeCurve {
    Straight,
    Quadratic { control: Point },
}

/// A text label positioned along an edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLabel {
    pub text: String,
    pub position: Point,
}

/// An edge with concrete geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedEdge {
    pub from: NodeKey,
    pub to: NodeKey,
    pub style: EdgeStyle,
    pub start: Point,
    pub end: Point,
    pub curve: EdgeCurve,
    pub label: Option<EdgeLabel>,
}

impl RoutedEdge {
    /// Point on the edge at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let (s, e) = (self.start, self.end);
        match self.curve {
            EdgeCurve::Straight => Point::new(s.x + (e.x - s.x) * t, s.y + (e.y - s.y) * t),
            EdgeCurve::Quadratic { control: c } => {
                let u = 1.0 - t;
                Point::new(
                    u * u * s.x + 2.0 * u * t * c.x + t * t * e.x,
                    u * u * s.y + 2.0 * u * t * c.y + t * t * e.y,
                )
            }
        }
    }
}

/// Vertical control point displacement for an edge, 0 for a straight line
fn curve_offset(from: &NodeKey, to: &NodeKey, config: &LayoutConfig) -> f64 {
    match (from, to) {
        (NodeKey::Consultant, NodeKey::Supplier(_)) => config.curve_offset,
        (NodeKey::Supplier(_), _) => -config.curve_offset,
        (NodeKey::Distributor, NodeKey::EndUser) => config.curve_offset,
        _ => 0.0,
    }
}

/// Route every edge whose endpoints have positions
///
/// `supplier_ids` is the supplier display order used for the layout, so the
/// i-th id maps to `positions.suppliers[i]`. Edges touching a supplier with
/// no position are dropped.
pub fn route_edges(
    positions: &Positions,
    edges: &[Edge],
    supplier_ids: &[&str],
    config: &LayoutConfig,
) -> Vec<RoutedEdge> {
    let bounds = |key: &NodeKey| {
        let index = match key {
            NodeKey::Supplier(id) => supplier_ids.iter().position(|s| s == id),
            _ => None,
        };
        positions.bounds_of(key, index)
    };

    let mut routed = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(from_bounds), Some(to_bounds)) = (bounds(&edge.from), bounds(&edge.to)) else {
            tracing::debug!(from = %edge.from, to = %edge.to, "dropping edge without position");
            continue;
        };

        let (from_side, to_side) = sides_for(&edge.from, &edge.to);
        let start = attachment_point(&from_bounds, from_side);
        let end = attachment_point(&to_bounds, to_side);

        let offset = curve_offset(&edge.from, &edge.to, config);
        let curve = if offset == 0.0 {
            EdgeCurve::Straight
        } else {
            EdgeCurve::Quadratic {
                control: Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0 + offset),
            }
        };

        let mut routed_edge = RoutedEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            style: edge.style,
            start,
            end,
            curve,
            label: None,
        };
        routed_edge.label = edge.label.as_ref().map(|text| {
            let mid = routed_edge.point_at(0.5);
            EdgeLabel {
                text: text.clone(),
                position: Point::new(mid.x, mid.y - config.label_lift),
            }
        });
        routed.push(routed_edge);
    }
    routed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;

    fn edge(from: NodeKey, to: NodeKey, label: Option<&str>) -> Edge {
        Edge {
            from,
            to,
            style: EdgeStyle::Solid,
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_attachment_points() {
        let b = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(attachment_point(&b, Side::Top), Point::new(60.0, 20.0));
        assert_eq!(attachment_point(&b, Side::Bottom), Point::new(60.0, 70.0));
        assert_eq!(attachment_point(&b, Side::Left), Point::new(10.0, 45.0));
        assert_eq!(attachment_point(&b, Side::Right), Point::new(110.0, 45.0));
    }

    #[test]
    fn test_same_tier_connects_side_by_side() {
        let positions = compute_layout(0, 1400.0, 700.0);
        let routed = route_edges(
            &positions,
            &[edge(NodeKey::Assembler, NodeKey::Distributor, None)],
            &[],
            &LayoutConfig::default(),
        );
        assert_eq!(routed.len(), 1);
        // assembler right edge 430 + 140, distributor left edge 830, both at 350 + 35
        assert_eq!(routed[0].start, Point::new(570.0, 385.0));
        assert_eq!(routed[0].end, Point::new(830.0, 385.0));
        assert_eq!(routed[0].curve, EdgeCurve::Straight);
    }

    #[test]
    fn test_distributor_to_end_user_curves_down() {
        let positions = compute_layout(0, 1400.0, 700.0);
        let routed = route_edges(
            &positions,
            &[edge(NodeKey::Distributor, NodeKey::EndUser, Some("unit sale"))],
            &[],
            &LayoutConfig::default(),
        );
        let r = &routed[0];
        assert_eq!(r.start, Point::new(900.0, 420.0));
        assert_eq!(r.end, Point::new(700.0, 500.0));
        assert_eq!(
            r.curve,
            EdgeCurve::Quadratic {
                control: Point::new(800.0, 480.0)
            }
        );
        // B(0.5) = 0.25 * start + 0.5 * control + 0.25 * end, then lifted
        let label = r.label.as_ref().unwrap();
        assert_eq!(label.position, Point::new(800.0, 470.0 - 10.0));
    }

    #[test]
    fn test_supplier_edges_bend_up() {
        let positions = compute_layout(1, 1400.0, 700.0);
        let routed = route_edges(
            &positions,
            &[edge(NodeKey::supplier("a"), NodeKey::Assembler, None)],
            &["a"],
            &LayoutConfig::default(),
        );
        let r = &routed[0];
        match r.curve {
            EdgeCurve::Quadratic { control } => {
                assert_eq!(control.y, (r.start.y + r.end.y) / 2.0 - 20.0)
            }
            EdgeCurve::Straight => panic!("expected a curve"),
        }
        assert!(r.label.is_none());
    }

    #[test]
    fn test_unpositioned_supplier_is_dropped() {
        let positions = compute_layout(1, 1400.0, 700.0);
        let routed = route_edges(
            &positions,
            &[
                edge(NodeKey::Consultant, NodeKey::supplier("ghost"), None),
                edge(NodeKey::Consultant, NodeKey::supplier("a"), None),
            ],
            &["a"],
            &LayoutConfig::default(),
        );
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].to, NodeKey::supplier("a"));
    }
}
