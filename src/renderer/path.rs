//! Edge path rendering utilities
//!
//! Converts routed edges into SVG path `d` attribute strings.

use crate::layout::{EdgeCurve, Point, RoutedEdge};

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Quadratic Bezier curve
    QuadraticTo { control: Point, end: Point },
}

/// A resolved path ready for SVG rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Straight line between two points
    pub fn line(start: Point, end: Point) -> Self {
        Self {
            segments: vec![PathSegment::MoveTo(start), PathSegment::LineTo(end)],
        }
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::QuadraticTo { control, end } => {
                    // Q cx cy ex ey
                    d.push_str(&format!(
                        "Q{:.2} {:.2} {:.2} {:.2}",
                        control.x, control.y, end.x, end.y
                    ));
                }
            }
        }

        d
    }
}

impl From<&RoutedEdge> for ResolvedPath {
    fn from(edge: &RoutedEdge) -> Self {
        let tail = match edge.curve {
            EdgeCurve::Straight => PathSegment::LineTo(edge.end),
            EdgeCurve::Quadratic { control } => PathSegment::QuadraticTo {
                control,
                end: edge.end,
            },
        };
        Self {
            segments: vec![PathSegment::MoveTo(edge.start), tail],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeStyle;
    use crate::layout::NodeKey;

    fn routed(curve: EdgeCurve) -> RoutedEdge {
        RoutedEdge {
            from: NodeKey::Distributor,
            to: NodeKey::EndUser,
            style: EdgeStyle::Solid,
            start: Point::new(900.0, 420.0),
            end: Point::new(700.0, 500.0),
            curve,
            label: None,
        }
    }

    #[test]
    fn test_empty_path() {
        let path = ResolvedPath { segments: vec![] };
        assert_eq!(path.to_svg_d(), "");
    }

    #[test]
    fn test_straight_edge() {
        let path = ResolvedPath::from(&routed(EdgeCurve::Straight));
        assert_eq!(path.to_svg_d(), "M900.00 420.00 L700.00 500.00");
    }

    #[test]
    fn test_quadratic_edge() {
        let path = ResolvedPath::from(&routed(EdgeCurve::Quadratic {
            control: Point::new(800.0, 480.0),
        }));
        assert_eq!(path.to_svg_d(), "M900.00 420.00 Q800.00 480.00 700.00 500.00");
    }

    #[test]
    fn test_line_rounds_to_two_decimals() {
        let path = ResolvedPath::line(Point::new(0.126, 1.0 / 3.0), Point::new(10.0, 0.0));
        assert_eq!(path.to_svg_d(), "M0.13 0.33 L10.00 0.00");
    }
}
