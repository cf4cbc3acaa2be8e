//! Layout engine for the four-tier flow diagram
//!
//! Takes a supplier count and computes node positions, then routes resolved
//! edges between the placed nodes.

pub mod config;
pub mod engine;
pub mod routing;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{compute_layout, compute_layout_with};
pub use routing::{route_edges, EdgeCurve, EdgeLabel, RoutedEdge, Side};
pub use types::*;
