//! Plan Illustrator - business-plan data model and flow-diagram renderer
//!
//! This library holds a business plan (actors, suppliers, products, flow
//! relationships, financials) in a reducer-driven store and draws its
//! four-tier supply flow as an SVG diagram.
//!
//! # Example
//!
//! ```rust
//! use plan_illustrator::{render, PlanSnapshot};
//!
//! let svg = render(&PlanSnapshot::seed());
//! assert!(svg.contains("<svg"));
//! ```

pub mod api;
pub mod edges;
pub mod error;
pub mod layout;
pub mod model;
pub mod persist;
pub mod renderer;
pub mod store;
pub mod stylesheet;

pub use api::{ApiError, PlanBackend};
pub use edges::{resolve_edges, resolve_edges_with, Edge, EdgeLabels, EdgeStyle};
pub use error::ValidationError;
pub use layout::{compute_layout, compute_layout_with, LayoutConfig, NodeKey, Positions};
pub use model::PlanSnapshot;
pub use persist::PersistError;
pub use renderer::{render_svg, render_svg_with_stylesheet, DiagramText, SvgConfig};
pub use store::{Action, PlanStore};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Any error the library can report
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid action: {0}")]
    Validation(#[from] ValidationError),

    #[error("backend error: {0}")]
    Api(#[from] ApiError),

    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Edge label text
    pub labels: EdgeLabels,
    /// Fixed diagram text (end user, tier labels, legend)
    pub text: DiagramText,
    /// Debug mode: log the computed layout and edges
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_labels(mut self, labels: EdgeLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_text(mut self, text: DiagramText) -> Self {
        self.text = text;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a snapshot to SVG with default configuration
///
/// Rendering never fails: dangling supplier references and unpositioned
/// suppliers are skipped.
pub fn render(snapshot: &PlanSnapshot) -> String {
    render_with_config(snapshot, &RenderConfig::default())
}

/// Render a snapshot to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use plan_illustrator::{render_with_config, LayoutConfig, PlanSnapshot, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_canvas(1000.0, 700.0))
///     .with_svg(SvgConfig::default().with_legend(false));
///
/// let svg = render_with_config(&PlanSnapshot::seed(), &config);
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_with_config(snapshot: &PlanSnapshot, config: &RenderConfig) -> String {
    let supplier_ids = snapshot.supplier_ids();
    let positions = compute_layout_with(&config.layout, supplier_ids.len());
    let edges = resolve_edges_with(&snapshot.business_flow, &supplier_ids, &config.labels);
    let scene = renderer::build_scene(snapshot, &positions, &edges, &config.layout, &config.text);

    if config.debug {
        tracing::debug!(
            positions = %serde_json::to_string(&positions).unwrap_or_default(),
            "layout computed"
        );
        for edge in &scene.edges {
            tracing::debug!(
                from = %edge.from,
                to = %edge.to,
                style = ?edge.style,
                label = edge.label.as_ref().map(|l| l.text.as_str()).unwrap_or(""),
                "edge routed"
            );
        }
        if scene.edges.len() != edges.len() {
            tracing::debug!(
                resolved = edges.len(),
                drawn = scene.edges.len(),
                "some edges had no position"
            );
        }
    }

    render_svg_with_stylesheet(&scene, &config.svg, &config.stylesheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessFlow, Supplier};

    #[test]
    fn test_render_seed() {
        let svg = render(&PlanSnapshot::seed());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("AtaBridge"));
        assert!(svg.contains("bp-edge"));
    }

    #[test]
    fn test_render_empty_plan() {
        let svg = render(&PlanSnapshot::empty());
        assert!(svg.contains("node-consultant"));
        assert!(!svg.contains("bp-edge"));
    }

    #[test]
    fn test_custom_labels_reach_svg() {
        let mut snapshot = PlanSnapshot::empty();
        snapshot.suppliers.push(Supplier::with_id("s1", "Acme", "frames"));
        snapshot.business_flow = BusinessFlow {
            suppliers_to_distributor: vec!["s1".into()],
            ..Default::default()
        };
        let labels = EdgeLabels {
            supplier_to_distributor: "spares".into(),
            ..Default::default()
        };
        let svg = render_with_config(&snapshot, &RenderConfig::new().with_labels(labels));
        assert!(svg.contains(">spares</text>"));
        assert!(!svg.contains("consumable+cabinet"));
    }

    #[test]
    fn test_error_conversions() {
        let err: Error = ValidationError::EmptyImageRef.into();
        assert!(matches!(err, Error::Validation(_)));
        let err: Error = ApiError::Network("down".into()).into();
        assert_eq!(err.to_string(), "backend error: network error: down");
    }
}
