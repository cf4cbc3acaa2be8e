//! Scene assembly: snapshot + layout + edges into drawable items
//!
//! The scene is the last step before SVG text. It owns every string and
//! coordinate the writer needs, so the writer itself never looks at the
//! snapshot.

use serde::Serialize;

use crate::edges::{Edge, EdgeStyle};
use crate::layout::{
    route_edges, BoundingBox, LayoutConfig, NodeKey, Point, Positions, RoutedEdge, Tier,
};
use crate::model::{ActorId, PlanSnapshot};

/// Fixed strings drawn on the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramText {
    pub end_user_title: String,
    pub end_user_subtitle: String,
    /// Side label of each tier, top to bottom
    pub tier_labels: [String; 4],
    pub legend_advisory: String,
    pub legend_flow: String,
    /// Supplier descriptions longer than this many characters are cut
    pub description_budget: usize,
}

impl Default for DiagramText {
    fn default() -> Self {
        Self {
            end_user_title: "Courier".to_string(),
            end_user_subtitle: "End User".to_string(),
            tier_labels: [
                "Consulting & Sourcing".to_string(),
                "Suppliers".to_string(),
                "Assembly & Production".to_string(),
                "End User".to_string(),
            ],
            legend_advisory: "connection/advisory".to_string(),
            legend_flow: "purchase/flow".to_string(),
            description_budget: 20,
        }
    }
}

/// One node box with its two text lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub key: NodeKey,
    pub bounds: BoundingBox,
    pub title: String,
    pub subtitle: String,
}

impl NodeView {
    /// Stable element id, e.g. `node-supplier:3`
    pub fn element_id(&self) -> String {
        format!("node-{}", self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierLabel {
    pub tier_index: usize,
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub style: EdgeStyle,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub origin: Point,
    pub entries: Vec<LegendEntry>,
}

/// Horizontal space taken by one legend entry
pub const LEGEND_ENTRY_WIDTH: f64 = 220.0;
/// Length of the line sample in front of each legend entry
pub const LEGEND_SAMPLE_WIDTH: f64 = 40.0;
const LEGEND_GAP: f64 = 30.0;
const LEGEND_HEIGHT: f64 = 20.0;

/// Everything the SVG writer draws, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<RoutedEdge>,
    pub tier_labels: Vec<TierLabel>,
    pub legend: Legend,
    /// Canvas, nodes and legend; wider than the canvas when suppliers overflow
    pub bounds: BoundingBox,
    /// Declared drawing surface size, never smaller than the canvas
    pub surface: (f64, f64),
}

/// Cut `text` to `budget` characters followed by "..."
pub fn truncate_description(text: &str, budget: usize) -> String {
    if text.chars().count() > budget {
        let cut: String = text.chars().take(budget).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Build the scene for a snapshot
///
/// `positions` must come from the layout of `snapshot.suppliers.len()`
/// suppliers; suppliers beyond the positioned ones are skipped along with
/// their edges.
pub fn build_scene(
    snapshot: &PlanSnapshot,
    positions: &Positions,
    edges: &[Edge],
    layout: &LayoutConfig,
    text: &DiagramText,
) -> Scene {
    let mut nodes = vec![];

    nodes.push(actor_node(snapshot, positions, ActorId::Consultant));
    for (index, supplier) in snapshot.suppliers.iter().enumerate() {
        let key = NodeKey::supplier(supplier.id.as_str());
        let Some(bounds) = positions.bounds_of(&key, Some(index)) else {
            continue;
        };
        nodes.push(NodeView {
            key,
            bounds,
            title: supplier.name.clone(),
            subtitle: truncate_description(&supplier.description, text.description_budget),
        });
    }
    nodes.push(actor_node(snapshot, positions, ActorId::Assembler));
    nodes.push(actor_node(snapshot, positions, ActorId::Distributor));
    nodes.push(NodeView {
        key: NodeKey::EndUser,
        bounds: positions.node_bounds(positions.end_user),
        title: text.end_user_title.clone(),
        subtitle: text.end_user_subtitle.clone(),
    });

    let routed = route_edges(positions, edges, &snapshot.supplier_ids(), layout);

    let tier_labels = Tier::ALL
        .iter()
        .map(|tier| TierLabel {
            tier_index: tier.index(),
            text: text.tier_labels[tier.index()].clone(),
            position: Point::new(20.0, layout.tier_top(*tier) + positions.node_height / 2.0 + 5.0),
        })
        .collect();

    let extent = positions.extent();
    let entries = vec![
        LegendEntry {
            style: EdgeStyle::Dashed,
            text: text.legend_advisory.clone(),
        },
        LegendEntry {
            style: EdgeStyle::Solid,
            text: text.legend_flow.clone(),
        },
    ];
    let legend_width = entries.len() as f64 * LEGEND_ENTRY_WIDTH;
    let legend = Legend {
        origin: Point::new(
            positions.canvas_width / 2.0 - legend_width / 2.0,
            extent.bottom() + LEGEND_GAP,
        ),
        entries,
    };
    let legend_box = BoundingBox::new(legend.origin.x, legend.origin.y, legend_width, LEGEND_HEIGHT);
    let bounds = extent.union(&legend_box);

    Scene {
        nodes,
        edges: routed,
        tier_labels,
        legend,
        surface: (
            bounds.width.max(positions.canvas_width),
            bounds.height.max(positions.canvas_height),
        ),
        bounds,
    }
}

fn actor_node(snapshot: &PlanSnapshot, positions: &Positions, id: ActorId) -> NodeView {
    let (title, subtitle) = match snapshot.actor(id) {
        Some(actor) => (actor.name.clone(), actor.description.clone()),
        None => (id.fallback_name().to_string(), String::new()),
    };
    NodeView {
        key: NodeKey::from(id),
        bounds: positions.node_bounds(positions.actor(id)),
        title,
        subtitle,
    }
}
