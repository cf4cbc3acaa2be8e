//! Edge resolution: flow relationships to directed diagram edges
//!
//! Pure and deterministic. Supplier ids that are not in the given id list are
//! skipped; a dangling reference never produces an edge or an error.

use std::collections::HashSet;

use serde::Serialize;

use crate::layout::NodeKey;
use crate::model::BusinessFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeStyle {
    /// Goods or money change hands
    Solid,
    /// Advisory link, nothing is sold
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(rename = "fromKey")]
    pub from: NodeKey,
    #[serde(rename = "toKey")]
    pub to: NodeKey,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    fn new(from: NodeKey, to: NodeKey, style: EdgeStyle, label: Option<&str>) -> Self {
        Self {
            from,
            to,
            style,
            label: label.map(str::to_string),
        }
    }
}

/// Text attached to each kind of edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabels {
    pub advisory: String,
    /// `None` draws supplier to assembler edges unlabeled
    pub supplier_to_assembler: Option<String>,
    pub supplier_to_distributor: String,
    pub assembler_to_distributor: String,
    pub unit_sale: String,
    pub consumable_rental: String,
    pub unit_sale_and_rental: String,
}

impl Default for EdgeLabels {
    fn default() -> Self {
        Self {
            advisory: "connection/advisory".to_string(),
            supplier_to_assembler: None,
            supplier_to_distributor: "consumable+cabinet".to_string(),
            assembler_to_distributor: "finished-unit sale".to_string(),
            unit_sale: "unit sale".to_string(),
            consumable_rental: "consumable rental".to_string(),
            unit_sale_and_rental: "unit sale + consumable rental".to_string(),
        }
    }
}

/// Resolve edges with the default labels
pub fn resolve_edges(flow: &BusinessFlow, supplier_ids: &[&str]) -> Vec<Edge> {
    resolve_edges_with(flow, supplier_ids, &EdgeLabels::default())
}

/// Resolve edges in fixed rule order: advisory links, supplier sales to the
/// assembler, supplier sales to the distributor, assembler to distributor,
/// distributor to end user.
pub fn resolve_edges_with(
    flow: &BusinessFlow,
    supplier_ids: &[&str],
    labels: &EdgeLabels,
) -> Vec<Edge> {
    let known: HashSet<&str> = supplier_ids.iter().copied().collect();
    let mut edges = vec![];

    for id in present(&flow.consultant_connections, &known) {
        edges.push(Edge::new(
            NodeKey::Consultant,
            NodeKey::supplier(id),
            EdgeStyle::Dashed,
            Some(&labels.advisory),
        ));
    }

    for id in present(&flow.suppliers_to_assembler, &known) {
        edges.push(Edge::new(
            NodeKey::supplier(id),
            NodeKey::Assembler,
            EdgeStyle::Solid,
            labels.supplier_to_assembler.as_deref(),
        ));
    }

    for id in present(&flow.suppliers_to_distributor, &known) {
        edges.push(Edge::new(
            NodeKey::supplier(id),
            NodeKey::Distributor,
            EdgeStyle::Solid,
            Some(&labels.supplier_to_distributor),
        ));
    }

    if flow.assembler_to_distributor {
        edges.push(Edge::new(
            NodeKey::Assembler,
            NodeKey::Distributor,
            EdgeStyle::Solid,
            Some(&labels.assembler_to_distributor),
        ));
    }

    let end_user = flow.distributor_to_end_user;
    let end_user_label = match (end_user.sells_unit, end_user.rents_consumable) {
        (true, true) => Some(&labels.unit_sale_and_rental),
        (true, false) => Some(&labels.unit_sale),
        (false, true) => Some(&labels.consumable_rental),
        (false, false) => None,
    };
    if let Some(label) = end_user_label {
        edges.push(Edge::new(
            NodeKey::Distributor,
            NodeKey::EndUser,
            EdgeStyle::Solid,
            Some(label),
        ));
    }

    edges
}

/// Ids of `list` that exist, first occurrence only, in list order
fn present<'a>(list: &'a [String], known: &HashSet<&str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    list.iter()
        .map(String::as_str)
        .filter(|id| known.contains(id) && seen.insert(*id))
        .collect()
}
