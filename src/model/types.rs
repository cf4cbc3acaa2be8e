//! Actors, suppliers, flow relationships and the snapshot that holds them

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{empty_as_none, non_blank, Financials, ProductCategory, Products};

/// The three fixed actors of the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActorId {
    /// Sourcing and advisory
    #[serde(alias = "atabridge")]
    Consultant,
    /// Builds finished units from supplier inputs
    #[serde(alias = "ertug")]
    Assembler,
    /// Sells units and rents consumables to end users
    #[serde(alias = "fiyuu")]
    Distributor,
}

impl ActorId {
    pub const ALL: [ActorId; 3] = [ActorId::Consultant, ActorId::Assembler, ActorId::Distributor];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorId::Consultant => "consultant",
            ActorId::Assembler => "assembler",
            ActorId::Distributor => "distributor",
        }
    }

    /// Name shown when an actor record is missing from a snapshot
    pub fn fallback_name(&self) -> &'static str {
        match self {
            ActorId::Consultant => "Consultant",
            ActorId::Assembler => "Assembler",
            ActorId::Distributor => "Distributor",
        }
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    #[serde(
        default,
        alias = "logoUrl",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_ref: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo_ref: None,
            description: description.into(),
        }
    }
}

/// Partial update for an actor or supplier; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "logoUrl", skip_serializing_if = "Option::is_none")]
    pub logo_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logo_ref(mut self, logo_ref: impl Into<String>) -> Self {
        self.logo_ref = Some(logo_ref.into());
        self
    }

    /// Apply to the three shared display fields. An empty `logo_ref` clears it.
    pub(crate) fn apply(&self, name: &mut String, logo_ref: &mut Option<String>, description: &mut String) {
        if let Some(n) = &self.name {
            *name = n.clone();
        }
        if let Some(l) = &self.logo_ref {
            *logo_ref = non_blank(Some(l.clone()));
        }
        if let Some(d) = &self.description {
            *description = d.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(
        default,
        alias = "logoUrl",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_ref: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Supplier {
    /// Create a supplier with a freshly generated, stable id
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), name, description)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_ref: None,
            description: description.into(),
        }
    }
}

/// Which goods flow from the distributor to the end user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndUserFlow {
    #[serde(default, alias = "emoped")]
    pub sells_unit: bool,
    #[serde(default, alias = "battery")]
    pub rents_consumable: bool,
}

impl EndUserFlow {
    pub fn any(&self) -> bool {
        self.sells_unit || self.rents_consumable
    }
}

/// Relationships between actors and suppliers drawn by the flow diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFlow {
    #[serde(default, alias = "atabridgeConnections")]
    pub consultant_connections: Vec<String>,
    #[serde(default, alias = "supplierToErtug")]
    pub suppliers_to_assembler: Vec<String>,
    #[serde(default, alias = "supplierToFiyuu")]
    pub suppliers_to_distributor: Vec<String>,
    #[serde(default, alias = "ertugToFiyuu")]
    pub assembler_to_distributor: bool,
    #[serde(default, alias = "fiyuuToEndUser")]
    pub distributor_to_end_user: EndUserFlow,
}

impl BusinessFlow {
    /// Remove a supplier id from every collection that references it
    pub fn prune_supplier(&mut self, supplier_id: &str) {
        self.consultant_connections.retain(|id| id != supplier_id);
        self.suppliers_to_assembler.retain(|id| id != supplier_id);
        self.suppliers_to_distributor.retain(|id| id != supplier_id);
    }

    /// Whether any collection mentions the supplier
    pub fn references(&self, supplier_id: &str) -> bool {
        self.consultant_connections
            .iter()
            .chain(&self.suppliers_to_assembler)
            .chain(&self.suppliers_to_distributor)
            .any(|id| id == supplier_id)
    }

    pub(crate) fn merge(&self, patch: &BusinessFlowPatch) -> BusinessFlow {
        let mut next = self.clone();
        if let Some(v) = &patch.consultant_connections {
            next.consultant_connections = v.clone();
        }
        if let Some(v) = &patch.suppliers_to_assembler {
            next.suppliers_to_assembler = v.clone();
        }
        if let Some(v) = &patch.suppliers_to_distributor {
            next.suppliers_to_distributor = v.clone();
        }
        if let Some(v) = patch.assembler_to_distributor {
            next.assembler_to_distributor = v;
        }
        if let Some(v) = patch.distributor_to_end_user {
            next.distributor_to_end_user = v;
        }
        next
    }
}

/// Shallow-merge patch for [`BusinessFlow`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFlowPatch {
    #[serde(default, alias = "atabridgeConnections", skip_serializing_if = "Option::is_none")]
    pub consultant_connections: Option<Vec<String>>,
    #[serde(default, alias = "supplierToErtug", skip_serializing_if = "Option::is_none")]
    pub suppliers_to_assembler: Option<Vec<String>>,
    #[serde(default, alias = "supplierToFiyuu", skip_serializing_if = "Option::is_none")]
    pub suppliers_to_distributor: Option<Vec<String>>,
    #[serde(default, alias = "ertugToFiyuu", skip_serializing_if = "Option::is_none")]
    pub assembler_to_distributor: Option<bool>,
    #[serde(default, alias = "fiyuuToEndUser", skip_serializing_if = "Option::is_none")]
    pub distributor_to_end_user: Option<EndUserFlow>,
}

/// The complete business plan at one point in time
///
/// Snapshots are never mutated once published by the store; every change
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub products: Products,
    #[serde(default)]
    pub business_flow: BusinessFlow,
    #[serde(default)]
    pub financials: Financials,
}

impl PlanSnapshot {
    /// A plan with the three actors and nothing else
    pub fn empty() -> Self {
        Self {
            actors: ActorId::ALL
                .iter()
                .map(|id| Actor::new(*id, id.fallback_name(), ""))
                .collect(),
            suppliers: vec![],
            products: Products::default(),
            business_flow: BusinessFlow::default(),
            financials: Financials::default(),
        }
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Position of a supplier in display order
    pub fn supplier_index(&self, id: &str) -> Option<usize> {
        self.suppliers.iter().position(|s| s.id == id)
    }

    pub fn supplier_ids(&self) -> Vec<&str> {
        self.suppliers.iter().map(|s| s.id.as_str()).collect()
    }

    /// Clear logo and image references that are blank, as decoding does
    pub(crate) fn clear_blank_refs(&mut self) {
        for actor in &mut self.actors {
            actor.logo_ref = non_blank(actor.logo_ref.take());
        }
        for supplier in &mut self.suppliers {
            supplier.logo_ref = non_blank(supplier.logo_ref.take());
        }
        for category in ProductCategory::ALL {
            for product in self.products.list_mut(category) {
                product.image_ref = non_blank(product.image_ref.take());
            }
        }
    }
}

impl Default for PlanSnapshot {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_supplier_from_all_collections() {
        let mut flow = BusinessFlow {
            consultant_connections: vec!["a".into(), "b".into()],
            suppliers_to_assembler: vec!["b".into()],
            suppliers_to_distributor: vec!["b".into(), "c".into()],
            ..Default::default()
        };
        flow.prune_supplier("b");
        assert!(!flow.references("b"));
        assert_eq!(flow.consultant_connections, vec!["a".to_string()]);
        assert_eq!(flow.suppliers_to_distributor, vec!["c".to_string()]);
    }

    #[test]
    fn test_merge_is_shallow() {
        let flow = BusinessFlow {
            consultant_connections: vec!["a".into()],
            assembler_to_distributor: true,
            ..Default::default()
        };
        let patch = BusinessFlowPatch {
            assembler_to_distributor: Some(false),
            ..Default::default()
        };
        let merged = flow.merge(&patch);
        assert!(!merged.assembler_to_distributor);
        assert_eq!(merged.consultant_connections, vec!["a".to_string()]);
    }

    #[test]
    fn test_legacy_flow_names() {
        let json = r#"{
            "atabridgeConnections": ["1"],
            "supplierToErtug": ["2"],
            "supplierToFiyuu": ["3"],
            "ertugToFiyuu": true,
            "fiyuuToEndUser": { "emoped": false, "battery": true }
        }"#;
        let flow: BusinessFlow = serde_json::from_str(json).unwrap();
        assert_eq!(flow.consultant_connections, vec!["1".to_string()]);
        assert_eq!(flow.suppliers_to_assembler, vec!["2".to_string()]);
        assert_eq!(flow.suppliers_to_distributor, vec!["3".to_string()]);
        assert!(flow.assembler_to_distributor);
        assert!(!flow.distributor_to_end_user.sells_unit);
        assert!(flow.distributor_to_end_user.rents_consumable);
    }

    #[test]
    fn test_empty_logo_url_is_none() {
        let json = r#"{ "id": "x", "name": "X", "logoUrl": "", "description": "" }"#;
        let supplier: Supplier = serde_json::from_str(json).unwrap();
        assert_eq!(supplier.logo_ref, None);
    }

    #[test]
    fn test_legacy_actor_ids() {
        let actor: Actor =
            serde_json::from_str(r#"{ "id": "ertug", "name": "E", "description": "" }"#).unwrap();
        assert_eq!(actor.id, ActorId::Assembler);
        let out = serde_json::to_string(&actor).unwrap();
        assert!(out.contains(r#""id":"assembler""#));
    }

    #[test]
    fn test_supplier_ids_are_unique() {
        let a = Supplier::new("A", "");
        let b = Supplier::new("A", "");
        assert_ne!(a.id, b.id);
    }
}
