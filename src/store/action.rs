//! Store actions and their validation

use std::collections::HashSet;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::model::{
    ActorId, BusinessFlowPatch, CustomsCalculation, EntityPatch, FinancialRecord, FinancialsPatch,
    PlanSnapshot, Product, ProductCategory, ProductPatch, Supplier,
};

/// The entity an uploaded or deleted image belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageTarget {
    Actor { id: ActorId },
    Supplier { id: String },
    Product { category: ProductCategory, id: String },
}

impl ImageTarget {
    /// Whether the entity is still present in the snapshot
    pub fn exists_in(&self, snapshot: &PlanSnapshot) -> bool {
        match self {
            ImageTarget::Actor { id } => snapshot.actor(*id).is_some(),
            ImageTarget::Supplier { id } => snapshot.supplier(id).is_some(),
            ImageTarget::Product { category, id } => snapshot.products.find(*category, id).is_some(),
        }
    }
}

/// A state transition of the plan store
///
/// Serialized as `{"type": ..., "payload": ...}`; the upper-case type names of
/// older clients are accepted as aliases. Any other type decodes to
/// [`Action::Unknown`] whatever its payload, and leaves the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    #[serde(alias = "UPDATE_ACTOR")]
    UpdateActor {
        id: ActorId,
        #[serde(flatten)]
        patch: EntityPatch,
    },
    #[serde(alias = "ADD_SUPPLIER")]
    AddSupplier(Supplier),
    #[serde(alias = "UPDATE_SUPPLIER")]
    UpdateSupplier {
        id: String,
        #[serde(flatten)]
        patch: EntityPatch,
    },
    /// Removes the supplier and every flow reference to it
    #[serde(alias = "DELETE_SUPPLIER")]
    DeleteSupplier { id: String },
    #[serde(alias = "ADD_PRODUCT")]
    AddProduct(Product),
    #[serde(alias = "UPDATE_PRODUCT")]
    UpdateProduct {
        category: ProductCategory,
        id: String,
        #[serde(flatten)]
        patch: ProductPatch,
    },
    #[serde(alias = "DELETE_PRODUCT")]
    DeleteProduct { category: ProductCategory, id: String },
    #[serde(alias = "UPDATE_BUSINESS_FLOW")]
    UpdateBusinessFlow(BusinessFlowPatch),
    #[serde(alias = "UPDATE_FINANCIAL")]
    UpdateFinancial(FinancialsPatch),
    /// Upload finished; ignored when the target is gone
    #[serde(rename_all = "camelCase")]
    AttachImage { target: ImageTarget, image_ref: String },
    /// Delete finished; ignored when the target is gone
    DetachImage { target: ImageTarget },
    #[serde(alias = "LOAD_DATA")]
    LoadSnapshot(Box<PlanSnapshot>),
    Unknown,
}

/// Every `type` value with a variant of its own
const KNOWN_TYPES: &[&str] = &[
    "updateActor",
    "UPDATE_ACTOR",
    "addSupplier",
    "ADD_SUPPLIER",
    "updateSupplier",
    "UPDATE_SUPPLIER",
    "deleteSupplier",
    "DELETE_SUPPLIER",
    "addProduct",
    "ADD_PRODUCT",
    "updateProduct",
    "UPDATE_PRODUCT",
    "deleteProduct",
    "DELETE_PRODUCT",
    "updateBusinessFlow",
    "UPDATE_BUSINESS_FLOW",
    "updateFinancial",
    "UPDATE_FINANCIAL",
    "attachImage",
    "detachImage",
    "loadSnapshot",
    "LOAD_DATA",
];

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Action::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value.get("type").and_then(serde_json::Value::as_str) {
            Some(kind) if !KNOWN_TYPES.contains(&kind) => Ok(Action::Unknown),
            _ => Action::deserialize(value).map_err(de::Error::custom),
        }
    }
}

impl Action {
    pub fn load(snapshot: PlanSnapshot) -> Self {
        Action::LoadSnapshot(Box::new(snapshot))
    }

    /// Short name for log output
    pub fn kind(&self) -> &'static str {
        match self {
            Action::UpdateActor { .. } => "updateActor",
            Action::AddSupplier(_) => "addSupplier",
            Action::UpdateSupplier { .. } => "updateSupplier",
            Action::DeleteSupplier { .. } => "deleteSupplier",
            Action::AddProduct(_) => "addProduct",
            Action::UpdateProduct { .. } => "updateProduct",
            Action::DeleteProduct { .. } => "deleteProduct",
            Action::UpdateBusinessFlow(_) => "updateBusinessFlow",
            Action::UpdateFinancial(_) => "updateFinancial",
            Action::AttachImage { .. } => "attachImage",
            Action::DetachImage { .. } => "detachImage",
            Action::LoadSnapshot(_) => "loadSnapshot",
            Action::Unknown => "unknown",
        }
    }

    /// Reject actions the user must correct before the store sees them
    pub fn validate(&self, snapshot: &PlanSnapshot) -> Result<(), ValidationError> {
        match self {
            Action::UpdateActor { patch, .. } => check_patch_name(patch.name.as_deref(), "actor"),
            Action::AddSupplier(supplier) => {
                check_name(&supplier.name, "supplier")?;
                if snapshot.supplier(&supplier.id).is_some() {
                    return Err(ValidationError::duplicate("supplier", &supplier.id));
                }
                Ok(())
            }
            Action::UpdateSupplier { patch, .. } => {
                check_patch_name(patch.name.as_deref(), "supplier")
            }
            Action::AddProduct(product) => {
                check_name(&product.name, "product")?;
                check_customs(product.category, &product.name, product.customs_calculation.is_some())?;
                check_customs_amounts(&product.name, product.customs_calculation.as_ref())?;
                if snapshot.products.find(product.category, &product.id).is_some() {
                    return Err(ValidationError::duplicate("product", &product.id));
                }
                Ok(())
            }
            Action::UpdateProduct {
                category,
                id,
                patch,
            } => {
                check_patch_name(patch.name.as_deref(), "product")?;
                check_customs(*category, id, patch.customs_calculation.is_some())?;
                check_customs_amounts(id, patch.customs_calculation.as_ref())
            }
            Action::AttachImage { image_ref, .. } => {
                if image_ref.trim().is_empty() {
                    Err(ValidationError::EmptyImageRef)
                } else {
                    Ok(())
                }
            }
            Action::UpdateFinancial(patch) => [
                &patch.assembler,
                &patch.distributor_sales,
                &patch.distributor_rental,
            ]
            .into_iter()
            .flatten()
            .try_for_each(check_record_amounts),
            Action::LoadSnapshot(next) => validate_snapshot(next),
            Action::DeleteSupplier { .. }
            | Action::DeleteProduct { .. }
            | Action::UpdateBusinessFlow(_)
            | Action::DetachImage { .. }
            | Action::Unknown => Ok(()),
        }
    }
}

fn check_name(name: &str, entity: &'static str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::empty_name(entity))
    } else {
        Ok(())
    }
}

fn check_patch_name(name: Option<&str>, entity: &'static str) -> Result<(), ValidationError> {
    name.map_or(Ok(()), |n| check_name(n, entity))
}

fn check_customs(
    category: ProductCategory,
    product: &str,
    has_customs: bool,
) -> Result<(), ValidationError> {
    if has_customs && !category.allows_customs() {
        return Err(ValidationError::CustomsNotAllowed {
            product: product.to_string(),
        });
    }
    Ok(())
}

fn check_customs_amounts(
    product: &str,
    customs: Option<&CustomsCalculation>,
) -> Result<(), ValidationError> {
    match customs.and_then(CustomsCalculation::non_finite_field) {
        Some(field) => Err(ValidationError::NonFiniteAmount {
            field: format!("{}.customsCalculation.{}", product, field),
        }),
        None => Ok(()),
    }
}

fn check_record_amounts(record: &FinancialRecord) -> Result<(), ValidationError> {
    match record.non_finite_field() {
        Some(field) => Err(ValidationError::NonFiniteAmount { field }),
        None => Ok(()),
    }
}

/// Structural checks for a snapshot arriving from outside the store
pub fn validate_snapshot(snapshot: &PlanSnapshot) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut duplicated = vec![];
    for actor in &snapshot.actors {
        if !seen.insert(actor.id) && !duplicated.contains(&actor.id) {
            duplicated.push(actor.id);
        }
    }
    let missing: Vec<ActorId> = ActorId::ALL
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    if !missing.is_empty() || !duplicated.is_empty() {
        return Err(ValidationError::ActorSet {
            missing,
            duplicated,
        });
    }

    let mut supplier_ids = HashSet::new();
    for supplier in &snapshot.suppliers {
        if !supplier_ids.insert(supplier.id.as_str()) {
            return Err(ValidationError::duplicate("supplier", &supplier.id));
        }
    }

    for listed in ProductCategory::ALL {
        let mut product_ids = HashSet::new();
        for product in snapshot.products.list(listed) {
            if product.category != listed {
                return Err(ValidationError::CategoryMismatch {
                    id: product.id.clone(),
                    listed,
                    tagged: product.category,
                });
            }
            if !product_ids.insert(product.id.as_str()) {
                return Err(ValidationError::duplicate("product", &product.id));
            }
            check_customs(listed, &product.name, product.customs_calculation.is_some())?;
            check_customs_amounts(&product.name, product.customs_calculation.as_ref())?;
        }
    }

    snapshot
        .financials
        .records()
        .into_iter()
        .try_for_each(check_record_amounts)
}
