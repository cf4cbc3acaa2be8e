//! Pure state transitions

use crate::model::{non_blank, PlanSnapshot, ProductCategory};

use super::action::{Action, ImageTarget};

/// Apply an action to a snapshot, producing the next snapshot
///
/// Never mutates `state`. Actions whose target no longer exists, and
/// [`Action::Unknown`], return an identical copy.
pub fn reduce(state: &PlanSnapshot, action: Action) -> PlanSnapshot {
    let mut next = state.clone();
    match action {
        Action::UpdateActor { id, patch } => {
            if let Some(actor) = next.actors.iter_mut().find(|a| a.id == id) {
                patch.apply(&mut actor.name, &mut actor.logo_ref, &mut actor.description);
            }
        }
        Action::AddSupplier(mut supplier) => {
            supplier.logo_ref = non_blank(supplier.logo_ref);
            next.suppliers.push(supplier);
        }
        Action::UpdateSupplier { id, patch } => {
            if let Some(supplier) = next.suppliers.iter_mut().find(|s| s.id == id) {
                patch.apply(
                    &mut supplier.name,
                    &mut supplier.logo_ref,
                    &mut supplier.description,
                );
            }
        }
        Action::DeleteSupplier { id } => {
            next.suppliers.retain(|s| s.id != id);
            next.business_flow.prune_supplier(&id);
        }
        Action::AddProduct(mut product) => {
            product.image_ref = non_blank(product.image_ref);
            next.products.list_mut(product.category).push(product);
        }
        Action::UpdateProduct {
            category,
            id,
            patch,
        } => {
            if let Some(product) = find_product_mut(&mut next, category, &id) {
                patch.apply(product);
            }
        }
        Action::DeleteProduct { category, id } => {
            next.products.list_mut(category).retain(|p| p.id != id);
        }
        Action::UpdateBusinessFlow(patch) => {
            next.business_flow = state.business_flow.merge(&patch);
        }
        Action::UpdateFinancial(patch) => {
            next.financials = state.financials.merge(&patch);
        }
        Action::AttachImage { target, image_ref } => {
            if let Some(slot) = image_slot(&mut next, &target) {
                *slot = Some(image_ref);
            }
        }
        Action::DetachImage { target } => {
            if let Some(slot) = image_slot(&mut next, &target) {
                *slot = None;
            }
        }
        Action::LoadSnapshot(mut snapshot) => {
            snapshot.clear_blank_refs();
            return *snapshot;
        }
        Action::Unknown => {}
    }
    next
}

fn find_product_mut<'a>(
    state: &'a mut PlanSnapshot,
    category: ProductCategory,
    id: &str,
) -> Option<&'a mut crate::model::Product> {
    state
        .products
        .list_mut(category)
        .iter_mut()
        .find(|p| p.id == id)
}

/// The image reference field of the target, if the target still exists
fn image_slot<'a>(
    state: &'a mut PlanSnapshot,
    target: &ImageTarget,
) -> Option<&'a mut Option<String>> {
    match target {
        ImageTarget::Actor { id } => state
            .actors
            .iter_mut()
            .find(|a| a.id == *id)
            .map(|a| &mut a.logo_ref),
        ImageTarget::Supplier { id } => state
            .suppliers
            .iter_mut()
            .find(|s| s.id == *id)
            .map(|s| &mut s.logo_ref),
        ImageTarget::Product { category, id } => {
            find_product_mut(state, *category, id).map(|p| &mut p.image_ref)
        }
    }
}
