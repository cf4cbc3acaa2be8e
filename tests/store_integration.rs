//! Plan store behavior through its public API

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use plan_illustrator::model::{
    ActorId, BusinessFlowPatch, EndUserFlow, EntityPatch, Product, ProductCategory, Supplier,
};
use plan_illustrator::store::ImageTarget;
use plan_illustrator::{persist, resolve_edges, Action, NodeKey, PlanSnapshot, PlanStore};

#[test]
fn delete_supplier_prunes_every_flow_list() {
    let mut store = PlanStore::default();
    let before = store.get();
    assert!(before.business_flow.references("1"));

    let after = store
        .dispatch(Action::DeleteSupplier { id: "1".into() })
        .unwrap();

    let flow = &after.business_flow;
    assert!(!flow.consultant_connections.contains(&"1".to_string()));
    assert!(!flow.suppliers_to_assembler.contains(&"1".to_string()));
    assert!(!flow.suppliers_to_distributor.contains(&"1".to_string()));
    assert!(resolve_edges(flow, &after.supplier_ids())
        .iter()
        .all(|e| e.from != NodeKey::supplier("1") && e.to != NodeKey::supplier("1")));
}

#[test]
fn listeners_see_each_new_snapshot() {
    let mut store = PlanStore::new(PlanSnapshot::empty());
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = Rc::clone(&seen);
    store.subscribe(move |s| sink.borrow_mut().push(s.suppliers.len()));

    store
        .dispatch(Action::AddSupplier(Supplier::with_id("a", "Acme", "frames")))
        .unwrap();
    store
        .dispatch(Action::AddSupplier(Supplier::with_id("b", "Bolt", "motors")))
        .unwrap();
    store.dispatch(Action::DeleteSupplier { id: "a".into() }).unwrap();

    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
}

#[test]
fn empty_supplier_name_is_rejected() {
    let mut store = PlanStore::new(PlanSnapshot::empty());
    let result = store.dispatch(Action::AddSupplier(Supplier::with_id("a", "  ", "")));
    assert!(result.is_err());
    assert!(store.get().suppliers.is_empty());
}

#[test]
fn flow_patch_merges_shallowly() {
    let mut store = PlanStore::default();
    let before = store.get();
    let after = store
        .dispatch(Action::UpdateBusinessFlow(BusinessFlowPatch {
            assembler_to_distributor: Some(false),
            ..Default::default()
        }))
        .unwrap();
    assert!(!after.business_flow.assembler_to_distributor);
    assert_eq!(
        after.business_flow.consultant_connections,
        before.business_flow.consultant_connections
    );
}

#[test]
fn actions_decode_from_legacy_type_names() {
    let action: Action =
        serde_json::from_str(r#"{"type": "DELETE_SUPPLIER", "payload": {"id": "3"}}"#).unwrap();
    assert_eq!(action, Action::DeleteSupplier { id: "3".into() });

    let flow: Action = serde_json::from_str(
        r#"{"type": "UPDATE_BUSINESS_FLOW", "payload": {"fiyuuToEndUser": {"emoped": false, "battery": true}}}"#,
    )
    .unwrap();
    assert_eq!(
        flow,
        Action::UpdateBusinessFlow(BusinessFlowPatch {
            distributor_to_end_user: Some(EndUserFlow {
                sells_unit: false,
                rents_consumable: true,
            }),
            ..Default::default()
        })
    );
}

#[test]
fn unknown_action_changes_nothing() {
    let mut store = PlanStore::default();
    let before = store.get();
    let action: Action = serde_json::from_str(r#"{"type": "SOMETHING_ELSE"}"#).unwrap();
    let after = store.dispatch(action).unwrap();
    assert_eq!(*after, *before);
}

#[test]
fn image_completes_after_target_deleted() {
    let mut store = PlanStore::default();
    store.dispatch(Action::DeleteSupplier { id: "2".into() }).unwrap();
    let before = store.get();

    let after = store
        .dispatch(Action::AttachImage {
            target: ImageTarget::Supplier { id: "2".into() },
            image_ref: "img-1".into(),
        })
        .unwrap();
    assert_eq!(*after, *before);
}

#[test]
fn load_snapshot_replaces_everything() {
    let mut store = PlanStore::default();
    let after = store.dispatch(Action::load(PlanSnapshot::empty())).unwrap();
    assert!(after.suppliers.is_empty());
    assert_eq!(after.actors.len(), 3);
}

/// Absent, blank, whitespace-only or real image reference
fn image_ref() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[ \t]{1,3}".prop_map(Some),
        "[a-f0-9]{8}".prop_map(Some),
    ]
}

/// One step a user could take from the seed plan
fn step() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[1-7]".prop_map(|id| Action::DeleteSupplier { id }),
        ("[a-z]{1,8}", "[a-z ]{0,30}", image_ref()).prop_map(|(name, description, logo_ref)| {
            let mut supplier = Supplier::new(name, description);
            supplier.logo_ref = logo_ref;
            Action::AddSupplier(supplier)
        }),
        ("[1-5]", "[A-Za-z]{1,10}").prop_map(|(id, name)| Action::UpdateSupplier {
            id,
            patch: EntityPatch::new().with_name(name),
        }),
        "[A-Za-z]{1,12}".prop_map(|name| Action::UpdateActor {
            id: ActorId::Assembler,
            patch: EntityPatch::new().with_description(name),
        }),
        ("[a-z]{1,10}", image_ref()).prop_map(|(name, image_ref)| {
            let mut product = Product::new(ProductCategory::Unit, name);
            product.image_ref = image_ref;
            Action::AddProduct(product)
        }),
        ("[1-5]", image_ref()).prop_map(|(id, logo_ref)| Action::UpdateSupplier {
            id,
            patch: EntityPatch {
                logo_ref: Some(logo_ref.unwrap_or_default()),
                ..Default::default()
            },
        }),
        ("[1-5]", "[a-f0-9]{8}").prop_map(|(id, image_ref)| Action::AttachImage {
            target: ImageTarget::Supplier { id },
            image_ref,
        }),
        (any::<bool>(), any::<bool>()).prop_map(|(sells, rents)| {
            Action::UpdateBusinessFlow(BusinessFlowPatch {
                distributor_to_end_user: Some(EndUserFlow {
                    sells_unit: sells,
                    rents_consumable: rents,
                }),
                ..Default::default()
            })
        }),
    ]
}

proptest! {
    #[test]
    fn reachable_snapshots_round_trip(steps in prop::collection::vec(step(), 0..12)) {
        let mut store = PlanStore::default();
        for action in steps {
            // Rejected steps leave the store as it was
            let _ = store.dispatch(action);
        }
        let snapshot = store.get();

        let json = persist::to_json(&snapshot).unwrap();
        let mut restored = PlanStore::new(PlanSnapshot::empty());
        let loaded = restored
            .dispatch(Action::load(persist::from_json(&json).unwrap()))
            .unwrap();
        prop_assert_eq!(&*loaded, &*snapshot);
    }
}
