//! Plan store: owner of the current snapshot
//!
//! The store holds one immutable [`PlanSnapshot`] behind an `Arc` and
//! replaces it wholesale on every accepted action, so a reader that grabbed a
//! snapshot never observes a partial update.

pub mod action;
pub mod reducer;

pub use action::{validate_snapshot, Action, ImageTarget};
pub use reducer::reduce;

use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::model::PlanSnapshot;

/// Handle returned by [`PlanStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&PlanSnapshot)>;

pub struct PlanStore {
    current: Arc<PlanSnapshot>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PlanStore {
    pub fn new(initial: PlanSnapshot) -> Self {
        Self {
            current: Arc::new(initial),
            listeners: vec![],
            next_subscription: 0,
        }
    }

    /// The current snapshot
    pub fn get(&self) -> Arc<PlanSnapshot> {
        Arc::clone(&self.current)
    }

    /// Validate and apply an action
    ///
    /// On success the new snapshot is published and listeners run if it
    /// differs from the previous one. On a validation error nothing changes.
    pub fn dispatch(&mut self, action: Action) -> Result<Arc<PlanSnapshot>, ValidationError> {
        let kind = action.kind();
        if let Err(e) = action.validate(&self.current) {
            tracing::debug!(action = kind, error = %e, "action rejected");
            return Err(e);
        }

        let next = reduce(&self.current, action);
        if next == *self.current {
            tracing::debug!(action = kind, "action left snapshot unchanged");
            return Ok(self.get());
        }

        self.current = Arc::new(next);
        tracing::debug!(
            action = kind,
            suppliers = self.current.suppliers.len(),
            listeners = self.listeners.len(),
            "snapshot replaced"
        );
        for (_, listener) in &self.listeners {
            listener(&self.current);
        }
        Ok(self.get())
    }

    /// Register a listener called after every snapshot change
    pub fn subscribe(&mut self, listener: impl Fn(&PlanSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop all listeners. The snapshot stays readable.
    pub fn teardown(&mut self) {
        self.listeners.clear();
    }
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new(PlanSnapshot::seed())
    }
}

impl fmt::Debug for PlanStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStore")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::model::{EntityPatch, Supplier};

    #[test]
    fn test_listener_fires_on_change() {
        let mut store = PlanStore::default();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store
            .dispatch(Action::AddSupplier(Supplier::new("Acme", "Frames")))
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listener_skipped_when_unchanged() {
        let mut store = PlanStore::default();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.dispatch(Action::Unknown).unwrap();
        store
            .dispatch(Action::DeleteSupplier {
                id: "missing".into(),
            })
            .unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_rejected_action_leaves_store_unchanged() {
        let mut store = PlanStore::default();
        let before = store.get();
        let result = store.dispatch(Action::UpdateSupplier {
            id: "1".into(),
            patch: EntityPatch::new().with_name(""),
        });
        assert!(result.is_err());
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_old_snapshot_is_not_mutated() {
        let mut store = PlanStore::default();
        let before = store.get();
        store
            .dispatch(Action::DeleteSupplier { id: "1".into() })
            .unwrap();
        assert!(before.supplier("1").is_some());
        assert!(store.get().supplier("1").is_none());
    }

    #[test]
    fn test_unsubscribe_and_teardown() {
        let mut store = PlanStore::default();
        let a = store.subscribe(|_| {});
        store.subscribe(|_| {});
        assert!(store.unsubscribe(a));
        assert!(!store.unsubscribe(a));
        assert_eq!(store.listener_count(), 1);
        store.teardown();
        assert_eq!(store.listener_count(), 0);
    }
}
