//! Validation errors raised before an action reaches the reducer

use thiserror::Error;

use crate::model::{ActorId, ProductCategory};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{entity} name must not be empty")]
    EmptyName { entity: &'static str },

    #[error("{entity} with id '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("product '{product}' is equipment and cannot carry a customs calculation")]
    CustomsNotAllowed { product: String },

    #[error("image reference must not be empty")]
    EmptyImageRef,

    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: String },

    /// A loaded snapshot must hold each fixed actor exactly once
    #[error("snapshot actors are invalid: {}", format_actor_ids(.missing, .duplicated))]
    ActorSet {
        missing: Vec<ActorId>,
        duplicated: Vec<ActorId>,
    },

    #[error("product '{id}' is listed under {listed:?} but tagged {tagged:?}")]
    CategoryMismatch {
        id: String,
        listed: ProductCategory,
        tagged: ProductCategory,
    },
}

impl ValidationError {
    pub fn empty_name(entity: &'static str) -> Self {
        Self::EmptyName { entity }
    }

    pub fn duplicate(entity: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            entity,
            id: id.into(),
        }
    }

    /// The form field the user should fix, if the error maps onto one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName { .. } => Some("name"),
            Self::CustomsNotAllowed { .. } => Some("customsCalculation"),
            Self::EmptyImageRef => Some("imageRef"),
            _ => None,
        }
    }
}

fn format_actor_ids(missing: &[ActorId], duplicated: &[ActorId]) -> String {
    let join = |ids: &[ActorId]| {
        ids.iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match (missing.is_empty(), duplicated.is_empty()) {
        (false, true) => format!("missing {}", join(missing)),
        (true, false) => format!("duplicated {}", join(duplicated)),
        _ => format!("missing {}; duplicated {}", join(missing), join(duplicated)),
    }
}
