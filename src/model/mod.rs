//! Business-plan data model
//!
//! One canonical schema for everything the store owns. Field names follow the
//! persisted camelCase JSON layout; the legacy names used by older API
//! payloads are accepted as serde aliases so that normalization happens once,
//! at deserialization time.

pub mod financials;
pub mod products;
mod seed;
pub mod types;

pub use financials::{
    FinancialRecord, Financials, FinancialsPatch, Investment, OperationalMetrics, ProfitAndLoss,
};
pub use products::{CustomsCalculation, Product, ProductCategory, ProductPatch, Products};
pub use types::*;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional reference, treating `""` the same as absent.
///
/// Older payloads store "no image" as an empty `logoUrl`/`imageUrl`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(non_blank)
}

/// Drop an empty or whitespace-only reference
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
