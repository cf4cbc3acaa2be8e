//! Per-company financial tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    #[serde(alias = "item")]
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    pub net_sales: i64,
    pub cost_of_sales: i64,
    pub gross_profit: i64,
    pub total_opex: i64,
    pub ebitda: i64,
}

/// Named yearly figures; the field set differs per company (units/cost/price
/// for the assembler, battery and cabinet counts for the rental business).
pub type OperationalMetrics = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub revenue_model: String,
    #[serde(default, alias = "production", alias = "sales", alias = "rental")]
    pub yearly_operational_metrics: BTreeMap<u16, OperationalMetrics>,
    #[serde(default, alias = "pnl")]
    pub profit_and_loss: BTreeMap<u16, ProfitAndLoss>,
}

impl FinancialRecord {
    pub fn total_investment(&self) -> f64 {
        self.investments.iter().map(|i| i.amount).sum()
    }

    /// Path of the first figure that is NaN or infinite
    pub fn non_finite_field(&self) -> Option<String> {
        if let Some(i) = self.investments.iter().position(|i| !i.amount.is_finite()) {
            return Some(format!("investments[{}].amount", i));
        }
        self.yearly_operational_metrics.iter().find_map(|(year, metrics)| {
            metrics
                .iter()
                .find(|(_, value)| !value.is_finite())
                .map(|(name, _)| format!("yearlyOperationalMetrics.{}.{}", year, name))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    #[serde(default, alias = "ertug")]
    pub assembler: FinancialRecord,
    #[serde(default, alias = "fiyuuSales")]
    pub distributor_sales: FinancialRecord,
    #[serde(default, alias = "fiyuuSwap")]
    pub distributor_rental: FinancialRecord,
}

impl Financials {
    pub fn records(&self) -> [&FinancialRecord; 3] {
        [&self.assembler, &self.distributor_sales, &self.distributor_rental]
    }

    pub(crate) fn merge(&self, patch: &FinancialsPatch) -> Financials {
        let mut next = self.clone();
        if let Some(r) = &patch.assembler {
            next.assembler = r.clone();
        }
        if let Some(r) = &patch.distributor_sales {
            next.distributor_sales = r.clone();
        }
        if let Some(r) = &patch.distributor_rental {
            next.distributor_rental = r.clone();
        }
        next
    }
}

/// Shallow-merge patch for [`Financials`]: each present record replaces the old one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsPatch {
    #[serde(default, alias = "ertug", skip_serializing_if = "Option::is_none")]
    pub assembler: Option<FinancialRecord>,
    #[serde(default, alias = "fiyuuSales", skip_serializing_if = "Option::is_none")]
    pub distributor_sales: Option<FinancialRecord>,
    #[serde(default, alias = "fiyuuSwap", skip_serializing_if = "Option::is_none")]
    pub distributor_rental: Option<FinancialRecord>,
}
