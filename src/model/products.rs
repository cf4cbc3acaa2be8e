//! Product catalogue grouped by fixed category

use serde::{Deserialize, Serialize};

use super::empty_as_none;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductCategory {
    /// Production equipment bought by the assembler
    #[serde(alias = "A")]
    Equipment,
    /// The finished unit
    #[serde(alias = "B")]
    Unit,
    /// Rentable consumable (battery)
    #[serde(alias = "C")]
    Consumable,
    /// Swap cabinet that dispenses consumables
    #[serde(alias = "D")]
    DispensingCabinet,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Equipment,
        ProductCategory::Unit,
        ProductCategory::Consumable,
        ProductCategory::DispensingCabinet,
    ];

    /// Only imported goods carry a customs calculation
    pub fn allows_customs(&self) -> bool {
        !matches!(self, ProductCategory::Equipment)
    }
}

/// Import-cost breakdown for one product line
///
/// Amounts are per unit. `*_local` fields are in the importer's currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomsCalculation {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub hs_code: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub fob_usd: f64,
    #[serde(default, alias = "qty")]
    pub quantity: f64,
    #[serde(default)]
    pub freight: f64,
    #[serde(default)]
    pub cif_usd: f64,
    #[serde(default, alias = "cifTl")]
    pub cif_local: f64,
    #[serde(default, alias = "gv")]
    pub customs_duty: f64,
    #[serde(default, alias = "ilaveGv")]
    pub additional_duty: f64,
    #[serde(default, alias = "kkdf")]
    pub resource_fund_levy: f64,
    #[serde(default, alias = "dv")]
    pub stamp_tax: f64,
    #[serde(default, alias = "dep")]
    pub storage_fee: f64,
    #[serde(default, alias = "tah")]
    pub handling_fee: f64,
    #[serde(default, alias = "tumSair")]
    pub other_fees: f64,
    #[serde(default, alias = "logis")]
    pub logistics: f64,
    #[serde(default, alias = "cogs")]
    pub cost_of_goods: f64,
    #[serde(default, alias = "bandrol")]
    pub banderole: f64,
    #[serde(default, alias = "araTop")]
    pub subtotal: f64,
    #[serde(default, alias = "otv")]
    pub consumption_tax: f64,
    #[serde(default, alias = "finalTl")]
    pub final_local: f64,
    #[serde(default)]
    pub final_usd: f64,
}

impl CustomsCalculation {
    /// First amount that is NaN or infinite; JSON cannot carry those
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("fobUsd", self.fob_usd),
            ("quantity", self.quantity),
            ("freight", self.freight),
            ("cifUsd", self.cif_usd),
            ("cifLocal", self.cif_local),
            ("customsDuty", self.customs_duty),
            ("additionalDuty", self.additional_duty),
            ("resourceFundLevy", self.resource_fund_levy),
            ("stampTax", self.stamp_tax),
            ("storageFee", self.storage_fee),
            ("handlingFee", self.handling_fee),
            ("otherFees", self.other_fees),
            ("logistics", self.logistics),
            ("costOfGoods", self.cost_of_goods),
            ("banderole", self.banderole),
            ("subtotal", self.subtotal),
            ("consumptionTax", self.consumption_tax),
            ("finalLocal", self.final_local),
            ("finalUsd", self.final_usd),
        ]
        .into_iter()
        .find(|(_, amount)| !amount.is_finite())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category: ProductCategory,
    pub name: String,
    #[serde(
        default,
        alias = "imageUrl",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub specifications: String,
    #[serde(default, alias = "supplier")]
    pub supplier_name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, alias = "customsData", skip_serializing_if = "Option::is_none")]
    pub customs_calculation: Option<CustomsCalculation>,
}

impl Product {
    /// Create a product with a freshly generated id
    pub fn new(category: ProductCategory, name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            name: name.into(),
            image_ref: None,
            specifications: String::new(),
            supplier_name: String::new(),
            price: String::new(),
            customs_calculation: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_specifications(mut self, specifications: impl Into<String>) -> Self {
        self.specifications = specifications.into();
        self
    }

    pub fn with_supplier(mut self, supplier_name: impl Into<String>) -> Self {
        self.supplier_name = supplier_name.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_customs(mut self, customs: CustomsCalculation) -> Self {
        self.customs_calculation = Some(customs);
        self
    }
}

/// Partial update for a product; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(default, alias = "supplier", skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, alias = "customsData", skip_serializing_if = "Option::is_none")]
    pub customs_calculation: Option<CustomsCalculation>,
}

impl ProductPatch {
    pub(crate) fn apply(&self, product: &mut Product) {
        if let Some(v) = &self.name {
            product.name = v.clone();
        }
        if let Some(v) = &self.specifications {
            product.specifications = v.clone();
        }
        if let Some(v) = &self.supplier_name {
            product.supplier_name = v.clone();
        }
        if let Some(v) = &self.price {
            product.price = v.clone();
        }
        if let Some(v) = &self.customs_calculation {
            product.customs_calculation = Some(v.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Products {
    #[serde(default)]
    pub equipments: Vec<Product>,
    #[serde(default, alias = "emopeds")]
    pub units: Vec<Product>,
    #[serde(default, alias = "batteries")]
    pub consumables: Vec<Product>,
    #[serde(default, alias = "cabinets")]
    pub dispensing_cabinets: Vec<Product>,
}

impl Products {
    pub fn list(&self, category: ProductCategory) -> &[Product] {
        match category {
            ProductCategory::Equipment => &self.equipments,
            ProductCategory::Unit => &self.units,
            ProductCategory::Consumable => &self.consumables,
            ProductCategory::DispensingCabinet => &self.dispensing_cabinets,
        }
    }

    pub(crate) fn list_mut(&mut self, category: ProductCategory) -> &mut Vec<Product> {
        match category {
            ProductCategory::Equipment => &mut self.equipments,
            ProductCategory::Unit => &mut self.units,
            ProductCategory::Consumable => &mut self.consumables,
            ProductCategory::DispensingCabinet => &mut self.dispensing_cabinets,
        }
    }

    /// Ids are unique within a category, not across categories
    pub fn find(&self, category: ProductCategory, id: &str) -> Option<&Product> {
        self.list(category).iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        ProductCategory::ALL.iter().map(|c| self.list(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_product_shape() {
        let json = r#"{
            "equipments": [],
            "emopeds": [{
                "id": "1", "category": "B", "name": "Unit", "imageUrl": "",
                "specifications": "3000W", "supplier": "Sleeu", "price": "305 USD FOB",
                "customsData": { "fobUsd": 305, "qty": 270, "freight": 15, "finalTl": 15839, "finalUsd": 352 }
            }],
            "batteries": [],
            "cabinets": []
        }"#;
        let products: Products = serde_json::from_str(json).unwrap();
        let unit = products.find(ProductCategory::Unit, "1").unwrap();
        assert_eq!(unit.supplier_name, "Sleeu");
        assert_eq!(unit.image_ref, None);
        let customs = unit.customs_calculation.as_ref().unwrap();
        assert_eq!(customs.quantity, 270.0);
        assert_eq!(customs.final_local, 15839.0);
    }

    #[test]
    fn test_same_id_in_different_categories() {
        let products = Products {
            equipments: vec![Product::new(ProductCategory::Equipment, "Line").with_id("1")],
            units: vec![Product::new(ProductCategory::Unit, "Moped").with_id("1")],
            ..Default::default()
        };
        assert_eq!(products.find(ProductCategory::Equipment, "1").unwrap().name, "Line");
        assert_eq!(products.find(ProductCategory::Unit, "1").unwrap().name, "Moped");
        assert!(products.find(ProductCategory::Consumable, "1").is_none());
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn test_non_finite_customs_amount() {
        let mut customs = CustomsCalculation::default();
        assert_eq!(customs.non_finite_field(), None);
        customs.freight = f64::INFINITY;
        customs.final_usd = f64::NAN;
        assert_eq!(customs.non_finite_field(), Some("freight"));
    }

    #[test]
    fn test_equipment_disallows_customs() {
        assert!(!ProductCategory::Equipment.allows_customs());
        assert!(ProductCategory::DispensingCabinet.allows_customs());
    }
}
