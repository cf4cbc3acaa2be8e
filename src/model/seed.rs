//! Initial plan used when nothing has been persisted yet

use std::collections::BTreeMap;

use super::{
    Actor, ActorId, BusinessFlow, CustomsCalculation, EndUserFlow, FinancialRecord, Financials,
    Investment, OperationalMetrics, PlanSnapshot, Product, ProductCategory, ProfitAndLoss,
    Products, Supplier,
};

impl PlanSnapshot {
    /// The e-moped assembly and battery-swap plan the dashboard ships with
    pub fn seed() -> Self {
        Self {
            actors: vec![
                Actor::new(ActorId::Consultant, "AtaBridge", "Sourcing & Consulting"),
                Actor::new(ActorId::Assembler, "Ertuğ", "Assembly & Production"),
                Actor::new(ActorId::Distributor, "Fiyuu", "Sales & Swap Operations"),
            ],
            suppliers: vec![
                Supplier::with_id("1", "Jinggong", "Assembly line manufacturer"),
                Supplier::with_id("2", "Sanco", "Pipe bending machine maker"),
                Supplier::with_id("3", "Lingping", "Laser welding machine maker"),
                Supplier::with_id("4", "Sleeu", "CKD e-moped parts supplier"),
                Supplier::with_id("5", "Zhizhu", "Battery and cabinet manufacturer"),
            ],
            products: seed_products(),
            business_flow: BusinessFlow {
                consultant_connections: ids(&["1", "2", "3", "4", "5"]),
                suppliers_to_assembler: ids(&["1", "2", "3", "4"]),
                suppliers_to_distributor: ids(&["5"]),
                assembler_to_distributor: true,
                distributor_to_end_user: EndUserFlow {
                    sells_unit: true,
                    rents_consumable: true,
                },
            },
            financials: seed_financials(),
        }
    }
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn seed_products() -> Products {
    Products {
        equipments: vec![
            Product::new(ProductCategory::Equipment, "Assembly Line")
                .with_id("1")
                .with_specifications("Length: 18m, 12-15 units/day")
                .with_supplier("Jinggong")
                .with_price("100,000 USD"),
            Product::new(ProductCategory::Equipment, "Pipe Bending Machine")
                .with_id("2")
                .with_specifications("Automatic pipe bending system")
                .with_supplier("Sanco")
                .with_price("25,000 USD"),
            Product::new(ProductCategory::Equipment, "Laser Welding Machine")
                .with_id("3")
                .with_specifications("High precision laser welding")
                .with_supplier("Lingping")
                .with_price("35,000 USD"),
        ],
        units: vec![Product::new(ProductCategory::Unit, "E-Moped BODYGUARD 3000W")
            .with_id("1")
            .with_specifications("Motor: 3000W, Speed: 80km/h, Range: 60-80km, Battery: 72V 30-40Ah LFP")
            .with_supplier("Sleeu")
            .with_price("305 USD FOB")
            .with_customs(CustomsCalculation {
                brand: "Sleeu".into(),
                hs_code: "8714.10.00.90".into(),
                model: "3000W".into(),
                fob_usd: 305.0,
                quantity: 270.0,
                freight: 15.0,
                cif_usd: 320.0,
                cif_local: 14392.0,
                customs_duty: 532.0,
                additional_duty: 720.0,
                resource_fund_levy: 0.0,
                stamp_tax: 3.0,
                storage_fee: 56.0,
                handling_fee: 3.0,
                other_fees: 4.0,
                logistics: 130.0,
                cost_of_goods: 15839.0,
                banderole: 0.0,
                subtotal: 15839.0,
                consumption_tax: 0.0,
                final_local: 15839.0,
                final_usd: 352.0,
            })],
        consumables: vec![Product::new(ProductCategory::Consumable, "Battery 72V 40Ah LFP")
            .with_id("1")
            .with_specifications("IP67 rated, smart BMS, remote monitoring")
            .with_supplier("Zhizhu")
            .with_price("289 USD FOB")
            .with_customs(CustomsCalculation {
                brand: "Zhizhu".into(),
                hs_code: "8507.60.00.00.01".into(),
                model: "72V30A".into(),
                fob_usd: 289.0,
                quantity: 1260.0,
                freight: 3.2,
                cif_usd: 292.0,
                cif_local: 13148.0,
                customs_duty: 355.0,
                additional_duty: 3944.0,
                resource_fund_levy: 0.0,
                stamp_tax: 1.0,
                storage_fee: 12.0,
                handling_fee: 1.0,
                other_fees: 1.0,
                logistics: 28.0,
                cost_of_goods: 17489.0,
                banderole: 0.0,
                subtotal: 17489.0,
                consumption_tax: 525.0,
                final_local: 18014.0,
                final_usd: 400.0,
            })],
        dispensing_cabinets: vec![Product::new(ProductCategory::DispensingCabinet, "Cabinet 10 Slot")
            .with_id("1")
            .with_specifications("8-10 slot swap cabinet, thermal management, fire suppression")
            .with_supplier("Zhizhu")
            .with_price("1,672 USD FOB")
            .with_customs(CustomsCalculation {
                brand: "Zhizhu".into(),
                hs_code: "8504.40.95.90.12".into(),
                model: "xxx".into(),
                fob_usd: 1672.0,
                quantity: 56.0,
                freight: 71.0,
                cif_usd: 1743.0,
                cif_local: 78454.0,
                customs_duty: 2589.0,
                additional_duty: 3923.0,
                resource_fund_levy: 0.0,
                stamp_tax: 16.0,
                storage_fee: 268.0,
                handling_fee: 14.0,
                other_fees: 18.0,
                logistics: 625.0,
                cost_of_goods: 85907.0,
                banderole: 0.0,
                subtotal: 85907.0,
                consumption_tax: 0.0,
                final_local: 85907.0,
                final_usd: 1909.0,
            })],
    }
}

fn investments(items: &[(&str, f64)]) -> Vec<Investment> {
    items
        .iter()
        .map(|(name, amount)| Investment {
            name: name.to_string(),
            amount: *amount,
        })
        .collect()
}

fn metrics(rows: &[(u16, &[(&str, f64)])]) -> BTreeMap<u16, OperationalMetrics> {
    rows.iter()
        .map(|(year, fields)| {
            let m: OperationalMetrics = fields.iter().map(|(k, v)| (k.to_string(), *v)).collect();
            (*year, m)
        })
        .collect()
}

fn pnl(rows: &[(u16, [i64; 5])]) -> BTreeMap<u16, ProfitAndLoss> {
    rows.iter()
        .map(|(year, [net_sales, cost_of_sales, gross_profit, total_opex, ebitda])| {
            (
                *year,
                ProfitAndLoss {
                    net_sales: *net_sales,
                    cost_of_sales: *cost_of_sales,
                    gross_profit: *gross_profit,
                    total_opex: *total_opex,
                    ebitda: *ebitda,
                },
            )
        })
        .collect()
}

fn seed_financials() -> Financials {
    Financials {
        assembler: FinancialRecord {
            investments: investments(&[
                ("Assembly Line", 100_000.0),
                ("Pipe Bending Machine", 25_000.0),
                ("Laser Welding Machine", 35_000.0),
                ("CKD Import & Stocking", 1_200_000.0),
                ("Freight & Customs", 10_000.0),
            ]),
            revenue_model: "E-moped production and sale to the distributor".into(),
            yearly_operational_metrics: metrics(&[
                (2026, &[("units", 3500.0), ("cost", 27398.0), ("price", 33840.0)]),
                (2027, &[("units", 6000.0), ("cost", 29433.0), ("price", 36920.0)]),
                (2028, &[("units", 9000.0), ("cost", 31488.0), ("price", 40600.0)]),
            ]),
            profit_and_loss: pnl(&[
                (2026, [107_949_600, 95_891_511, 12_058_089, 18_720_333, -6_662_245]),
                (2027, [213_550_400, 176_597_577, 36_952_823, 27_934_550, 9_018_273]),
                (2028, [353_410_000, 283_394_827, 70_015_173, 32_015_104, 38_000_069]),
            ]),
        },
        distributor_sales: FinancialRecord {
            investments: investments(&[("Sales & Marketing Infrastructure", 30_000_000.0)]),
            revenue_model: "E-moped resale to courier tradespeople".into(),
            yearly_operational_metrics: metrics(&[
                (2026, &[("units", 3500.0), ("buyPrice", 33840.0), ("sellPrice", 45000.0)]),
                (2027, &[("units", 6000.0), ("buyPrice", 36920.0), ("sellPrice", 51750.0)]),
                (2028, &[("units", 9000.0), ("buyPrice", 40600.0), ("sellPrice", 59513.0)]),
            ]),
            profit_and_loss: pnl(&[
                (2026, [143_595_000, 118_440_000, 25_155_000, 14_151_352, 11_003_648]),
                (2027, [298_530_000, 221_520_000, 77_010_000, 21_224_257, 55_785_743]),
                (2028, [516_853_125, 365_400_000, 151_453_125, 28_734_657, 122_718_468]),
            ]),
        },
        distributor_rental: FinancialRecord {
            investments: investments(&[
                ("Batteries & Cabinets", 95_000_000.0),
                ("Swap Infrastructure & Software", 15_000_000.0),
            ]),
            revenue_model: "Battery charging rental for couriers".into(),
            yearly_operational_metrics: metrics(&[
                (2026, &[("batteryCount", 2520.0), ("cabinetCount", 140.0), ("monthlyRental", 3600.0)]),
                (2027, &[("batteryCount", 10080.0), ("cabinetCount", 560.0), ("monthlyRental", 3800.0)]),
                (2028, &[("batteryCount", 22680.0), ("cabinetCount", 1260.0), ("monthlyRental", 4000.0)]),
            ]),
            profit_and_loss: pnl(&[
                (2026, [108_889_200, 19_963_020, 88_926_180, 56_831_112, 56_431_042]),
                (2027, [469_476_000, 74_844_000, 394_632_000, 172_439_965, 311_575_485]),
                (2028, [1_119_787_200, 159_390_000, 960_397_200, 377_590_438, 804_928_956]),
            ]),
        },
    }
}
