use crate::category::Category;
use serde::{Deserialize, Serialize};

/// One computation's worth of caller-provided cost data. Normalization of
/// malformed numeric text happens before this struct is built; the pricing
/// engine validates but never repairs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    pub name: String,
    pub code: Option<String>,
    pub target_category: Category,
    pub main_fabric_cost: f64,
    pub has_secondary_fabric: bool,
    pub secondary_fabric_cost: f64,
    pub has_scarf: bool,
    pub main_scarf_cost: f64,
    pub has_secondary_scarf: bool,
    pub secondary_scarf_cost: f64,
    pub sewing_cost: f64,
    pub packaging_cost: f64,
    pub shipping_cost: f64,
    pub additional_expenses_rate: f64,
    pub profit_rate: f64,
    pub fixed_cost_per_unit: f64,
}

/// Derived pricing figures. Only ever constructed by the pricing engine, so
/// every instance agrees with its `CostInput` and the band table in force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    pub materials_cost: f64,
    pub production_cost: f64,
    pub additional_expenses: f64,
    pub total_cost: f64,
    pub profit_amount: f64,
    pub final_price: f64,
    pub calculated_category: Category,
    pub category_matches: bool,
}

/// A stored catalog entry: the inputs as entered plus the pricing computed
/// at last save. Serializes flat, the stored-row shape the app has always
/// used, so exported rows round-trip through the import feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub input: CostInput,
    #[serde(flatten)]
    pub priced: PricedProduct,
}

impl ProductRecord {
    /// Case-insensitive match on name or code, the catalog search contract.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.input.name.to_lowercase().contains(&query)
            || self
                .input
                .code
                .as_deref()
                .map_or(false, |code| code.to_lowercase().contains(&query))
    }
}
