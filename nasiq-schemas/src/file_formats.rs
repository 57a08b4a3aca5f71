//! File wrappers for the JSON export bundle, bulk import feeds, and the
//! legacy local-app dump accepted by the migration workflow.

use crate::category::Category;
use crate::product::{CostInput, ProductRecord};
use crate::settings::{FixedCost, Settings};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0";

/// The full-dataset bundle written by `export` and accepted by `import`.
#[derive(Debug, Serialize)]
pub struct ExportFile {
    pub schema_version: String,
    pub settings: Settings,
    pub fixed_costs: Vec<FixedCost>,
    pub products: Vec<ProductRecord>,
}

impl ExportFile {
    pub fn new(settings: Settings, fixed_costs: Vec<FixedCost>, products: Vec<ProductRecord>) -> Self {
        ExportFile {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            settings,
            fixed_costs,
            products,
        }
    }
}

/// Import-side counterpart of `ExportFile`. Every section is optional and
/// every numeric field is coerced leniently, so hand-edited bundles reach
/// the validation step instead of failing at parse time.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportBundle {
    pub schema_version: String,
    pub settings: Option<Settings>,
    pub fixed_costs: Vec<ImportFixedCost>,
    pub products: Vec<ImportProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportFixedCost {
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub amount: f64,
}

/// One raw product row from an import feed. Matches the flat stored-record
/// shape; derived pricing fields in the feed are ignored and recomputed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportProduct {
    pub name: String,
    pub code: Option<String>,
    pub target_category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub main_fabric_cost: f64,
    pub has_secondary_fabric: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub secondary_fabric_cost: f64,
    pub has_scarf: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub main_scarf_cost: f64,
    pub has_secondary_scarf: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub secondary_scarf_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub sewing_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub packaging_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub shipping_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub additional_expenses_rate: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub profit_rate: f64,
    #[serde(deserialize_with = "lenient_optional_number")]
    pub fixed_cost_per_unit: Option<f64>,
}

impl ImportProduct {
    /// Shapes the raw row into engine input. `fallback_fixed_cost` is the
    /// profile's current per-unit allocation, used when the feed carries
    /// none of its own.
    pub fn into_cost_input(self, default_category: Category, fallback_fixed_cost: f64) -> CostInput {
        CostInput {
            name: self.name,
            code: self.code.filter(|code| !code.is_empty()),
            target_category: Category::from_label(&self.target_category)
                .unwrap_or(default_category),
            main_fabric_cost: self.main_fabric_cost,
            has_secondary_fabric: self.has_secondary_fabric,
            secondary_fabric_cost: self.secondary_fabric_cost,
            has_scarf: self.has_scarf,
            main_scarf_cost: self.main_scarf_cost,
            has_secondary_scarf: self.has_scarf && self.has_secondary_scarf,
            secondary_scarf_cost: self.secondary_scarf_cost,
            sewing_cost: self.sewing_cost,
            packaging_cost: self.packaging_cost,
            shipping_cost: self.shipping_cost,
            additional_expenses_rate: self.additional_expenses_rate,
            profit_rate: self.profit_rate,
            fixed_cost_per_unit: self.fixed_cost_per_unit.unwrap_or(fallback_fixed_cost),
        }
    }
}

/// The legacy local-only app persisted camelCase records. `migrate` reads
/// this dump shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LegacyData {
    pub settings: Option<LegacySettings>,
    pub products: Vec<LegacyProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacySettings {
    pub project_name: String,
    pub target_category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_products: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub default_profit_rate: f64,
    pub fixed_costs: Vec<LegacyFixedCost>,
}

impl LegacySettings {
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            project_name: if self.project_name.is_empty() {
                defaults.project_name
            } else {
                self.project_name
            },
            target_category: Category::from_label(&self.target_category)
                .unwrap_or(Category::Premium),
            monthly_products: if self.monthly_products > 0.0 {
                self.monthly_products as u32
            } else {
                defaults.monthly_products
            },
            default_profit_rate: if self.default_profit_rate > 0.0 {
                self.default_profit_rate
            } else {
                defaults.default_profit_rate
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyFixedCost {
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_cost: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyProduct {
    pub name: String,
    pub code: String,
    pub target_category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub main_fabric_cost: f64,
    pub has_secondary_fabric: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub secondary_fabric_cost: f64,
    pub has_scarf: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub main_scarf_cost: f64,
    pub has_secondary_scarf: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub secondary_scarf_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub sewing_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub packaging_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub shipping_cost: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub additional_expenses_rate: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub profit_rate: f64,
}

impl LegacyProduct {
    /// Fills the gaps the old app tolerated: blank names, zero rates and
    /// unknown categories all fall back to its hardcoded defaults.
    pub fn into_cost_input(self, fixed_cost_per_unit: f64) -> CostInput {
        CostInput {
            name: if self.name.is_empty() {
                "Unnamed product".to_string()
            } else {
                self.name
            },
            code: if self.code.is_empty() { None } else { Some(self.code) },
            target_category: Category::from_label(&self.target_category)
                .unwrap_or(Category::Premium),
            main_fabric_cost: self.main_fabric_cost,
            has_secondary_fabric: self.has_secondary_fabric,
            secondary_fabric_cost: self.secondary_fabric_cost,
            has_scarf: self.has_scarf,
            main_scarf_cost: self.main_scarf_cost,
            has_secondary_scarf: self.has_scarf && self.has_secondary_scarf,
            secondary_scarf_cost: self.secondary_scarf_cost,
            sewing_cost: self.sewing_cost,
            packaging_cost: self.packaging_cost,
            shipping_cost: self.shipping_cost,
            additional_expenses_rate: if self.additional_expenses_rate > 0.0 {
                self.additional_expenses_rate
            } else {
                10.0
            },
            profit_rate: if self.profit_rate > 0.0 { self.profit_rate } else { 50.0 },
            fixed_cost_per_unit,
        }
    }
}

/// Coerces a JSON number, numeric string, or anything else to `f64`, with
/// malformed values becoming 0. This is the caller-side normalization step;
/// the engine itself never repairs input.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_number(Value::deserialize(deserializer)?))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(coerce_number(value)))
}

fn coerce_number(value: Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
