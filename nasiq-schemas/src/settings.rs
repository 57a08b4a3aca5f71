use crate::category::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub project_name: String,
    pub target_category: Category,
    pub monthly_products: u32,
    pub default_profit_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            project_name: "Nasiq".to_string(),
            target_category: Category::Daily,
            monthly_products: 100,
            default_profit_rate: 50.0,
        }
    }
}

/// A named monthly overhead entry. The per-unit allocation is derived, not
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCost {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub created_at: String,
    pub updated_at: String,
}
