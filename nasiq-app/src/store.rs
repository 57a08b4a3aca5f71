//! Profile-scoped persistence. The catalog, settings and fixed-cost table
//! live as JSON documents under `<data-dir>/<profile>/`; workflows only see
//! the `CatalogStore` trait.

use anyhow::{Context, Result};
use chrono::Utc;
use nasiq_core::error::NasiqError;
use nasiq_schemas::category::Category;
use nasiq_schemas::product::ProductRecord;
use nasiq_schemas::settings::{FixedCost, Settings};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const PRODUCTS_FILE: &str = "products.json";
const SETTINGS_FILE: &str = "settings.json";
const FIXED_COSTS_FILE: &str = "fixed_costs.json";

/// Data access used by every workflow. Row ownership is the profile the
/// store was opened for; there is no cross-profile access.
pub trait CatalogStore {
    /// All products, newest first.
    fn products(&self) -> Result<Vec<ProductRecord>>;
    fn product(&self, id: &str) -> Result<ProductRecord>;
    fn insert_product(&self, record: ProductRecord) -> Result<ProductRecord>;
    fn update_product(&self, record: ProductRecord) -> Result<ProductRecord>;
    fn delete_product(&self, id: &str) -> Result<()>;

    /// Current settings; first access materializes the defaults.
    fn settings(&self) -> Result<Settings>;
    fn save_settings(&self, settings: Settings) -> Result<Settings>;

    /// The fixed-cost table, oldest first.
    fn fixed_costs(&self) -> Result<Vec<FixedCost>>;
    fn add_fixed_cost(&self, name: &str, amount: f64) -> Result<FixedCost>;
    fn update_fixed_cost(&self, id: &str, name: Option<&str>, amount: Option<f64>)
        -> Result<FixedCost>;
    fn delete_fixed_cost(&self, id: &str) -> Result<()>;

    fn search_products(&self, query: &str) -> Result<Vec<ProductRecord>> {
        Ok(self
            .products()?
            .into_iter()
            .filter(|record| record.matches_query(query))
            .collect())
    }

    fn products_in_category(&self, category: Category) -> Result<Vec<ProductRecord>> {
        Ok(self
            .products()?
            .into_iter()
            .filter(|record| record.input.target_category == category)
            .collect())
    }
}

pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn open(data_dir: &Path, profile: &str) -> Result<Self> {
        let root = data_dir.join(profile);
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create profile directory: {:?}", root))?;
        Ok(JsonStore { root })
    }

    fn read_document<T>(&self, file: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
        Ok(Some(value))
    }

    fn write_document<T>(&self, file: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let path = self.root.join(file);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))
    }

    fn read_products(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.read_document(PRODUCTS_FILE)?.unwrap_or_default())
    }

    fn read_fixed_costs(&self) -> Result<Vec<FixedCost>> {
        Ok(self.read_document(FIXED_COSTS_FILE)?.unwrap_or_default())
    }
}

pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

impl CatalogStore for JsonStore {
    fn products(&self) -> Result<Vec<ProductRecord>> {
        let mut products = self.read_products()?;
        // RFC 3339 sorts lexicographically
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    fn product(&self, id: &str) -> Result<ProductRecord> {
        self.read_products()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| NasiqError::ProductNotFound(id.to_string()).into())
    }

    fn insert_product(&self, record: ProductRecord) -> Result<ProductRecord> {
        let mut products = self.read_products()?;
        products.push(record.clone());
        self.write_document(PRODUCTS_FILE, &products)?;
        Ok(record)
    }

    fn update_product(&self, record: ProductRecord) -> Result<ProductRecord> {
        let mut products = self.read_products()?;
        let slot = products
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or_else(|| NasiqError::ProductNotFound(record.id.clone()))?;
        *slot = record.clone();
        self.write_document(PRODUCTS_FILE, &products)?;
        Ok(record)
    }

    fn delete_product(&self, id: &str) -> Result<()> {
        let mut products = self.read_products()?;
        let before = products.len();
        products.retain(|record| record.id != id);
        if products.len() == before {
            return Err(NasiqError::ProductNotFound(id.to_string()).into());
        }
        self.write_document(PRODUCTS_FILE, &products)
    }

    fn settings(&self) -> Result<Settings> {
        match self.read_document::<Settings>(SETTINGS_FILE)? {
            Some(settings) => Ok(settings),
            None => {
                let defaults = Settings::default();
                self.write_document(SETTINGS_FILE, &defaults)?;
                Ok(defaults)
            }
        }
    }

    fn save_settings(&self, settings: Settings) -> Result<Settings> {
        self.write_document(SETTINGS_FILE, &settings)?;
        Ok(settings)
    }

    fn fixed_costs(&self) -> Result<Vec<FixedCost>> {
        let mut costs = self.read_fixed_costs()?;
        costs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(costs)
    }

    fn add_fixed_cost(&self, name: &str, amount: f64) -> Result<FixedCost> {
        let now = timestamp();
        let cost = FixedCost {
            id: new_record_id(),
            name: name.to_string(),
            amount,
            created_at: now.clone(),
            updated_at: now,
        };
        let mut costs = self.read_fixed_costs()?;
        costs.push(cost.clone());
        self.write_document(FIXED_COSTS_FILE, &costs)?;
        Ok(cost)
    }

    fn update_fixed_cost(
        &self,
        id: &str,
        name: Option<&str>,
        amount: Option<f64>,
    ) -> Result<FixedCost> {
        let mut costs = self.read_fixed_costs()?;
        let cost = costs
            .iter_mut()
            .find(|cost| cost.id == id)
            .ok_or_else(|| NasiqError::FixedCostNotFound(id.to_string()))?;
        if let Some(name) = name {
            cost.name = name.to_string();
        }
        if let Some(amount) = amount {
            cost.amount = amount;
        }
        cost.updated_at = timestamp();
        let updated = cost.clone();
        self.write_document(FIXED_COSTS_FILE, &costs)?;
        Ok(updated)
    }

    fn delete_fixed_cost(&self, id: &str) -> Result<()> {
        let mut costs = self.read_fixed_costs()?;
        let before = costs.len();
        costs.retain(|cost| cost.id != id);
        if costs.len() == before {
            return Err(NasiqError::FixedCostNotFound(id.to_string()).into());
        }
        self.write_document(FIXED_COSTS_FILE, &costs)
    }
}
