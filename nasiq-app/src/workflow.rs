//! Command handlers wiring the store, the pricing engine, reports and
//! charts together. Each handler prints its result; all state lives in the
//! injected `CatalogStore`.

use crate::plotting;
use crate::store::{self, CatalogStore};
use anyhow::{Context, Result};
use nasiq_core::allocation;
use nasiq_core::categories::CategoryBands;
use nasiq_core::error::ValidationError;
use nasiq_core::pricing;
use nasiq_core::report;
use nasiq_core::stats;
use nasiq_schemas::category::Category;
use nasiq_schemas::file_formats::{ExportFile, ImportBundle, ImportProduct, LegacyData};
use nasiq_schemas::product::{CostInput, PricedProduct, ProductRecord};
use std::fs;

fn new_record(input: CostInput, priced: PricedProduct) -> ProductRecord {
    let now = store::timestamp();
    ProductRecord {
        id: store::new_record_id(),
        created_at: now.clone(),
        updated_at: now,
        input,
        priced,
    }
}

fn describe_validation(err: ValidationError) -> anyhow::Error {
    anyhow::anyhow!("{} [{}]", err, err.reason_code())
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub fn add_product(
    store: &dyn CatalogStore,
    bands: &CategoryBands,
    input: CostInput,
) -> Result<()> {
    let priced = pricing::compute(&input, bands).map_err(describe_validation)?;
    let record = store.insert_product(new_record(input, priced))?;
    println!("Saved '{}' ({})", record.input.name, record.id);
    print_pricing(&record.input, &record.priced);
    print_advice(&record.priced, record.input.target_category);
    Ok(())
}

pub fn update_product(
    store: &dyn CatalogStore,
    bands: &CategoryBands,
    id: &str,
    input: CostInput,
) -> Result<()> {
    let existing = store.product(id)?;
    let priced = pricing::compute(&input, bands).map_err(describe_validation)?;
    let record = store.update_product(ProductRecord {
        id: existing.id,
        created_at: existing.created_at,
        updated_at: store::timestamp(),
        input,
        priced,
    })?;
    println!("Updated '{}' ({})", record.input.name, record.id);
    print_pricing(&record.input, &record.priced);
    print_advice(&record.priced, record.input.target_category);
    Ok(())
}

/// The live "calculate" path: price the record and show the result without
/// touching the catalog.
pub fn price_preview(bands: &CategoryBands, input: CostInput) -> Result<()> {
    let priced = pricing::compute(&input, bands).map_err(describe_validation)?;
    print_pricing(&input, &priced);
    print_advice(&priced, input.target_category);
    Ok(())
}

pub fn delete_product(store: &dyn CatalogStore, id: &str) -> Result<()> {
    store.delete_product(id)?;
    println!("Deleted product {}", id);
    Ok(())
}

pub fn list_products(store: &dyn CatalogStore) -> Result<()> {
    print_product_cards(&store.products()?);
    Ok(())
}

pub fn show_product(store: &dyn CatalogStore, id: &str) -> Result<()> {
    let record = store.product(id)?;
    println!("{} ({})", record.input.name, record.id);
    if let Some(code) = &record.input.code {
        println!("  Code:                {}", code);
    }
    println!("  Target category:     {}", record.input.target_category);
    println!("  Main fabric:         {:>10.2} SAR", record.input.main_fabric_cost);
    if record.input.has_secondary_fabric {
        println!("  Secondary fabric:    {:>10.2} SAR", record.input.secondary_fabric_cost);
    }
    if record.input.has_scarf {
        println!("  Scarf fabric:        {:>10.2} SAR", record.input.main_scarf_cost);
        if record.input.has_secondary_scarf {
            println!("  Secondary scarf:     {:>10.2} SAR", record.input.secondary_scarf_cost);
        }
    }
    println!("  Sewing:              {:>10.2} SAR", record.input.sewing_cost);
    println!("  Packaging:           {:>10.2} SAR", record.input.packaging_cost);
    println!("  Shipping:            {:>10.2} SAR", record.input.shipping_cost);
    println!("  Additional expenses: {:>9.1}%", record.input.additional_expenses_rate);
    println!("  Profit rate:         {:>9.1}%", record.input.profit_rate);
    print_pricing(&record.input, &record.priced);
    print_advice(&record.priced, record.input.target_category);
    println!("  Created: {}  Updated: {}", record.created_at, record.updated_at);
    Ok(())
}

pub fn search_products(store: &dyn CatalogStore, query: &str) -> Result<()> {
    let matches = store.search_products(query)?;
    if matches.is_empty() {
        println!("No products match '{}'.", query);
        return Ok(());
    }
    print_product_cards(&matches);
    Ok(())
}

pub fn filter_products(store: &dyn CatalogStore, category: Category) -> Result<()> {
    let matches = store.products_in_category(category)?;
    if matches.is_empty() {
        println!("No products target the {} tier.", category);
        return Ok(());
    }
    print_product_cards(&matches);
    Ok(())
}

fn print_product_cards(products: &[ProductRecord]) {
    if products.is_empty() {
        println!("No products in the catalog yet.");
        return;
    }
    for record in products {
        let code = record.input.code.as_deref().unwrap_or("-");
        let marker = if record.priced.category_matches { "" } else { "  (off-target)" };
        println!(
            "{}  {:<24} [{:<8}] {:<8} final {:>9.2} SAR  cost {:>9.2} SAR{}",
            record.id,
            record.input.name,
            code,
            record.priced.calculated_category.to_string(),
            record.priced.final_price,
            record.priced.total_cost,
            marker,
        );
    }
}

fn print_pricing(input: &CostInput, priced: &PricedProduct) {
    println!("  ----------------------------------------");
    println!("  Materials cost:      {:>10.2} SAR", priced.materials_cost);
    println!("  Production cost:     {:>10.2} SAR", priced.production_cost);
    println!("  Additional expenses: {:>10.2} SAR", priced.additional_expenses);
    println!("  Fixed cost per unit: {:>10.2} SAR", input.fixed_cost_per_unit);
    println!("  Total cost:          {:>10.2} SAR", priced.total_cost);
    println!("  Profit amount:       {:>10.2} SAR", priced.profit_amount);
    println!("  Final price:         {:>10.2} SAR", priced.final_price);
    println!("  Calculated category: {}", priced.calculated_category);
}

fn print_advice(priced: &PricedProduct, target: Category) {
    if priced.category_matches {
        println!("  The calculated category matches the target category.");
        return;
    }
    println!(
        "  Warning: calculated category ({}) does not match the target category ({}).",
        priced.calculated_category, target
    );
    for line in pricing::recommendation(priced.calculated_category, target) {
        println!("    - {}", line);
    }
}

// ---------------------------------------------------------------------------
// Settings and fixed costs
// ---------------------------------------------------------------------------

pub fn show_settings(store: &dyn CatalogStore) -> Result<()> {
    let settings = store.settings()?;
    println!("Project name:        {}", settings.project_name);
    println!("Target category:     {}", settings.target_category);
    println!("Monthly products:    {}", settings.monthly_products);
    println!("Default profit rate: {:.1}%", settings.default_profit_rate);
    show_fixed_costs(store)
}

pub fn update_settings(
    store: &dyn CatalogStore,
    project_name: Option<String>,
    target_category: Option<Category>,
    monthly_products: Option<u32>,
    default_profit_rate: Option<f64>,
) -> Result<()> {
    let mut settings = store.settings()?;
    if let Some(name) = project_name {
        settings.project_name = name;
    }
    if let Some(category) = target_category {
        settings.target_category = category;
    }
    if let Some(volume) = monthly_products {
        settings.monthly_products = volume;
    }
    if let Some(rate) = default_profit_rate {
        settings.default_profit_rate = rate;
    }
    store.save_settings(settings)?;
    println!("Settings saved.");
    show_settings(store)
}

pub fn show_fixed_costs(store: &dyn CatalogStore) -> Result<()> {
    let settings = store.settings()?;
    let costs = store.fixed_costs()?;
    if costs.is_empty() {
        println!("No fixed costs recorded.");
        return Ok(());
    }
    println!(
        "Fixed costs (monthly, allocated over {} planned units):",
        settings.monthly_products
    );
    for cost in &costs {
        println!(
            "  {}  {:<20} {:>10.2} SAR/month  {:>8.2} SAR/unit",
            cost.id,
            cost.name,
            cost.amount,
            allocation::per_unit_share(cost.amount, settings.monthly_products),
        );
    }
    println!(
        "  Total: {:.2} SAR/month, {:.2} SAR/unit",
        allocation::monthly_total(&costs),
        allocation::fixed_cost_per_unit(&costs, settings.monthly_products),
    );
    Ok(())
}

pub fn add_fixed_cost(store: &dyn CatalogStore, name: &str, amount: f64) -> Result<()> {
    let cost = store.add_fixed_cost(name, amount)?;
    println!("Added fixed cost '{}' ({})", cost.name, cost.id);
    show_fixed_costs(store)
}

pub fn update_fixed_cost(
    store: &dyn CatalogStore,
    id: &str,
    name: Option<&str>,
    amount: Option<f64>,
) -> Result<()> {
    let cost = store.update_fixed_cost(id, name, amount)?;
    println!("Updated fixed cost '{}' ({})", cost.name, cost.id);
    show_fixed_costs(store)
}

pub fn delete_fixed_cost(store: &dyn CatalogStore, id: &str) -> Result<()> {
    store.delete_fixed_cost(id)?;
    println!("Deleted fixed cost {}", id);
    show_fixed_costs(store)
}

// ---------------------------------------------------------------------------
// Export / import / migration
// ---------------------------------------------------------------------------

pub fn export_json(store: &dyn CatalogStore, path: &str) -> Result<()> {
    let bundle = ExportFile::new(store.settings()?, store.fixed_costs()?, store.products()?);
    if bundle.products.is_empty() {
        println!("Note: the catalog is empty; exporting settings and fixed costs only.");
    }
    let content = serde_json::to_string_pretty(&bundle)?;
    fs::write(path, content).with_context(|| format!("Failed to write '{}'", path))?;
    println!(
        "Exported {} product(s), {} fixed cost(s) to '{}'.",
        bundle.products.len(),
        bundle.fixed_costs.len(),
        path
    );
    Ok(())
}

pub fn export_csv(store: &dyn CatalogStore, path: &str) -> Result<()> {
    let products = store.products()?;
    report::write_catalog_csv(path, &products)?;
    println!("Wrote catalog report for {} product(s) to '{}'.", products.len(), path);
    Ok(())
}

pub fn import(store: &dyn CatalogStore, bands: &CategoryBands, path: &str) -> Result<()> {
    println!("--- [Import] Reading '{}' ---", path);
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let bundle = parse_import(&content)?;

    if let Some(settings) = bundle.settings {
        store.save_settings(settings)?;
        println!("Imported settings.");
    }
    for cost in &bundle.fixed_costs {
        // Unnamed and zero-amount rows never reach the table.
        if !cost.name.is_empty() && cost.amount > 0.0 {
            store.add_fixed_cost(&cost.name, cost.amount)?;
        }
    }

    let settings = store.settings()?;
    let fallback_allocation =
        allocation::fixed_cost_per_unit(&store.fixed_costs()?, settings.monthly_products);

    let mut imported = 0usize;
    let mut failures: Vec<(String, ValidationError)> = Vec::new();
    for (index, row) in bundle.products.into_iter().enumerate() {
        let label = if row.name.is_empty() {
            format!("record #{}", index + 1)
        } else {
            row.name.clone()
        };
        let input = row.into_cost_input(settings.target_category, fallback_allocation);
        match pricing::compute(&input, bands) {
            Ok(priced) => {
                store.insert_product(new_record(input, priced))?;
                imported += 1;
            }
            Err(err) => failures.push((label, err)),
        }
    }

    println!(
        "--- [Import] Done: {} imported, {} skipped ---",
        imported,
        failures.len()
    );
    for (label, err) in &failures {
        println!("  skipped '{}': {} [{}]", label, err, err.reason_code());
    }
    Ok(())
}

fn parse_import(content: &str) -> Result<ImportBundle> {
    if let Ok(bundle) = serde_json::from_str::<ImportBundle>(content) {
        return Ok(bundle);
    }
    let products: Vec<ImportProduct> = serde_json::from_str(content)
        .context("File is neither a dataset bundle nor a JSON product array")?;
    Ok(ImportBundle {
        products,
        ..ImportBundle::default()
    })
}

pub fn migrate(
    store: &dyn CatalogStore,
    bands: &CategoryBands,
    path: &str,
    purge_source: bool,
) -> Result<()> {
    println!("--- [Migrate] Reading legacy data from '{}' ---", path);
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let data: LegacyData = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a legacy data dump", path))?;

    if let Some(legacy_settings) = data.settings {
        for cost in &legacy_settings.fixed_costs {
            if !cost.name.is_empty() {
                store.add_fixed_cost(&cost.name, cost.monthly_cost)?;
            }
        }
        store.save_settings(legacy_settings.into_settings())?;
        println!("Migrated settings and fixed costs.");
    }

    let settings = store.settings()?;
    let fixed_cost_per_unit =
        allocation::fixed_cost_per_unit(&store.fixed_costs()?, settings.monthly_products);

    let mut migrated = 0usize;
    let mut failures: Vec<(String, ValidationError)> = Vec::new();
    for (index, legacy) in data.products.into_iter().enumerate() {
        let input = legacy.into_cost_input(fixed_cost_per_unit);
        let label = if input.name == "Unnamed product" {
            format!("record #{}", index + 1)
        } else {
            input.name.clone()
        };
        match pricing::compute(&input, bands) {
            Ok(priced) => {
                store.insert_product(new_record(input, priced))?;
                migrated += 1;
            }
            Err(err) => failures.push((label, err)),
        }
    }

    println!(
        "--- [Migrate] Done: {} migrated, {} skipped ---",
        migrated,
        failures.len()
    );
    for (label, err) in &failures {
        println!("  skipped '{}': {} [{}]", label, err, err.reason_code());
    }

    if purge_source {
        fs::remove_file(path).with_context(|| format!("Failed to remove '{}'", path))?;
        println!("Removed legacy file '{}'.", path);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

pub fn show_stats(store: &dyn CatalogStore, chart: Option<&str>) -> Result<()> {
    let products = store.products()?;
    let summary = stats::summarize(&products);

    println!("--- [Catalog Statistics] ---");
    println!("Total products:        {}", summary.total_products);
    for (category, count) in &summary.category_counts {
        println!("  {:<10} {}", category.to_string(), count);
    }
    println!("Average price:         {:.2} SAR", summary.average_price);
    println!("Total expected profit: {:.2} SAR", summary.total_expected_profit);

    if let Some(path) = chart {
        plotting::plot_category_distribution(path, &summary)?;
        println!("Chart written to '{}'.", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;

    fn valid_input(name: &str) -> CostInput {
        CostInput {
            name: name.to_string(),
            code: None,
            target_category: Category::Economy,
            main_fabric_cost: 50.0,
            has_secondary_fabric: false,
            secondary_fabric_cost: 0.0,
            has_scarf: false,
            main_scarf_cost: 0.0,
            has_secondary_scarf: false,
            secondary_scarf_cost: 0.0,
            sewing_cost: 20.0,
            packaging_cost: 5.0,
            shipping_cost: 5.0,
            additional_expenses_rate: 10.0,
            profit_rate: 50.0,
            fixed_cost_per_unit: 0.0,
        }
    }

    #[test]
    fn export_then_import_round_trips_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let bands = CategoryBands::standard();

        let source = JsonStore::open(dir.path(), "guest").unwrap();
        add_product(&source, &bands, valid_input("Abaya one")).unwrap();
        add_product(&source, &bands, valid_input("Abaya two")).unwrap();
        source.add_fixed_cost("rent", 1200.0).unwrap();

        let bundle_path = dir.path().join("bundle.json");
        export_json(&source, bundle_path.to_str().unwrap()).unwrap();

        let target = JsonStore::open(dir.path(), "account").unwrap();
        import(&target, &bands, bundle_path.to_str().unwrap()).unwrap();

        let products = target.products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(target.fixed_costs().unwrap().len(), 1);
        // Recomputed on import with the profile's own allocation in force.
        assert!(products.iter().all(|p| p.priced.final_price > 0.0));
    }

    #[test]
    fn import_reports_invalid_records_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let bands = CategoryBands::standard();
        let store = JsonStore::open(dir.path(), "guest").unwrap();

        let feed = r#"[
            {"name": "Good", "target_category": "economy", "main_fabric_cost": 50,
             "sewing_cost": 20, "packaging_cost": 5, "shipping_cost": 5,
             "additional_expenses_rate": 10, "profit_rate": 50},
            {"name": "Bad", "target_category": "economy", "main_fabric_cost": 0,
             "sewing_cost": 20, "profit_rate": 50}
        ]"#;
        let feed_path = dir.path().join("feed.json");
        fs::write(&feed_path, feed).unwrap();

        import(&store, &bands, feed_path.to_str().unwrap()).unwrap();

        let products = store.products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].input.name, "Good");
    }

    #[test]
    fn migration_applies_legacy_defaults_and_allocation() {
        let dir = tempfile::tempdir().unwrap();
        let bands = CategoryBands::standard();
        let store = JsonStore::open(dir.path(), "guest").unwrap();

        let dump = r#"{
            "settings": {
                "projectName": "Atelier",
                "targetCategory": "راقية",
                "monthlyProducts": 50,
                "defaultProfitRate": 40,
                "fixedCosts": [{"name": "rent", "monthlyCost": 500}]
            },
            "products": [
                {"mainFabricCost": 80, "sewingCost": 25}
            ]
        }"#;
        let dump_path = dir.path().join("legacy.json");
        fs::write(&dump_path, dump).unwrap();

        migrate(&store, &bands, dump_path.to_str().unwrap(), false).unwrap();

        let settings = store.settings().unwrap();
        assert_eq!(settings.project_name, "Atelier");
        assert_eq!(settings.target_category, Category::Premium);
        assert_eq!(settings.monthly_products, 50);

        let products = store.products().unwrap();
        assert_eq!(products.len(), 1);
        let record = &products[0];
        assert_eq!(record.input.name, "Unnamed product");
        assert_eq!(record.input.additional_expenses_rate, 10.0);
        assert_eq!(record.input.profit_rate, 50.0);
        // rent 500 over 50 units
        assert!((record.input.fixed_cost_per_unit - 10.0).abs() < 1e-9);
        assert!(dump_path.exists());
    }

    #[test]
    fn migration_purges_the_source_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let bands = CategoryBands::standard();
        let store = JsonStore::open(dir.path(), "guest").unwrap();

        let dump_path = dir.path().join("legacy.json");
        fs::write(&dump_path, r#"{"products": []}"#).unwrap();

        migrate(&store, &bands, dump_path.to_str().unwrap(), true).unwrap();
        assert!(!dump_path.exists());
    }
}
