use crate::error::NasiqError;
use nasiq_schemas::product::ProductRecord;
use serde::Serialize;

/// One catalog row as written to the CSV report. Currency columns are
/// formatted to two decimals here, at the presentation boundary.
#[derive(Debug, Serialize)]
struct CatalogRow {
    name: String,
    code: String,
    target_category: String,
    calculated_category: String,
    category_matches: bool,
    materials_cost: String,
    production_cost: String,
    additional_expenses: String,
    fixed_cost_per_unit: String,
    total_cost: String,
    profit_amount: String,
    final_price: String,
}

pub fn write_catalog_csv(path: &str, products: &[ProductRecord]) -> Result<(), NasiqError> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| NasiqError::CsvError(path.to_string(), e))?;

    for record in products {
        let row = CatalogRow {
            name: record.input.name.clone(),
            code: record.input.code.clone().unwrap_or_default(),
            target_category: record.input.target_category.to_string(),
            calculated_category: record.priced.calculated_category.to_string(),
            category_matches: record.priced.category_matches,
            materials_cost: format!("{:.2}", record.priced.materials_cost),
            production_cost: format!("{:.2}", record.priced.production_cost),
            additional_expenses: format!("{:.2}", record.priced.additional_expenses),
            fixed_cost_per_unit: format!("{:.2}", record.input.fixed_cost_per_unit),
            total_cost: format!("{:.2}", record.priced.total_cost),
            profit_amount: format!("{:.2}", record.priced.profit_amount),
            final_price: format!("{:.2}", record.priced.final_price),
        };
        writer
            .serialize(row)
            .map_err(|e| NasiqError::CsvError(path.to_string(), e))?;
    }

    writer
        .flush()
        .map_err(|e| NasiqError::FileIO(path.to_string(), e))?;
    Ok(())
}
