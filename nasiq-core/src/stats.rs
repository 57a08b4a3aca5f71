use nasiq_schemas::category::Category;
use nasiq_schemas::product::ProductRecord;
use std::collections::BTreeMap;

/// Dashboard summary of the priced catalog.
#[derive(Debug, Default, Clone)]
pub struct CatalogStatistics {
    pub total_products: usize,
    pub category_counts: BTreeMap<Category, usize>,
    pub average_price: f64,
    pub total_expected_profit: f64,
}

pub fn summarize(products: &[ProductRecord]) -> CatalogStatistics {
    if products.is_empty() {
        return CatalogStatistics::default();
    }

    let mut stats = CatalogStatistics {
        total_products: products.len(),
        ..CatalogStatistics::default()
    };

    let mut total_price = 0.0;
    for record in products {
        *stats
            .category_counts
            .entry(record.priced.calculated_category)
            .or_insert(0) += 1;
        total_price += record.priced.final_price;
        stats.total_expected_profit += record.priced.final_price - record.priced.total_cost;
    }
    stats.average_price = total_price / products.len() as f64;

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasiq_schemas::product::{CostInput, PricedProduct};

    fn record(final_price: f64, total_cost: f64, category: Category) -> ProductRecord {
        ProductRecord {
            id: "p".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
            input: CostInput {
                name: "x".to_string(),
                code: None,
                target_category: category,
                main_fabric_cost: 1.0,
                has_secondary_fabric: false,
                secondary_fabric_cost: 0.0,
                has_scarf: false,
                main_scarf_cost: 0.0,
                has_secondary_scarf: false,
                secondary_scarf_cost: 0.0,
                sewing_cost: 1.0,
                packaging_cost: 0.0,
                shipping_cost: 0.0,
                additional_expenses_rate: 0.0,
                profit_rate: 50.0,
                fixed_cost_per_unit: 0.0,
            },
            priced: PricedProduct {
                materials_cost: 0.0,
                production_cost: 0.0,
                additional_expenses: 0.0,
                total_cost,
                profit_amount: final_price - total_cost,
                final_price,
                calculated_category: category,
                category_matches: true,
            },
        }
    }

    #[test]
    fn empty_catalog_summarizes_to_zeroes() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_price, 0.0);
        assert!(stats.category_counts.is_empty());
    }

    #[test]
    fn counts_prices_and_profit_aggregate() {
        let records = vec![
            record(150.0, 100.0, Category::Economy),
            record(250.0, 180.0, Category::Daily),
            record(350.0, 240.0, Category::Premium),
            record(250.0, 170.0, Category::Daily),
        ];
        let stats = summarize(&records);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.category_counts[&Category::Daily], 2);
        assert_eq!(stats.category_counts[&Category::Economy], 1);
        assert!((stats.average_price - 250.0).abs() < 1e-9);
        assert!((stats.total_expected_profit - 310.0).abs() < 1e-9);
    }
}
