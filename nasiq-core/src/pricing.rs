//! The pricing engine: validation, cost/price computation, and tier advice.
//!
//! Pure functions of their arguments. Rounding to two decimals is a
//! presentation concern and never happens mid-calculation.

use crate::categories::CategoryBands;
use crate::error::ValidationError;
use nasiq_schemas::category::Category;
use nasiq_schemas::product::{CostInput, PricedProduct};

/// Checks every pricing precondition, in form order. The engine never
/// substitutes defaults for invalid input; normalization is the caller's
/// step and happens before this point.
pub fn validate(input: &CostInput) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if input.main_fabric_cost <= 0.0 {
        return Err(ValidationError::MainFabricCostRequired);
    }
    if input.has_secondary_fabric && input.secondary_fabric_cost <= 0.0 {
        return Err(ValidationError::SecondaryFabricCostRequired);
    }
    if input.has_scarf && input.main_scarf_cost <= 0.0 {
        return Err(ValidationError::MainScarfCostRequired);
    }
    if input.has_scarf && input.has_secondary_scarf && input.secondary_scarf_cost <= 0.0 {
        return Err(ValidationError::SecondaryScarfCostRequired);
    }
    if input.sewing_cost <= 0.0 {
        return Err(ValidationError::SewingCostRequired);
    }
    if input.packaging_cost < 0.0 {
        return Err(ValidationError::PackagingCostNegative);
    }
    if input.shipping_cost < 0.0 {
        return Err(ValidationError::ShippingCostNegative);
    }
    if !(0.0..=100.0).contains(&input.additional_expenses_rate) {
        return Err(ValidationError::AdditionalExpensesRateOutOfRange);
    }
    if input.profit_rate <= 0.0 {
        return Err(ValidationError::ProfitRateRequired);
    }
    Ok(())
}

/// Derives the full pricing projection for one cost record.
///
/// The summation order is fixed; callers relying on reproducible floats get
/// bit-identical output for identical input.
pub fn compute(
    input: &CostInput,
    bands: &CategoryBands,
) -> Result<PricedProduct, ValidationError> {
    validate(input)?;

    let mut materials_cost = input.main_fabric_cost;
    if input.has_secondary_fabric {
        materials_cost += input.secondary_fabric_cost;
    }
    if input.has_scarf {
        materials_cost += input.main_scarf_cost;
        if input.has_secondary_scarf {
            materials_cost += input.secondary_scarf_cost;
        }
    }

    let production_cost = input.sewing_cost + input.packaging_cost + input.shipping_cost;
    let additional_expenses =
        (materials_cost + production_cost) * (input.additional_expenses_rate / 100.0);
    let total_cost =
        materials_cost + production_cost + additional_expenses + input.fixed_cost_per_unit;
    let profit_amount = total_cost * (input.profit_rate / 100.0);
    let final_price = total_cost + profit_amount;

    let calculated_category = bands.categorize(final_price);

    Ok(PricedProduct {
        materials_cost,
        production_cost,
        additional_expenses,
        total_cost,
        profit_amount,
        final_price,
        calculated_category,
        category_matches: calculated_category == input.target_category,
    })
}

/// Advice for closing the gap between the calculated and target tiers.
/// Presentation guidance only; there is no corrective recalculation.
pub fn recommendation(calculated: Category, target: Category) -> Vec<String> {
    if calculated == target {
        return Vec::new();
    }
    if calculated < target {
        vec![
            "Increase the raw material cost".to_string(),
            "Increase the profit rate".to_string(),
        ]
    } else {
        vec![
            "Reduce the raw material cost".to_string(),
            "Reduce the profit rate".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_input() -> CostInput {
        CostInput {
            name: "Classic abaya".to_string(),
            code: Some("AB-001".to_string()),
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
    fn unused_optional_costs_are_ignored() {
        // Flags off: the secondary/scarf figures must not leak into totals.
        let mut input = plain_input();
        input.secondary_fabric_cost = 999.0;
        input.main_scarf_cost = 999.0;
        input.secondary_scarf_cost = 999.0;
        let priced = compute(&input, &CategoryBands::standard()).unwrap();
        assert_eq!(priced.materials_cost, 50.0);
    }

    #[test]
    fn scarf_costs_accumulate_when_flagged() {
        let mut input = plain_input();
        input.has_secondary_fabric = true;
        input.secondary_fabric_cost = 10.0;
        input.has_scarf = true;
        input.main_scarf_cost = 15.0;
        input.has_secondary_scarf = true;
        input.secondary_scarf_cost = 5.0;
        let priced = compute(&input, &CategoryBands::standard()).unwrap();
        assert_eq!(priced.materials_cost, 80.0);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut input = plain_input();
        input.name = "   ".to_string();
        let err = compute(&input, &CategoryBands::standard()).unwrap_err();
        assert_eq!(err.reason_code(), "name_required");
    }

    #[test]
    fn rate_above_hundred_is_rejected() {
        let mut input = plain_input();
        input.additional_expenses_rate = 100.5;
        let err = validate(&input).unwrap_err();
        assert_eq!(err.reason_code(), "additional_expenses_rate_out_of_range");
    }

    #[test]
    fn zero_packaging_and_shipping_are_valid() {
        let mut input = plain_input();
        input.packaging_cost = 0.0;
        input.shipping_cost = 0.0;
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn mismatch_below_target_advises_increases() {
        let advice = recommendation(Category::Economy, Category::Premium);
        assert_eq!(advice.len(), 2);
        assert!(advice[0].contains("Increase"));
    }

    #[test]
    fn mismatch_above_target_advises_reductions() {
        let advice = recommendation(Category::Luxury, Category::Daily);
        assert!(advice.iter().all(|line| line.contains("Reduce")));
    }

    #[test]
    fn matching_tiers_need_no_advice() {
        assert!(recommendation(Category::Daily, Category::Daily).is_empty());
    }
}
