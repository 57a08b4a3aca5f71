//! Correctness tests for the pricing engine.
//!
//! Validates that:
//! 1. The worked boundary scenario produces the exact expected figures
//! 2. Cost additivity and the profit identity hold across inputs
//! 3. Categorization is monotonic and total under both shipped presets
//! 4. Repeat computation is bit-identical
//! 5. Each violated precondition surfaces its own reason code

use nasiq_core::categories::CategoryBands;
use nasiq_core::pricing::{compute, validate};
use nasiq_schemas::category::Category;
use nasiq_schemas::product::CostInput;

fn base_input() -> CostInput {
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

fn varied_inputs() -> Vec<CostInput> {
    let mut inputs = Vec::new();

    let mut with_extras = base_input();
    with_extras.has_secondary_fabric = true;
    with_extras.secondary_fabric_cost = 35.5;
    with_extras.has_scarf = true;
    with_extras.main_scarf_cost = 22.25;
    with_extras.has_secondary_scarf = true;
    with_extras.secondary_scarf_cost = 8.75;
    with_extras.fixed_cost_per_unit = 17.5;
    inputs.push(with_extras);

    let mut pricey = base_input();
    pricey.main_fabric_cost = 310.0;
    pricey.sewing_cost = 140.0;
    pricey.additional_expenses_rate = 12.5;
    pricey.profit_rate = 85.0;
    pricey.fixed_cost_per_unit = 42.33;
    inputs.push(pricey);

    let mut minimal = base_input();
    minimal.main_fabric_cost = 0.01;
    minimal.sewing_cost = 0.01;
    minimal.packaging_cost = 0.0;
    minimal.shipping_cost = 0.0;
    minimal.additional_expenses_rate = 0.0;
    minimal.profit_rate = 0.01;
    inputs.push(minimal);

    inputs.push(base_input());
    inputs
}

// ---------------------------------------------------------------------------
// Worked scenario
// ---------------------------------------------------------------------------

#[test]
fn boundary_scenario_produces_exact_figures() {
    let priced = compute(&base_input(), &CategoryBands::standard()).unwrap();

    assert_eq!(priced.materials_cost, 50.0);
    assert_eq!(priced.production_cost, 30.0);
    assert_eq!(priced.additional_expenses, 8.0);
    assert_eq!(priced.total_cost, 88.0);
    assert_eq!(priced.profit_amount, 44.0);
    assert_eq!(priced.final_price, 132.0);
    assert_eq!(priced.calculated_category, Category::Economy);
    assert!(priced.category_matches);
}

#[test]
fn category_matches_only_for_the_computed_tier() {
    let mut input = base_input();
    input.target_category = Category::Premium;
    let priced = compute(&input, &CategoryBands::standard()).unwrap();
    assert_eq!(priced.calculated_category, Category::Economy);
    assert!(!priced.category_matches);
}

// ---------------------------------------------------------------------------
// Algebraic properties
// ---------------------------------------------------------------------------

#[test]
fn total_cost_is_additive() {
    let bands = CategoryBands::standard();
    for input in varied_inputs() {
        let priced = compute(&input, &bands).unwrap();
        let reassembled = priced.materials_cost
            + priced.production_cost
            + priced.additional_expenses
            + input.fixed_cost_per_unit;
        assert!((priced.total_cost - reassembled).abs() < 1e-9);
    }
}

#[test]
fn final_price_is_total_cost_marked_up_by_profit_rate() {
    let bands = CategoryBands::standard();
    for input in varied_inputs() {
        let priced = compute(&input, &bands).unwrap();
        let expected = priced.total_cost * (1.0 + input.profit_rate / 100.0);
        assert!((priced.final_price - expected).abs() < 1e-9);
    }
}

#[test]
fn repeat_computation_is_bit_identical() {
    let bands = CategoryBands::standard();
    for input in varied_inputs() {
        let first = compute(&input, &bands).unwrap();
        let second = compute(&input, &bands).unwrap();
        assert_eq!(first.materials_cost.to_bits(), second.materials_cost.to_bits());
        assert_eq!(first.additional_expenses.to_bits(), second.additional_expenses.to_bits());
        assert_eq!(first.total_cost.to_bits(), second.total_cost.to_bits());
        assert_eq!(first.profit_amount.to_bits(), second.profit_amount.to_bits());
        assert_eq!(first.final_price.to_bits(), second.final_price.to_bits());
        assert_eq!(first.calculated_category, second.calculated_category);
    }
}

// ---------------------------------------------------------------------------
// Categorization
// ---------------------------------------------------------------------------

#[test]
fn categorization_is_monotonic_under_both_presets() {
    for bands in [CategoryBands::standard(), CategoryBands::legacy()] {
        let mut previous_rank = 0;
        let mut price = 0.0;
        while price < 2000.0 {
            let rank = bands.categorize(price).rank();
            assert!(rank >= previous_rank, "rank dropped at price {}", price);
            previous_rank = rank;
            price += 0.25;
        }
    }
}

#[test]
fn categorization_is_total_with_one_band_per_price() {
    for bands in [CategoryBands::standard(), CategoryBands::legacy()] {
        let mut price = 0.0;
        while price < 2000.0 {
            let containing = bands
                .bands()
                .iter()
                .filter(|band| {
                    price >= band.min_price && band.max_price.map_or(true, |max| price < max)
                })
                .count();
            assert_eq!(containing, 1, "price {} covered by {} bands", price, containing);
            price += 0.25;
        }
    }
}

#[test]
fn presets_diverge_on_mid_range_prices() {
    // 450 is the luxury floor in the standard table but still a daily-tier
    // price under the legacy boundaries.
    assert_eq!(CategoryBands::standard().categorize(450.0), Category::Luxury);
    assert_eq!(CategoryBands::legacy().categorize(450.0), Category::Daily);
}

// ---------------------------------------------------------------------------
// Validation reason codes
// ---------------------------------------------------------------------------

#[test]
fn zero_main_fabric_cost_is_rejected() {
    let mut input = base_input();
    input.main_fabric_cost = 0.0;
    let err = compute(&input, &CategoryBands::standard()).unwrap_err();
    assert_eq!(err.reason_code(), "main_fabric_cost_required");
}

#[test]
fn flagged_secondary_fabric_needs_a_cost() {
    let mut input = base_input();
    input.has_secondary_fabric = true;
    input.secondary_fabric_cost = 0.0;
    let err = validate(&input).unwrap_err();
    assert_eq!(err.reason_code(), "secondary_fabric_cost_required");
}

#[test]
fn flagged_scarf_needs_a_cost() {
    let mut input = base_input();
    input.has_scarf = true;
    input.main_scarf_cost = 0.0;
    let err = validate(&input).unwrap_err();
    assert_eq!(err.reason_code(), "main_scarf_cost_required");
}

#[test]
fn flagged_secondary_scarf_needs_a_cost() {
    let mut input = base_input();
    input.has_scarf = true;
    input.main_scarf_cost = 12.0;
    input.has_secondary_scarf = true;
    input.secondary_scarf_cost = 0.0;
    let err = validate(&input).unwrap_err();
    assert_eq!(err.reason_code(), "secondary_scarf_cost_required");
}

#[test]
fn remaining_preconditions_each_carry_their_code() {
    let cases: Vec<(fn(&mut CostInput), &str)> = vec![
        (|input| input.name.clear(), "name_required"),
        (|input| input.sewing_cost = 0.0, "sewing_cost_required"),
        (|input| input.packaging_cost = -1.0, "packaging_cost_negative"),
        (|input| input.shipping_cost = -0.5, "shipping_cost_negative"),
        (
            |input| input.additional_expenses_rate = -2.0,
            "additional_expenses_rate_out_of_range",
        ),
        (|input| input.profit_rate = 0.0, "profit_rate_required"),
    ];
    for (mutate, code) in cases {
        let mut input = base_input();
        mutate(&mut input);
        let err = validate(&input).unwrap_err();
        assert_eq!(err.reason_code(), code);
    }
}
