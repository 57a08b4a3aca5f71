use nasiq_schemas::settings::FixedCost;

/// Sum of the monthly fixed-cost table.
pub fn monthly_total(costs: &[FixedCost]) -> f64 {
    costs.iter().map(|cost| cost.amount).sum()
}

/// Allocates the monthly overhead to one unit of planned output. A zero
/// planned volume yields a zero allocation rather than an error.
pub fn fixed_cost_per_unit(costs: &[FixedCost], monthly_volume: u32) -> f64 {
    if monthly_volume == 0 {
        return 0.0;
    }
    monthly_total(costs) / monthly_volume as f64
}

/// Per-unit share of a single overhead entry, for the settings preview.
pub fn per_unit_share(amount: f64, monthly_volume: u32) -> f64 {
    if monthly_volume == 0 {
        return 0.0;
    }
    amount / monthly_volume as f64
}
