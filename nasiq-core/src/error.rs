use thiserror::Error;

/// A violated pricing precondition. Each variant carries a stable reason
/// code so callers can map failures to specific messages without matching
/// on display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name is required")]
    NameRequired,

    #[error("main fabric cost must be greater than zero")]
    MainFabricCostRequired,

    #[error("secondary fabric cost must be greater than zero when a secondary fabric is used")]
    SecondaryFabricCostRequired,

    #[error("scarf fabric cost must be greater than zero when a scarf is included")]
    MainScarfCostRequired,

    #[error("secondary scarf fabric cost must be greater than zero when a secondary scarf fabric is used")]
    SecondaryScarfCostRequired,

    #[error("sewing cost must be greater than zero")]
    SewingCostRequired,

    #[error("packaging cost cannot be negative")]
    PackagingCostNegative,

    #[error("shipping cost cannot be negative")]
    ShippingCostNegative,

    #[error("additional expenses rate must be between 0 and 100")]
    AdditionalExpensesRateOutOfRange,

    #[error("profit rate must be greater than zero")]
    ProfitRateRequired,
}

impl ValidationError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name_required",
            ValidationError::MainFabricCostRequired => "main_fabric_cost_required",
            ValidationError::SecondaryFabricCostRequired => "secondary_fabric_cost_required",
            ValidationError::MainScarfCostRequired => "main_scarf_cost_required",
            ValidationError::SecondaryScarfCostRequired => "secondary_scarf_cost_required",
            ValidationError::SewingCostRequired => "sewing_cost_required",
            ValidationError::PackagingCostNegative => "packaging_cost_negative",
            ValidationError::ShippingCostNegative => "shipping_cost_negative",
            ValidationError::AdditionalExpensesRateOutOfRange => {
                "additional_expenses_rate_out_of_range"
            }
            ValidationError::ProfitRateRequired => "profit_rate_required",
        }
    }
}

#[derive(Debug, Error)]
pub enum NasiqError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("category band configuration error: {0}")]
    BandConfig(String),

    #[error("unknown band preset '{0}'")]
    UnknownPreset(String),

    #[error("product '{0}' not found")]
    ProductNotFound(String),

    #[error("fixed cost '{0}' not found")]
    FixedCostNotFound(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
