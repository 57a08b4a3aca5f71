use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use nasiq_core::allocation;
use nasiq_schemas::category::Category;
use nasiq_schemas::product::CostInput;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::store::{CatalogStore, JsonStore};

mod config;
mod plotting;
mod store;
mod workflow;

#[derive(Parser)]
#[command(name = "nasiq", version, about = "Garment pricing and catalog toolkit")]
struct Cli {
    /// Profile whose catalog to operate on (defaults to "guest")
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Root data directory (defaults to "./data")
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Category band preset ("standard", "legacy") or a bands YAML file
    #[arg(long, global = true)]
    bands: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a product and save it to the catalog
    Add(ProductArgs),
    /// Recompute and replace a stored product
    Update {
        id: String,
        #[command(flatten)]
        args: ProductArgs,
    },
    /// Price a product without saving it
    Price(ProductArgs),
    /// Remove a product from the catalog
    Delete { id: String },
    /// List the catalog, newest first
    List,
    /// Show one product in full
    Show { id: String },
    /// Search products by name or code
    Search { query: String },
    /// List products targeting a tier
    Filter { category: Category },
    /// Show or change profile settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Manage the monthly fixed-cost table
    FixedCosts {
        #[command(subcommand)]
        action: FixedCostAction,
    },
    /// Write the dataset bundle (JSON) or catalog report (CSV) to a file
    Export {
        path: String,
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
    /// Import a dataset bundle or a JSON product array
    Import { path: String },
    /// Migrate a legacy local-app dump into this profile
    Migrate {
        path: String,
        /// Delete the legacy file after a successful migration
        #[arg(long)]
        purge_source: bool,
    },
    /// Catalog statistics, optionally with a category chart
    Stats {
        /// Write a category-distribution chart PNG to this path
        #[arg(long)]
        chart: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings and fixed costs
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        target_category: Option<Category>,
        #[arg(long)]
        monthly_products: Option<u32>,
        #[arg(long)]
        default_profit_rate: Option<f64>,
    },
}

#[derive(Subcommand)]
enum FixedCostAction {
    /// List fixed costs with their per-unit allocation
    List,
    /// Add a monthly overhead entry
    Add { name: String, amount: f64 },
    /// Change an entry's name or amount
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Remove an entry
    Delete { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[derive(Args)]
struct ProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Optional product code
    #[arg(long)]
    code: Option<String>,

    /// Target tier; defaults to the profile's setting
    #[arg(long)]
    target_category: Option<Category>,

    #[arg(long)]
    main_fabric_cost: f64,

    /// Providing a value marks the product as using a secondary fabric
    #[arg(long)]
    secondary_fabric_cost: Option<f64>,

    /// Providing a value marks the product as including a scarf
    #[arg(long)]
    main_scarf_cost: Option<f64>,

    /// Providing a value marks the scarf as using a secondary fabric
    #[arg(long)]
    secondary_scarf_cost: Option<f64>,

    #[arg(long)]
    sewing_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    packaging_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    shipping_cost: f64,

    /// Overhead percentage applied on top of materials and production
    #[arg(long, default_value_t = 0.0)]
    additional_expenses_rate: f64,

    /// Defaults to the profile's default profit rate
    #[arg(long)]
    profit_rate: Option<f64>,
}

/// Shapes CLI arguments into engine input, filling category and profit-rate
/// defaults from the profile settings and attaching the current fixed-cost
/// allocation.
fn build_cost_input(store: &dyn CatalogStore, args: ProductArgs) -> Result<CostInput> {
    let settings = store.settings()?;
    let fixed_cost_per_unit =
        allocation::fixed_cost_per_unit(&store.fixed_costs()?, settings.monthly_products);
    Ok(CostInput {
        name: args.name,
        code: args.code,
        target_category: args.target_category.unwrap_or(settings.target_category),
        main_fabric_cost: args.main_fabric_cost,
        has_secondary_fabric: args.secondary_fabric_cost.is_some(),
        secondary_fabric_cost: args.secondary_fabric_cost.unwrap_or(0.0),
        has_scarf: args.main_scarf_cost.is_some(),
        main_scarf_cost: args.main_scarf_cost.unwrap_or(0.0),
        has_secondary_scarf: args.main_scarf_cost.is_some()
            && args.secondary_scarf_cost.is_some(),
        secondary_scarf_cost: args.secondary_scarf_cost.unwrap_or(0.0),
        sewing_cost: args.sewing_cost,
        packaging_cost: args.packaging_cost,
        shipping_cost: args.shipping_cost,
        additional_expenses_rate: args.additional_expenses_rate,
        profit_rate: args.profit_rate.unwrap_or(settings.default_profit_rate),
        fixed_cost_per_unit,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = AppConfig::load(Path::new("nasiq.yaml"))?;

    let data_dir = cli
        .data_dir
        .or(app_config.data_dir)
        .unwrap_or_else(|| PathBuf::from("./data"));
    let profile = cli
        .profile
        .or(app_config.profile)
        .unwrap_or_else(|| "guest".to_string());
    let bands_selector = cli.bands.or(app_config.bands);
    let bands = config::resolve_bands(bands_selector.as_deref())?;

    let store = JsonStore::open(&data_dir, &profile)?;

    match cli.command {
        Command::Add(args) => {
            let input = build_cost_input(&store, args)?;
            workflow::add_product(&store, &bands, input)
        }
        Command::Update { id, args } => {
            let input = build_cost_input(&store, args)?;
            workflow::update_product(&store, &bands, &id, input)
        }
        Command::Price(args) => {
            let input = build_cost_input(&store, args)?;
            workflow::price_preview(&bands, input)
        }
        Command::Delete { id } => workflow::delete_product(&store, &id),
        Command::List => workflow::list_products(&store),
        Command::Show { id } => workflow::show_product(&store, &id),
        Command::Search { query } => workflow::search_products(&store, &query),
        Command::Filter { category } => workflow::filter_products(&store, category),
        Command::Settings { action } => match action {
            SettingsAction::Show => workflow::show_settings(&store),
            SettingsAction::Set {
                project_name,
                target_category,
                monthly_products,
                default_profit_rate,
            } => workflow::update_settings(
                &store,
                project_name,
                target_category,
                monthly_products,
                default_profit_rate,
            ),
        },
        Command::FixedCosts { action } => match action {
            FixedCostAction::List => workflow::show_fixed_costs(&store),
            FixedCostAction::Add { name, amount } => {
                workflow::add_fixed_cost(&store, &name, amount)
            }
            FixedCostAction::Update { id, name, amount } => {
                workflow::update_fixed_cost(&store, &id, name.as_deref(), amount)
            }
            FixedCostAction::Delete { id } => workflow::delete_fixed_cost(&store, &id),
        },
        Command::Export { path, format } => match format {
            ExportFormat::Json => workflow::export_json(&store, &path),
            ExportFormat::Csv => workflow::export_csv(&store, &path),
        },
        Command::Import { path } => workflow::import(&store, &bands, &path),
        Command::Migrate { path, purge_source } => {
            workflow::migrate(&store, &bands, &path, purge_source)
        }
        Command::Stats { chart } => workflow::show_stats(&store, chart.as_deref()),
    }
}
