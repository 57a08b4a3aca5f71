//! Renders the category-distribution chart for the stats dashboard.

use anyhow::Result;
use nasiq_core::stats::CatalogStatistics;
use nasiq_schemas::category::Category;
use plotters::prelude::*;

pub fn plot_category_distribution(path: &str, stats: &CatalogStatistics) -> Result<()> {
    println!("[Plotting] Rendering category distribution...");

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_count = stats
        .category_counts
        .values()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Products per Category", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..Category::ALL.len() as f64, 0u32..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Category::ALL.len())
        .x_label_formatter(&|x| {
            Category::ALL
                .get(x.floor() as usize)
                .map_or(String::new(), |category| category.to_string())
        })
        .y_desc("Products")
        .draw()?;

    let colors = [GREEN, BLUE, MAGENTA, RED];

    for (i, category) in Category::ALL.iter().enumerate() {
        let count = stats.category_counts.get(category).copied().unwrap_or(0) as u32;
        let color = colors[i % colors.len()];

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(i as f64 + 0.15, 0), (i as f64 + 0.85, count)],
                color.mix(0.7).filled(),
            )))?
            .label(category.label())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
