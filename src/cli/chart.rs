use super::ui;
use crate::core::{HistoricalPoint, RateProvider};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(
    from: &str,
    to: &str,
    days: u32,
    provider: &(dyn RateProvider + Send + Sync),
) -> Result<()> {
    let series = provider.historical_rates(from, to, days).await?;

    println!(
        "\n{} {}",
        ui::style_text(&format!("{from}/{to}"), ui::StyleType::Title),
        ui::style_text(&format!("last {days} days (simulated)"), ui::StyleType::Subtle)
    );
    println!("{}", render(&series));
    Ok(())
}

fn render(series: &[HistoricalPoint]) -> String {
    let rates: Vec<f64> = series.iter().map(|p| p.rate).collect();
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Rate"),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<f64> = None;
    for point in series {
        let change = previous.map(|p| (point.rate - p) / p * 100.0);
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d")),
            ui::number_cell(point.rate, 6),
            ui::change_cell(change),
        ]);
        previous = Some(point.rate);
    }

    let mut out = table.to_string();
    if !rates.is_empty() {
        out.push_str(&format!(
            "\n{}\nmin {min:.6}  max {max:.6}",
            ui::sparkline(&rates)
        ));
    }
    out
}
