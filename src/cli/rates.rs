use super::ui;
use crate::core::{RateProvider, RateSnapshot, currency};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

pub async fn run(bases: &[String], provider: &(dyn RateProvider + Send + Sync)) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let rate_futures = bases.iter().map(|base| async move {
        let res = provider.get_rates(base).await;
        (base.as_str(), res)
    });
    let results = join_all(rate_futures).await;
    pb.finish_and_clear();

    let count = results.len();
    for (i, (base, result)) in results.into_iter().enumerate() {
        let snapshot = result?;
        println!(
            "\nRates for 1 {}",
            ui::style_text(base, ui::StyleType::Title)
        );
        if snapshot.is_fallback() {
            println!(
                "{}",
                ui::style_text(
                    "Live rates unavailable; showing approximate values.",
                    ui::StyleType::Warning
                )
            );
        }
        println!("{}", rates_table(&snapshot));

        if i < count - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}

fn rates_table(snapshot: &RateSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Rate"),
    ]);

    for (code, rate) in snapshot.table().sorted() {
        let name = currency::find(code)
            .map(|c| format!("{} {}", c.flag, c.name))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(code),
            Cell::new(name),
            Cell::new(ui::format_amount(rate)).set_alignment(comfy_table::CellAlignment::Right),
        ]);
    }

    table.to_string()
}
