use super::ui;
use crate::core::ConversionHistory;
use crate::store::ClientState;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(state: &ClientState, clear: bool) -> Result<()> {
    if clear {
        state.clear_history().await?;
        println!("Conversion history cleared.");
        return Ok(());
    }

    let history = state.history().await?;
    if history.is_empty() {
        println!("No conversions yet.");
        return Ok(());
    }

    println!("\n{}", ui::style_text("Recent conversions", ui::StyleType::Title));
    println!("{}", history_table(&history));
    Ok(())
}

fn history_table(history: &ConversionHistory) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("When"),
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);

    for (i, record) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{} {}", record.from_amount, record.from)),
            Cell::new(format!("{} {}", ui::format_amount(record.to_amount), record.to)),
            Cell::new(ui::format_amount(record.rate)),
        ]);
    }

    table.to_string()
}
