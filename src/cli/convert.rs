use super::ui;
use crate::core::{Clock, ConversionRecord, RateProvider, parse_amount};
use crate::store::ClientState;
use anyhow::Result;
use tracing::{debug, info};

pub struct ConvertRequest<'a> {
    pub amount: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub base: &'a str,
}

/// Converts the requested amount and appends it to the stored history.
///
/// Returns `None` without touching the history when the amount is not a
/// positive number or the result overflows.
pub async fn run(
    request: &ConvertRequest<'_>,
    provider: &(dyn RateProvider + Send + Sync),
    state: &ClientState,
    clock: &dyn Clock,
) -> Result<Option<ConversionRecord>> {
    let Some(amount) = parse_amount(request.amount) else {
        println!(
            "{}",
            ui::style_text(
                &format!("Invalid amount: '{}'. Enter a number greater than zero.", request.amount),
                ui::StyleType::Error
            )
        );
        return Ok(None);
    };

    let pb = ui::new_spinner("Fetching exchange rates...");
    let snapshot = provider.get_rates(request.base).await;
    pb.finish_and_clear();
    let snapshot = snapshot?;

    let record = ConversionRecord::from_table(
        amount,
        request.from,
        request.to,
        snapshot.table(),
        clock.now(),
    )?;
    debug!(?record, "Conversion complete");

    if !record.is_finite() {
        println!(
            "{}",
            ui::style_text(
                &format!(
                    "Converting {} {} to {} is too large to represent. Nothing was recorded.",
                    request.amount, request.from, request.to
                ),
                ui::StyleType::Error
            )
        );
        return Ok(None);
    }

    if snapshot.is_fallback() {
        println!(
            "{}",
            ui::style_text(
                "Live rates unavailable; result uses approximate values.",
                ui::StyleType::Warning
            )
        );
    }
    println!("{}", format_record(&record));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "1 {} = {} {}",
                record.from,
                ui::format_amount(record.rate),
                record.to
            ),
            ui::StyleType::Subtle
        )
    );

    let mut history = state.history().await?;
    history.push(record.clone());
    state.save_history(&history).await?;
    info!(id = %record.id, "Saved conversion to history");

    Ok(Some(record))
}

/// One-line summary, e.g. `100 USD ≈ 85.000000 EUR`.
pub fn format_record(record: &ConversionRecord) -> String {
    format!(
        "{} {} ≈ {} {}",
        record.from_amount,
        record.from,
        ui::style_text(&ui::format_amount(record.to_amount), ui::StyleType::Result),
        record.to
    )
}
