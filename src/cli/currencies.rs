use super::ui;
use crate::core::currency::{self, CurrencyKind};
use crate::core::Favorites;
use crate::store::ClientState;
use anyhow::{Result, bail};
use comfy_table::Cell;

pub async fn list(state: &ClientState) -> Result<()> {
    let favorites = state.favorites().await?;
    println!("{}", currencies_table(&favorites));
    Ok(())
}

/// Adds or removes a favorite currency. Unknown codes are rejected.
pub async fn toggle_favorite(state: &ClientState, code: &str) -> Result<bool> {
    let Some(currency) = currency::find(code) else {
        bail!("Unknown currency code: {}", code);
    };

    let mut favorites = state.favorites().await?;
    let added = favorites.toggle(currency.code);
    state.save_favorites(&favorites).await?;

    let action = if added { "Added to" } else { "Removed from" };
    println!("{action} favorites: {} {}", currency.flag, currency.code);
    Ok(added)
}

fn currencies_table(favorites: &Favorites) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
        ui::header_cell("Type"),
    ]);

    for c in currency::sorted_by_favorites(favorites.codes()) {
        let star = if favorites.contains(c.code) { "★" } else { "" };
        let kind = match c.kind {
            CurrencyKind::Fiat => "fiat",
            CurrencyKind::Crypto => "crypto",
        };
        table.add_row(vec![
            Cell::new(star),
            Cell::new(format!("{} {}", c.flag, c.code)),
            Cell::new(c.name),
            Cell::new(c.symbol),
            Cell::new(kind),
        ]);
    }

    table.to_string()
}
