pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::cache::{Clock, SystemClock};
use crate::core::config::AppConfig;
use crate::providers::{ExchangeRateApiProvider, RateCache, rate_cache_ttl};
use crate::store::ClientState;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates {
        bases: Vec<String>,
    },
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Chart {
        from: String,
        to: String,
        days: u32,
    },
    History {
        clear: bool,
    },
    Currencies,
    Favorite {
        code: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_cache = Arc::new(RateCache::new(rate_cache_ttl(), Arc::clone(&clock)));
    let provider = ExchangeRateApiProvider::new(
        &config.providers.exchange_rate.base_url,
        rate_cache,
        Arc::clone(&clock),
    );
    let open_state = || -> Result<ClientState> { ClientState::open(&config.data_path()?) };

    match command {
        AppCommand::Rates { bases } => {
            let bases: Vec<String> = if bases.is_empty() {
                vec![config.base_currency.to_uppercase()]
            } else {
                bases.iter().map(|b| b.to_uppercase()).collect()
            };
            cli::rates::run(&bases, &provider).await
        }
        AppCommand::Convert { amount, from, to } => {
            let state = open_state()?;
            let from = from.to_uppercase();
            let to = to.to_uppercase();
            let base = config.base_currency.to_uppercase();
            let request = cli::convert::ConvertRequest {
                amount: &amount,
                from: &from,
                to: &to,
                base: &base,
            };
            cli::convert::run(&request, &provider, &state, clock.as_ref())
                .await
                .map(|_| ())
        }
        AppCommand::Chart { from, to, days } => {
            cli::chart::run(&from.to_uppercase(), &to.to_uppercase(), days, &provider).await
        }
        AppCommand::History { clear } => cli::history::run(&open_state()?, clear).await,
        AppCommand::Currencies => cli::currencies::list(&open_state()?).await,
        AppCommand::Favorite { code } => cli::currencies::toggle_favorite(&open_state()?, &code)
            .await
            .map(|_| ()),
    }
}
