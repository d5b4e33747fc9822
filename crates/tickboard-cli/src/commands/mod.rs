mod board;
mod detail;
mod history;
mod sectors;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use tickboard_core::{
    MarketDataSource, MockMarketData, QuoteStore, RestMarketData, SessionConfig, SessionLoader,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Data for `--format json` plus the pre-rendered table.
pub struct CommandOutput {
    pub data: Value,
    pub table: String,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let source = build_source(cli);

    match &cli.command {
        Command::Board(args) => {
            let store = load_store(cli, source).await?;
            board::run(args, &store)
        }
        Command::Detail(args) => detail::run(args, source.as_ref()).await,
        Command::History(args) => history::run(args, source.as_ref()).await,
        Command::Sectors => {
            let store = load_store(cli, source).await?;
            sectors::run(&store)
        }
    }
}

fn build_source(cli: &Cli) -> Arc<dyn MarketDataSource> {
    match &cli.backend_url {
        Some(url) => Arc::new(RestMarketData::new(url.clone()).with_timeout_ms(cli.timeout_ms)),
        None => Arc::new(MockMarketData::new()),
    }
}

async fn load_store(
    cli: &Cli,
    source: Arc<dyn MarketDataSource>,
) -> Result<QuoteStore, CliError> {
    let config = SessionConfig {
        fetch_timeout: Duration::from_millis(cli.timeout_ms),
    };
    let store = SessionLoader::new(source).with_config(config).load().await?;
    Ok(store)
}
