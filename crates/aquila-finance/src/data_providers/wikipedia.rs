//! Community-maintained WIKI prices for US equities.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{
    DataProvider, PriceSeries, QuandlClient, Tickers, check_window, default_end, default_start,
    fetch_all,
};
use crate::error::FinanceResult;

/// Quandl database holding the WIKI prices.
pub const WIKI_DATABASE: &str = "WIKI";

/// Markets covered by the WIKI database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WikiMarket {
    #[default]
    Nasdaq,
    Nyse,
}

/// Provider for the Quandl WIKI database; the token is optional.
#[derive(Debug)]
pub struct WikipediaDataProvider {
    client: QuandlClient,
    tickers: Tickers,
    market: WikiMarket,
    start: NaiveDate,
    end: NaiveDate,
    data: Vec<PriceSeries>,
}

impl WikipediaDataProvider {
    /// Create a provider over the default January 2016 window.
    pub fn new(token: Option<String>, tickers: impl Into<Tickers>) -> FinanceResult<Self> {
        Ok(Self {
            client: QuandlClient::new(token)?,
            tickers: tickers.into(),
            market: WikiMarket::default(),
            start: default_start(),
            end: default_end(),
            data: vec![],
        })
    }

    #[must_use]
    pub fn with_market(mut self, market: WikiMarket) -> Self {
        self.market = market;
        self
    }

    /// Set the date window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> FinanceResult<Self> {
        check_window(start, end)?;
        self.start = start;
        self.end = end;
        Ok(self)
    }

    /// Replace the HTTP client, e.g. to point at another endpoint.
    #[must_use]
    pub fn with_client(mut self, client: QuandlClient) -> Self {
        self.client = client;
        self
    }

    pub fn market(&self) -> WikiMarket {
        self.market
    }

    pub fn tickers(&self) -> &Tickers {
        &self.tickers
    }
}

#[async_trait]
impl DataProvider for WikipediaDataProvider {
    fn name(&self) -> &str {
        "wikipedia"
    }

    #[instrument(skip(self), fields(market = ?self.market, tickers = self.tickers.len()))]
    async fn run(&mut self) -> FinanceResult<()> {
        self.data = fetch_all(&self.client, WIKI_DATABASE, &self.tickers, self.start, self.end)
            .await?;
        info!(series = self.data.len(), "Loaded WIKI prices");
        Ok(())
    }

    fn data(&self) -> &[PriceSeries] {
        &self.data
    }
}
